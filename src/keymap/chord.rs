//! Chord specifications: which keys must be held together to trigger a binding

use std::collections::HashSet;
use std::fmt;

use super::types::KeyCode;

/// A logical chord: a set of keys that must be held at the same time
///
/// Chords are level-based: `g + h` is satisfied whenever both keys are down,
/// regardless of which was pressed first. The recognizer turns that level
/// into a single fire per press cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChordSpec {
    keys: Vec<KeyCode>,
    forbid_modifiers: bool,
}

impl ChordSpec {
    /// Create a chord from arbitrary keys; duplicates are dropped, order kept
    pub fn new(keys: Vec<KeyCode>, forbid_modifiers: bool) -> Self {
        let mut unique = Vec::with_capacity(keys.len());
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self {
            keys: unique,
            forbid_modifiers,
        }
    }

    /// A single key that must be pressed with no modifier held
    pub fn single(key: KeyCode) -> Self {
        Self::new(vec![key], true)
    }

    /// A leader + follower sequence such as `g + h`
    pub fn sequence(leader: KeyCode, follower: KeyCode) -> Self {
        Self::new(vec![leader, follower], false)
    }

    /// Escape with no modifier held
    pub fn escape() -> Self {
        Self::single(KeyCode::Escape)
    }

    /// Override whether held modifiers suppress this chord
    pub fn with_forbid_modifiers(mut self, forbid: bool) -> Self {
        self.forbid_modifiers = forbid;
        self
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    pub fn forbid_modifiers(&self) -> bool {
        self.forbid_modifiers
    }

    pub fn is_sequence(&self) -> bool {
        self.keys.len() > 1
    }

    /// True when every key of the chord is in the pressed set
    pub fn is_held(&self, pressed: &HashSet<KeyCode>) -> bool {
        !self.keys.is_empty() && self.keys.iter().all(|k| pressed.contains(k))
    }

    /// Shortcut text as shown in a command palette ("g + h", "j", "Esc")
    pub fn display_string(&self) -> String {
        self.keys
            .iter()
            .map(|k| k.label())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for ChordSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}
