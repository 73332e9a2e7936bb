//! Keybinding struct representing a mapping from a chord to a command

use super::chord::ChordSpec;
use super::command::Command;
use super::context::Condition;

/// A single keybinding mapping a chord to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// The keys that must be held together
    pub chord: ChordSpec,
    /// The command to execute
    pub command: Command,
    /// Conditions that must be true for this binding to activate
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    /// Create an unconditional binding
    pub fn new(chord: ChordSpec, command: Command) -> Self {
        Self {
            chord,
            command,
            when: None,
        }
    }

    /// Add conditions to this binding (builder pattern)
    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    /// Add a single condition to this binding
    pub fn when_single(mut self, condition: Condition) -> Self {
        self.when = Some(vec![condition]);
        self
    }

    /// Check if this is a multi-key chord binding
    pub fn is_sequence(&self) -> bool {
        self.chord.is_sequence()
    }

    /// Get display string for this keybinding
    pub fn display_string(&self) -> String {
        self.chord.display_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::KeyCode;

    #[test]
    fn test_single_binding() {
        let binding = Keybinding::new(ChordSpec::single(KeyCode::char('l')), Command::Like);
        assert!(!binding.is_sequence());
        assert!(binding.when.is_none());
        assert_eq!(binding.display_string(), "l");
    }

    #[test]
    fn test_sequence_binding_with_condition() {
        let binding = Keybinding::new(
            ChordSpec::sequence(KeyCode::char('g'), KeyCode::char('h')),
            Command::GoHome,
        )
        .when_single(Condition::NotTyping);

        assert!(binding.is_sequence());
        assert_eq!(binding.when, Some(vec![Condition::NotTyping]));
        assert_eq!(binding.display_string(), "g + h");
    }
}
