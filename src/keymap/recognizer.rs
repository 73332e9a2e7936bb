//! Chord recognition from raw key-down / key-up events
//!
//! The recognizer keeps the set of currently held keys and, after every
//! event, re-evaluates each watched chord. A chord fires on the rising edge
//! of its level only, so holding keys (or OS auto-repeat) never repeats an
//! action within one press-and-release cycle.

use std::collections::HashSet;

use super::chord::ChordSpec;
use super::types::{KeyCode, Modifiers};

/// A raw key event from the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Down(KeyCode),
    Up(KeyCode),
    /// The page lost focus; every key counts as released
    Blur,
}

/// Turns key state into discrete chord fires
#[derive(Debug, Clone, Default)]
pub struct ChordRecognizer {
    chords: Vec<ChordSpec>,
    /// Level of each chord after the previous event
    held: Vec<bool>,
    pressed: HashSet<KeyCode>,
    /// Keys pressed while Meta was down; hosts often drop their key-up
    pressed_under_meta: HashSet<KeyCode>,
}

impl ChordRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching a chord, returning its index
    ///
    /// Watching the same chord twice returns the existing index.
    pub fn watch(&mut self, chord: ChordSpec) -> usize {
        if let Some(idx) = self.chords.iter().position(|c| *c == chord) {
            return idx;
        }
        let level = chord.is_held(&self.pressed);
        self.chords.push(chord);
        self.held.push(level);
        self.chords.len() - 1
    }

    /// Apply a key event and return the indices of chords that fired
    pub fn handle(&mut self, input: KeyInput) -> Vec<usize> {
        match input {
            KeyInput::Down(key) => {
                if key != KeyCode::Meta && self.pressed.contains(&KeyCode::Meta) {
                    self.pressed_under_meta.insert(key);
                }
                self.pressed.insert(key);
            }
            KeyInput::Up(key) => {
                self.pressed.remove(&key);
                self.pressed_under_meta.remove(&key);
                if key == KeyCode::Meta {
                    for stale in self.pressed_under_meta.drain() {
                        self.pressed.remove(&stale);
                    }
                }
            }
            KeyInput::Blur => {
                self.pressed.clear();
                self.pressed_under_meta.clear();
            }
        }

        let mut rising = Vec::new();
        for (idx, chord) in self.chords.iter().enumerate() {
            let level = chord.is_held(&self.pressed);
            if level && !self.held[idx] {
                rising.push(idx);
            }
            self.held[idx] = level;
        }

        // The edge is consumed either way: releasing the modifier later
        // does not fire the chord within the same press.
        rising.retain(|&i| {
            let chord = &self.chords[i];
            !chord.forbid_modifiers() || self.modifiers_outside(chord).is_empty()
        });

        rising
    }

    /// Modifiers held that are not themselves keys of the chord
    fn modifiers_outside(&self, chord: &ChordSpec) -> Modifiers {
        self.pressed
            .iter()
            .filter(|k| !chord.keys().contains(k))
            .filter_map(|k| k.modifier())
            .fold(Modifiers::NONE, |acc, m| acc | m)
    }

    #[cfg(test)]
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}
