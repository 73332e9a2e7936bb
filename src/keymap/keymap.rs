//! Keymap struct for storing bindings and turning key events into commands

use super::binding::Keybinding;
use super::chord::ChordSpec;
use super::command::Command;
use super::context::{Condition, KeyContext};
use super::recognizer::{ChordRecognizer, KeyInput};

/// The keymap stores all keybindings and tracks live chord state
#[derive(Debug, Clone)]
pub struct Keymap {
    /// All registered bindings
    bindings: Vec<Keybinding>,
    /// Binding indices per recognizer chord index
    /// Multiple bindings can share the same chord with different conditions
    chord_bindings: Vec<Vec<usize>>,
    recognizer: ChordRecognizer,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            chord_bindings: Vec::new(),
            recognizer: ChordRecognizer::new(),
        }
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Add a binding to the keymap
    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.chord.keys().is_empty() || binding.command == Command::Unbound {
            return;
        }

        let chord_idx = self.recognizer.watch(binding.chord.clone());
        if chord_idx == self.chord_bindings.len() {
            self.chord_bindings.push(Vec::new());
        }
        self.chord_bindings[chord_idx].push(self.bindings.len());
        self.bindings.push(binding);
    }

    /// Feed a key event and return the commands whose chords fired
    ///
    /// Bindings with conditions are checked before unconditional ones, and
    /// at most one command is returned per fired chord.
    pub fn handle_key(&mut self, input: KeyInput, context: &KeyContext) -> Vec<Command> {
        let fired = self.recognizer.handle(input);
        let mut commands = Vec::with_capacity(fired.len());

        for chord_idx in fired {
            let indices = &self.chord_bindings[chord_idx];
            match self.find_matching_binding(indices, Some(context)) {
                Some(command) => {
                    tracing::debug!(
                        "Chord {} fired {:?}",
                        self.bindings[indices[0]].chord,
                        command
                    );
                    commands.push(command);
                }
                None => {
                    tracing::debug!(
                        "Chord {} fired but no binding matched {:?}",
                        self.bindings[indices[0]].chord,
                        context
                    );
                }
            }
        }

        commands
    }

    /// Find first binding that matches the context
    fn find_matching_binding(
        &self,
        indices: &[usize],
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        // First pass: find bindings with conditions that match
        for &idx in indices {
            let binding = &self.bindings[idx];
            if let (Some(conditions), Some(ctx)) = (&binding.when, context) {
                if Condition::evaluate_all(conditions, ctx) {
                    return Some(binding.command);
                }
            }
        }

        // Second pass: find unconditional bindings
        indices
            .iter()
            .map(|&idx| &self.bindings[idx])
            .find(|binding| binding.when.is_none())
            .map(|binding| binding.command)
    }

    /// Look up the command bound to a chord, ignoring key state
    pub fn lookup(&self, chord: &ChordSpec) -> Option<Command> {
        self.lookup_with_context(chord, None)
    }

    /// Look up the command bound to a chord under a context
    pub fn lookup_with_context(
        &self,
        chord: &ChordSpec,
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        let indices: Vec<usize> = self
            .bindings
            .iter()
            .enumerate()
            .filter(|(_, b)| b.chord == *chord)
            .map(|(idx, _)| idx)
            .collect();
        self.find_matching_binding(&indices, context)
    }

    /// Get all bindings
    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Get the keybinding for a command (first match)
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    /// Get display string for a command's keybinding
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
