//! Configurable keyboard mapping system
//!
//! This module provides a data-driven keybinding system that:
//! - Tracks held keys and fires chords on their rising edge
//! - Supports leader sequences ("g h") alongside single keys
//! - Suppresses commands while the user is typing
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! KeyboardEvent.key → KeyCode → KeyInput → Keymap::handle_key() → Command
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Load from embedded defaults
//! let keymap = Keymap::with_bindings(default_bindings());
//!
//! // Or load from YAML file
//! let keymap = Keymap::with_bindings(load_keymap_file(Path::new("keymap.yaml"))?);
//! ```

mod binding;
mod chord;
mod command;
mod config;
mod context;
mod defaults;
mod dom_key;
#[allow(clippy::module_inception)]
mod keymap;
mod recognizer;
mod types;

pub use binding::Keybinding;
pub use chord::ChordSpec;
pub use command::{Command, Destination};
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{ActiveTarget, Condition, KeyContext, TypingState};
pub use defaults::{
    default_bindings, embedded_bindings, get_default_keymap_yaml, load_default_keymap,
    merge_bindings,
};
pub use dom_key::key_from_dom;
pub use keymap::Keymap;
pub use recognizer::{ChordRecognizer, KeyInput};
pub use types::{KeyCode, Modifiers};
