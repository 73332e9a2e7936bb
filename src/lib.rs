//! feedkeys - keyboard command layer for social feed pages
//!
//! Recognizes key chords, keeps one feed item focused across a constantly
//! re-rendering page, and runs navigation and interaction commands against
//! it. The page itself is reached only through [`page::PageAdapter`].

pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dispatch;
pub mod focus;
pub mod keymap;
pub mod layer;
pub mod location;
pub mod options;
pub mod page;
pub mod replay;
pub mod tracing;

// Re-export commonly used types
pub use collector::Collector;
pub use commands::{command_entries, Category, CommandEntry, COMMANDS};
pub use config::{HighlightStyle, LayerConfig, PageSelectors};
pub use dispatch::{Outcome, SkipReason};
pub use focus::{FocusPhase, FocusState};
pub use keymap::{Command, KeyCode, KeyInput, Keymap};
pub use layer::KeyboardLayer;
pub use options::Options;
pub use page::{Interaction, MemoryPage, PageAdapter};
