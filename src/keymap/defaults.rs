//! Default keybindings for the feed layer
//!
//! These are the standard keybindings that ship with the crate.
//! Can be loaded from keymap.yaml at project root, or falls back to hardcoded defaults.

use std::path::Path;

use super::binding::Keybinding;
use super::chord::ChordSpec;
use super::command::Command;
use super::config::load_keymap_file;
use super::context::Condition;
use super::types::KeyCode;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap YAML, as a template for user keymaps
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load the embedded defaults only, without touching the filesystem
pub fn embedded_bindings() -> Vec<Keybinding> {
    match super::config::parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. keymap.yaml in current directory (project-local overrides)
/// 3. User config at ~/.config/feedkeys/keymap.yaml
///
/// User bindings with `command: Unbound` will remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let mut bindings = embedded_bindings();
    tracing::info!("Loaded embedded default keymap ({} bindings)", bindings.len());

    // Try loading project-local keymap.yaml
    if let Ok(local_bindings) = load_keymap_file(Path::new("keymap.yaml")) {
        tracing::info!(
            "Merging project keymap.yaml ({} bindings)",
            local_bindings.len()
        );
        bindings = merge_bindings(bindings, local_bindings);
    }

    // Try loading user config
    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            match load_keymap_file(&user_path) {
                Ok(user_bindings) => {
                    tracing::info!(
                        "Merging user keymap from {} ({} bindings)",
                        user_path.display(),
                        user_bindings.len()
                    );
                    bindings = merge_bindings(bindings, user_bindings);
                }
                Err(e) => {
                    tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
                }
            }
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// User bindings override or extend base bindings:
/// - If user binding has same chord + conditions → replaces base
/// - If user binding command is `Unbound` → removes matching base bindings
/// - Otherwise → user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.chord.keys() != user_binding.chord.keys());
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.chord.keys() == user_binding.chord.keys() && b.when == user_binding.when);

        if let Some(idx) = existing_idx {
            result[idx] = user_binding;
        } else {
            result.push(user_binding);
        }
    }

    result
}

/// Hardcoded default keybindings
///
/// Mirrors the embedded keymap.yaml. Every binding except Escape is
/// guarded by the typing context.
pub fn default_bindings() -> Vec<Keybinding> {
    let g = KeyCode::char('g');

    let mut bindings: Vec<Keybinding> = [
        // ====================================================================
        // Navigation
        // ====================================================================
        ('h', Command::GoHome),
        ('e', Command::GoExplore),
        ('n', Command::GoNotifications),
        ('m', Command::GoMessages),
        ('k', Command::GoGrok),
        ('p', Command::GoProfile),
        ('l', Command::GoLists),
        ('b', Command::GoBookmarks),
        ('c', Command::GoCommunities),
    ]
    .into_iter()
    .map(|(c, command)| guarded(ChordSpec::sequence(g, KeyCode::char(c)), command))
    .collect();

    bindings.extend(
        [
            // ================================================================
            // Feed focus and content interaction
            // ================================================================
            ('j', Command::FocusNext),
            ('k', Command::FocusPrevious),
            ('r', Command::Reply),
            ('t', Command::Retweet),
            ('l', Command::Like),
            ('b', Command::Bookmark),
            ('o', Command::Open),
        ]
        .into_iter()
        .map(|(c, command)| guarded(ChordSpec::single(KeyCode::char(c)), command)),
    );

    // Escape (always available, modifiers still suppress it)
    bindings.push(Keybinding::new(ChordSpec::escape(), Command::ClearFocus));

    bindings
}

/// Helper to create a typing-guarded keybinding
fn guarded(chord: ChordSpec, command: Command) -> Keybinding {
    Keybinding::new(chord, command).when_single(Condition::NotTyping)
}
