//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::chord::ChordSpec;
use super::command::Command;
use super::context::Condition;
use super::types::KeyCode;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub when: Option<Vec<String>>,
    /// `allow` or `forbid`; defaults depend on the chord shape
    #[serde(default)]
    pub modifiers: Option<String>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        let mut chord = parse_key_string(&entry.key)?;
        if let Some(ref policy) = entry.modifiers {
            chord = chord.with_forbid_modifiers(parse_modifier_policy(policy)?);
        }
        let command = parse_command(&entry.command)?;
        let conditions = parse_conditions(&entry.when)?;

        let mut binding = Keybinding::new(chord, command);
        if let Some(conds) = conditions {
            binding = binding.when(conds);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse a key string like "g h", "g + h", "escape" or "ctrl+k" into a chord
///
/// A lone key, or a chord that names a modifier, forbids extra modifiers;
/// plain multi-key sequences do not.
pub fn parse_key_string(key_str: &str) -> Result<ChordSpec, KeymapError> {
    let mut keys = Vec::new();

    for token in key_str.split_whitespace() {
        if token == "+" {
            continue;
        }
        for part in token.split('+').filter(|p| !p.is_empty()) {
            keys.push(parse_key_code(&part.to_lowercase())?);
        }
    }

    if keys.is_empty() {
        return Err(KeymapError::InvalidKey(format!(
            "No key found in binding: {}",
            key_str
        )));
    }

    let forbid_modifiers = keys.len() == 1 || keys.iter().any(|k| k.is_modifier());
    Ok(ChordSpec::new(keys, forbid_modifiers))
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    // Single character
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::char(c));
    }

    // Named keys
    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "shift" => Ok(KeyCode::Shift),
        "ctrl" | "control" => Ok(KeyCode::Control),
        "alt" | "option" | "opt" => Ok(KeyCode::Alt),
        "meta" | "cmd" | "super" | "win" => Ok(KeyCode::Meta),

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

fn parse_modifier_policy(policy: &str) -> Result<bool, KeymapError> {
    match policy.to_lowercase().as_str() {
        "forbid" | "none" => Ok(true),
        "allow" | "any" => Ok(false),
        _ => Err(KeymapError::InvalidKey(format!(
            "Unknown modifier policy: {}",
            policy
        ))),
    }
}

/// Parse a command name string into a Command enum
fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    Command::from_str(cmd).map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

/// Parse condition strings into Condition enums
fn parse_conditions(when: &Option<Vec<String>>) -> Result<Option<Vec<Condition>>, KeymapError> {
    let Some(conditions) = when else {
        return Ok(None);
    };

    let mut result = Vec::with_capacity(conditions.len());
    for cond_str in conditions {
        let condition = parse_condition(cond_str)?;
        result.push(condition);
    }
    Ok(Some(result))
}

/// Parse a single condition string
fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "not_typing" | "nottyping" => Ok(Condition::NotTyping),
        "typing" => Ok(Condition::Typing),
        "overlay_open" | "overlayopen" | "palette_open" => Ok(Condition::OverlayOpen),
        "overlay_closed" | "overlayclosed" | "palette_closed" => Ok(Condition::OverlayClosed),
        "composing" => Ok(Condition::Composing),
        "not_composing" | "notcomposing" => Ok(Condition::NotComposing),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "Invalid condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}

// Implement FromStr for Command to parse from YAML
impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // Navigation
            "GoHome" => Ok(Command::GoHome),
            "GoExplore" => Ok(Command::GoExplore),
            "GoNotifications" => Ok(Command::GoNotifications),
            "GoMessages" => Ok(Command::GoMessages),
            "GoGrok" => Ok(Command::GoGrok),
            "GoProfile" => Ok(Command::GoProfile),
            "GoLists" => Ok(Command::GoLists),
            "GoBookmarks" => Ok(Command::GoBookmarks),
            "GoCommunities" => Ok(Command::GoCommunities),

            // Focus
            "FocusNext" => Ok(Command::FocusNext),
            "FocusPrevious" => Ok(Command::FocusPrevious),
            "ClearFocus" => Ok(Command::ClearFocus),

            // Content interaction
            "Reply" => Ok(Command::Reply),
            "Retweet" => Ok(Command::Retweet),
            "Like" => Ok(Command::Like),
            "Bookmark" => Ok(Command::Bookmark),
            "Open" => Ok(Command::Open),

            // Special
            "Unbound" => Ok(Command::Unbound),

            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let chord = parse_key_string("l").unwrap();
        assert_eq!(chord.keys(), &[KeyCode::Char('l')]);
        assert!(chord.forbid_modifiers());
    }

    #[test]
    fn test_parse_sequence_forms() {
        let spaced = parse_key_string("g h").unwrap();
        let plus = parse_key_string("g + h").unwrap();
        assert_eq!(spaced, plus);
        assert_eq!(spaced.keys(), &[KeyCode::Char('g'), KeyCode::Char('h')]);
        assert!(!spaced.forbid_modifiers());
    }

    #[test]
    fn test_parse_key_with_modifier() {
        let chord = parse_key_string("ctrl+k").unwrap();
        assert_eq!(chord.keys(), &[KeyCode::Control, KeyCode::Char('k')]);
        assert!(chord.forbid_modifiers());
    }

    #[test]
    fn test_parse_named_key() {
        assert_eq!(parse_key_string("escape").unwrap(), ChordSpec::escape());
        assert_eq!(parse_key_string("Esc").unwrap(), ChordSpec::escape());
        assert_eq!(
            parse_key_string("up").unwrap().keys(),
            &[KeyCode::Up]
        );
    }

    #[test]
    fn test_parse_invalid_key() {
        assert!(matches!(
            parse_key_string("hyper"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("   "),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::from_str("GoHome"), Ok(Command::GoHome));
        assert_eq!(Command::from_str("Like"), Ok(Command::Like));
        assert_eq!(Command::from_str("SaveFile"), Err(()));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "g h"
    command: GoHome
    when: [not_typing]
  - key: "escape"
    command: ClearFocus
  - key: "l"
    command: Like
    modifiers: allow
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].command, Command::GoHome);
        assert_eq!(bindings[0].when, Some(vec![Condition::NotTyping]));
        assert_eq!(bindings[1].when, None);
        assert!(!bindings[2].chord.forbid_modifiers());
    }

    #[test]
    fn test_parse_yaml_rejects_unknown_command() {
        let yaml = r#"
bindings:
  - key: "x"
    command: Teleport
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidCommand(c)) if c == "Teleport"
        ));
    }

    #[test]
    fn test_parse_yaml_rejects_unknown_condition() {
        let yaml = r#"
bindings:
  - key: "x"
    command: Like
    when: [sometimes]
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidCondition(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = KeymapError::InvalidCommand("Teleport".to_string());
        assert_eq!(err.to_string(), "Invalid command: Teleport");
    }
}
