//! Layer configuration persistence
//!
//! Stores user preferences in `~/.config/feedkeys/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::page::{ExpansionPattern, Interaction};

/// Inline styling applied to the focused element
///
/// Values are CSS strings applied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub outline: String,
    pub outline_offset: String,
    pub box_shadow: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            outline: "4px solid #1d9bf0".to_string(),
            outline_offset: "-4px".to_string(),
            box_shadow: "0 0 0 2px rgba(29, 155, 240, 0.2)".to_string(),
        }
    }
}

impl HighlightStyle {
    /// CSS property names paired with their values
    pub fn properties(&self) -> [(&'static str, &str); 3] {
        [
            ("outline", &self.outline),
            ("outline-offset", &self.outline_offset),
            ("box-shadow", &self.box_shadow),
        ]
    }
}

/// CSS selectors used to find things on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    pub content_item: String,
    pub cell: String,
    /// Searched inside a cell; the first match is the candidate expansion control
    pub cell_button: String,
    pub permalink: String,
    pub profile_link: String,
    pub reply: String,
    pub retweet: String,
    pub like: String,
    pub bookmark: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            content_item: r#"[data-testid="tweet"]"#.to_string(),
            cell: r#"[data-testid="cellInnerDiv"]"#.to_string(),
            cell_button: "button".to_string(),
            permalink: r#"a[href*="/status/"]"#.to_string(),
            profile_link: r#"[data-testid="AppTabBar_Profile_Link"]"#.to_string(),
            reply: r#"[data-testid="reply"]"#.to_string(),
            retweet: r#"[data-testid="retweet"]"#.to_string(),
            like: r#"[data-testid="like"]"#.to_string(),
            bookmark: r#"[data-testid="bookmark"]"#.to_string(),
        }
    }
}

impl PageSelectors {
    pub fn control(&self, interaction: Interaction) -> &str {
        match interaction {
            Interaction::Reply => &self.reply,
            Interaction::Retweet => &self.retweet,
            Interaction::Like => &self.like,
            Interaction::Bookmark => &self.bookmark,
        }
    }
}

/// Layer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub highlight: HighlightStyle,

    /// Unit word in expansion labels ("Show 3 posts")
    #[serde(default = "default_expansion_unit")]
    pub expansion_unit: String,

    #[serde(default)]
    pub selectors: PageSelectors,
}

fn default_expansion_unit() -> String {
    crate::page::DEFAULT_UNIT.to_string()
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            highlight: HighlightStyle::default(),
            expansion_unit: default_expansion_unit(),
            selectors: PageSelectors::default(),
        }
    }
}

impl LayerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse YAML; missing fields take their defaults
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Parse JSON, as handed over by a host page
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn expansion_pattern(&self) -> ExpansionPattern {
        ExpansionPattern::new(&self.expansion_unit)
    }
}

/// Write the default config and the keymap template
///
/// Existing files are left alone unless `force` is set. Returns the paths
/// that were written.
pub fn write_default_files(
    config_path: &Path,
    keymap_path: &Path,
    force: bool,
) -> Result<Vec<PathBuf>, String> {
    let mut written = Vec::new();

    if force || !config_path.exists() {
        LayerConfig::default().save_to(config_path)?;
        written.push(config_path.to_path_buf());
    }

    if force || !keymap_path.exists() {
        if let Some(parent) = keymap_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        std::fs::write(keymap_path, crate::keymap::get_default_keymap_yaml()).map_err(|e| {
            format!("Failed to write keymap to {}: {}", keymap_path.display(), e)
        })?;
        tracing::info!("Wrote keymap template to {}", keymap_path.display());
        written.push(keymap_path.to_path_buf());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_defaults() {
        let style = HighlightStyle::default();
        assert_eq!(style.outline, "4px solid #1d9bf0");
        assert_eq!(style.outline_offset, "-4px");
        assert_eq!(style.box_shadow, "0 0 0 2px rgba(29, 155, 240, 0.2)");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = LayerConfig::parse(
            r#"
highlight:
  outline: "2px dashed red"
"#,
        )
        .unwrap();

        assert_eq!(config.highlight.outline, "2px dashed red");
        assert_eq!(config.highlight.outline_offset, "-4px");
        assert_eq!(config.expansion_unit, "post");
        assert_eq!(config.selectors, PageSelectors::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = LayerConfig::parse("").unwrap();
        assert_eq!(config.expansion_unit, "post");
    }

    #[test]
    fn test_control_selectors() {
        let selectors = PageSelectors::default();
        assert_eq!(selectors.control(Interaction::Like), r#"[data-testid="like"]"#);
        assert_eq!(
            selectors.control(Interaction::Bookmark),
            r#"[data-testid="bookmark"]"#
        );
    }

    #[test]
    fn test_from_json() {
        let config = LayerConfig::from_json(r#"{"expansion_unit": "reply"}"#).unwrap();
        assert!(config.expansion_pattern().matches("Show 2 replys"));
    }
}
