//! Text pattern that identifies expansion controls ("Show 12 posts")

use regex::{Regex, RegexBuilder};

/// Unit word used by the default pattern
pub const DEFAULT_UNIT: &str = "post";

/// Matches `Show <count> <unit>[s]`, ASCII case-insensitive, over the whole trimmed text
#[derive(Debug, Clone)]
pub struct ExpansionPattern {
    regex: Regex,
}

impl ExpansionPattern {
    /// Build a pattern for a unit word (singular form)
    ///
    /// Falls back to the default unit if the word cannot form a pattern.
    pub fn new(unit: &str) -> Self {
        let unit = unit.trim();
        let unit = if unit.is_empty() { DEFAULT_UNIT } else { unit };
        let source = format!(r"^Show [0-9]+ {}s?$", regex::escape(unit));

        match build(&source) {
            Ok(regex) => Self { regex },
            Err(e) => {
                tracing::warn!("Invalid expansion unit {:?}: {}, using default", unit, e);
                Self::default()
            }
        }
    }

    /// The regex source, for diagnostics
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text.trim())
    }
}

/// ASCII-only matching: the count is decimal digits and case folding stays in ASCII
fn build(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .unicode(false)
        .build()
}

impl Default for ExpansionPattern {
    fn default() -> Self {
        let regex = build(r"^Show [0-9]+ posts?$").expect("default expansion pattern is valid");
        Self { regex }
    }
}
