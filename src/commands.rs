//! Command registry for palettes and other presenters
//!
//! A static table with one entry per bindable command. Entries only carry
//! metadata and the [`Command`] itself; running an entry goes through
//! `KeyboardLayer::execute`, the same path chords take.

use serde::Serialize;

use crate::keymap::{Command, Keymap};

/// Palette grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Navigation,
    ContentInteraction,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Navigation => "navigation",
            Category::ContentInteraction => "content-interaction",
        }
    }
}

/// A command definition for the command palette
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: &'static str,
    pub command: Command,
    pub label: &'static str,
    pub description: &'static str,
}

impl CommandDef {
    pub fn category(&self) -> Category {
        self.command.category()
    }
}

/// Static registry of all available commands, in palette order
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        id: "nav-home",
        command: Command::GoHome,
        label: "Go to Home",
        description: "Navigate to your home timeline",
    },
    CommandDef {
        id: "nav-explore",
        command: Command::GoExplore,
        label: "Go to Explore",
        description: "Navigate to explore page",
    },
    CommandDef {
        id: "nav-notifications",
        command: Command::GoNotifications,
        label: "Go to Notifications",
        description: "View your notifications",
    },
    CommandDef {
        id: "nav-messages",
        command: Command::GoMessages,
        label: "Go to Messages",
        description: "Open your direct messages",
    },
    CommandDef {
        id: "nav-grok",
        command: Command::GoGrok,
        label: "Go to Grok",
        description: "Open Grok AI assistant",
    },
    CommandDef {
        id: "nav-profile",
        command: Command::GoProfile,
        label: "Go to Profile",
        description: "View your profile",
    },
    CommandDef {
        id: "nav-lists",
        command: Command::GoLists,
        label: "Go to Lists",
        description: "View your lists",
    },
    CommandDef {
        id: "nav-bookmarks",
        command: Command::GoBookmarks,
        label: "Go to Bookmarks",
        description: "View your bookmarked tweets",
    },
    CommandDef {
        id: "nav-communities",
        command: Command::GoCommunities,
        label: "Go to Communities",
        description: "View your communities",
    },
    CommandDef {
        id: "tweet-next",
        command: Command::FocusNext,
        label: "Focus Next Tweet",
        description: "Move focus to the next tweet",
    },
    CommandDef {
        id: "tweet-previous",
        command: Command::FocusPrevious,
        label: "Focus Previous Tweet",
        description: "Move focus to the previous tweet",
    },
    CommandDef {
        id: "tweet-reply",
        command: Command::Reply,
        label: "Reply to Tweet",
        description: "Reply to the focused tweet",
    },
    CommandDef {
        id: "tweet-retweet",
        command: Command::Retweet,
        label: "Retweet",
        description: "Retweet the focused tweet",
    },
    CommandDef {
        id: "tweet-like",
        command: Command::Like,
        label: "Like Tweet",
        description: "Like the focused tweet",
    },
    CommandDef {
        id: "tweet-bookmark",
        command: Command::Bookmark,
        label: "Bookmark Tweet",
        description: "Bookmark the focused tweet",
    },
    CommandDef {
        id: "tweet-open",
        command: Command::Open,
        label: "Open Tweet",
        description: "Open the focused tweet in detail view",
    },
    CommandDef {
        id: "tweet-unfocus",
        command: Command::ClearFocus,
        label: "Remove Focus",
        description: "Remove focus from the current tweet",
    },
];

/// Look up a definition by palette id
pub fn find(id: &str) -> Option<&'static CommandDef> {
    COMMANDS.iter().find(|def| def.id == id)
}

/// A registry entry with its shortcut resolved against a live keymap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    pub id: &'static str,
    #[serde(skip)]
    pub command: Command,
    pub label: &'static str,
    pub description: &'static str,
    /// `None` when the keymap leaves the command unbound
    pub shortcut: Option<String>,
    pub category: Category,
}

/// Every registry entry, with shortcut text from the keymap
pub fn command_entries(keymap: &Keymap) -> Vec<CommandEntry> {
    COMMANDS
        .iter()
        .map(|def| CommandEntry {
            id: def.id,
            command: def.command,
            label: def.label,
            description: def.description,
            shortcut: keymap.display_for(def.command),
            category: def.category(),
        })
        .collect()
}

/// Calculate fuzzy match score. Returns None if no match, Some(score) if matches.
/// Higher score = better match. Consecutive matches and word-start matches score higher.
fn fuzzy_match_score(query: &str, target: &str) -> Option<i32> {
    let query_chars: Vec<char> = query.to_lowercase().chars().collect();
    if query_chars.is_empty() {
        return Some(0);
    }

    let mut query_idx = 0;
    let mut score = 0;
    let mut prev_matched = false;
    let mut at_word_start = true;

    for (i, tc) in target.to_lowercase().chars().enumerate() {
        if query_idx < query_chars.len() && tc == query_chars[query_idx] {
            score += 1;
            if prev_matched {
                score += 2;
            }
            if at_word_start {
                score += 3;
            }
            if i == 0 {
                score += 5;
            }
            query_idx += 1;
            prev_matched = true;
        } else {
            prev_matched = false;
        }
        at_word_start = matches!(tc, ' ' | '-' | '_');
    }

    (query_idx == query_chars.len()).then_some(score)
}

/// Filter entries by a palette query, best label matches first
///
/// Entries whose label does not match fall back to matching the description.
pub fn filter_commands<'a>(entries: &'a [CommandEntry], query: &str) -> Vec<&'a CommandEntry> {
    if query.trim().is_empty() {
        return entries.iter().collect();
    }

    let mut matches: Vec<(&CommandEntry, i32)> = entries
        .iter()
        .filter_map(|entry| {
            fuzzy_match_score(query, entry.label)
                .map(|score| score + 100)
                .or_else(|| fuzzy_match_score(query, entry.description))
                .map(|score| (entry, score))
        })
        .collect();

    // Stable: ties keep palette order
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches.into_iter().map(|(entry, _)| entry).collect()
}
