//! Command enum representing all executable feed actions
//!
//! Commands are the bridge between keybindings, the command palette and the
//! dispatcher. Each command knows what it targets; the dispatcher decides how.

use crate::commands::Category;
use crate::page::Interaction;

/// All commands that can be bound to chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Navigation ("g" family)
    // ========================================================================
    /// Go to the home timeline
    GoHome,
    /// Go to the explore page
    GoExplore,
    /// Go to notifications
    GoNotifications,
    /// Go to direct messages
    GoMessages,
    /// Go to the Grok assistant
    GoGrok,
    /// Go to the signed-in user's profile
    GoProfile,
    /// Go to the user's lists
    GoLists,
    /// Go to bookmarks
    GoBookmarks,
    /// Go to the user's communities
    GoCommunities,

    // ========================================================================
    // Feed focus
    // ========================================================================
    /// Move focus to the next feed item
    FocusNext,
    /// Move focus to the previous feed item
    FocusPrevious,
    /// Remove the highlight and reset focus to the top
    ClearFocus,

    // ========================================================================
    // Content interaction
    // ========================================================================
    Reply,
    Retweet,
    Like,
    Bookmark,
    /// Open the focused item, or expand it if it is a "Show N posts" control
    Open,

    // ========================================================================
    // Special
    // ========================================================================
    /// Explicitly unbind a chord (removes default bindings in user keymaps)
    Unbound,
}

/// Where a navigation command goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// An absolute path on the current origin
    Fixed(&'static str),
    /// A path below the derived username (`""` is the profile itself)
    User(&'static str),
}

impl Destination {
    /// Resolve to a path, given the username when the destination needs one
    pub fn path(self, username: Option<&str>) -> Option<String> {
        match self {
            Destination::Fixed(path) => Some(path.to_string()),
            Destination::User(suffix) => username.map(|user| format!("/{}{}", user, suffix)),
        }
    }
}

impl Command {
    /// Navigation target, for the "g" family
    pub fn destination(self) -> Option<Destination> {
        use Command::*;
        match self {
            GoHome => Some(Destination::Fixed("/home")),
            GoExplore => Some(Destination::Fixed("/explore")),
            GoNotifications => Some(Destination::Fixed("/notifications")),
            GoMessages => Some(Destination::Fixed("/messages")),
            GoGrok => Some(Destination::Fixed("/i/grok")),
            GoBookmarks => Some(Destination::Fixed("/i/bookmarks")),
            GoProfile => Some(Destination::User("")),
            GoLists => Some(Destination::User("/lists")),
            GoCommunities => Some(Destination::User("/communities")),
            _ => None,
        }
    }

    /// The control this command activates inside a focused content item
    pub fn interaction(self) -> Option<Interaction> {
        match self {
            Command::Reply => Some(Interaction::Reply),
            Command::Retweet => Some(Interaction::Retweet),
            Command::Like => Some(Interaction::Like),
            Command::Bookmark => Some(Interaction::Bookmark),
            _ => None,
        }
    }

    pub fn category(self) -> Category {
        if self.destination().is_some() {
            Category::Navigation
        } else {
            Category::ContentInteraction
        }
    }

    /// Every command except `Unbound`, in palette order
    pub fn all() -> &'static [Command] {
        use Command::*;
        &[
            GoHome,
            GoExplore,
            GoNotifications,
            GoMessages,
            GoGrok,
            GoProfile,
            GoLists,
            GoBookmarks,
            GoCommunities,
            FocusNext,
            FocusPrevious,
            Reply,
            Retweet,
            Like,
            Bookmark,
            Open,
            ClearFocus,
        ]
    }

    /// Human-readable name for logs and listings
    pub fn display_name(self) -> &'static str {
        use Command::*;
        match self {
            GoHome => "Go to Home",
            GoExplore => "Go to Explore",
            GoNotifications => "Go to Notifications",
            GoMessages => "Go to Messages",
            GoGrok => "Go to Grok",
            GoProfile => "Go to Profile",
            GoLists => "Go to Lists",
            GoBookmarks => "Go to Bookmarks",
            GoCommunities => "Go to Communities",
            FocusNext => "Focus Next Tweet",
            FocusPrevious => "Focus Previous Tweet",
            ClearFocus => "Remove Focus",
            Reply => "Reply to Tweet",
            Retweet => "Retweet",
            Like => "Like Tweet",
            Bookmark => "Bookmark Tweet",
            Open => "Open Tweet",
            Unbound => "Unbound",
        }
    }
}
