//! Page adapter: the only seam between feed logic and a live page
//!
//! The focus state machine, collector and dispatcher never touch a DOM
//! directly. They query and mutate the page through [`PageAdapter`], which
//! keeps them testable against [`MemoryPage`] and lets [`web::DomPage`]
//! (feature `web`) drive a real browser document.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::HighlightStyle;
use crate::keymap::ActiveTarget;

mod memory;
mod pattern;
#[cfg(feature = "web")]
pub mod web;

pub use memory::{MemoryElement, MemoryPage, NodeId, PageEffect};
pub use pattern::{ExpansionPattern, DEFAULT_UNIT};

/// Interactive controls inside a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    Reply,
    Retweet,
    Like,
    Bookmark,
}

impl Interaction {
    pub const ALL: [Interaction; 4] = [
        Interaction::Reply,
        Interaction::Retweet,
        Interaction::Like,
        Interaction::Bookmark,
    ];

    /// Stable identifier reported to interaction observers
    pub fn id(self) -> &'static str {
        match self {
            Interaction::Reply => "reply",
            Interaction::Retweet => "retweet",
            Interaction::Like => "like",
            Interaction::Bookmark => "bookmark",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a navigable element represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// A feed entry (post)
    Content,
    /// A "Show N posts" control that reveals more entries
    ExpansionControl,
}

/// A focusable item, as found by the collector at one point in time
///
/// Handles are never cached across queries; identity is positional.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigableElement<E> {
    pub handle: E,
    pub kind: ElementKind,
}

impl<E> NavigableElement<E> {
    pub fn is_expansion_control(&self) -> bool {
        self.kind == ElementKind::ExpansionControl
    }
}

/// The parts of the page URL the dispatcher needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme, host and port, e.g. `https://x.com`
    pub origin: String,
    /// Path starting with `/`
    pub pathname: String,
}

/// Capabilities the feed layer needs from a page
pub trait PageAdapter {
    /// Handle to a node in the page
    type Element: Clone + PartialEq + fmt::Debug;

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All content items, in any order
    fn content_items(&self) -> Vec<Self::Element>;

    /// All feed cells that may host an expansion control, in any order
    fn cells(&self) -> Vec<Self::Element>;

    /// First button inside a cell
    fn primary_button(&self, cell: &Self::Element) -> Option<Self::Element>;

    fn text_content(&self, element: &Self::Element) -> String;

    /// Relative document position: `Less` when `a` comes before `b`
    fn compare_document_position(&self, a: &Self::Element, b: &Self::Element) -> Ordering;

    /// The control for an interaction inside a content item
    fn find_interaction_control(
        &self,
        item: &Self::Element,
        interaction: Interaction,
    ) -> Option<Self::Element>;

    /// Permalink href of a content item
    fn find_permalink(&self, item: &Self::Element) -> Option<String>;

    fn location(&self) -> Location;

    /// href of the signed-in user's profile link, if the page has one
    fn profile_link_href(&self) -> Option<String>;

    /// What currently holds input focus
    fn active_target(&self) -> ActiveTarget;

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    fn apply_highlight(&mut self, element: &Self::Element, style: &HighlightStyle);

    fn clear_highlight(&mut self, element: &Self::Element);

    /// Smoothly scroll the element to the viewport center
    fn scroll_into_view(&mut self, element: &Self::Element);

    /// Simulate a click
    fn click(&mut self, element: &Self::Element);

    /// Full-page navigation
    fn assign_location(&mut self, url: &str);
}
