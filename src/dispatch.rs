//! Action dispatcher: runs a command against the page
//!
//! Failures are never errors. Each command either produces an effect or a
//! [`SkipReason`], which is logged at debug level and returned for observers.

use std::fmt;

use crate::collector::Collector;
use crate::config::HighlightStyle;
use crate::focus::FocusState;
use crate::keymap::{Command, Destination};
use crate::location::{absolute_url, resolve_username};
use crate::options::Options;
use crate::page::{Interaction, PageAdapter};

/// Why a command did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No focusable elements on the page
    EmptySequence,
    /// Contextual navigation without a derivable username
    NoUsername,
    /// Interaction on an expansion control
    UnsupportedTarget,
    /// The expected control or link is missing inside the element
    MissingControl,
    /// The focus index points past the current feed
    NoFocusedElement,
    /// The command removes bindings and has no action
    Unbound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::EmptySequence => "no focusable elements",
            SkipReason::NoUsername => "no username",
            SkipReason::UnsupportedTarget => "unsupported target",
            SkipReason::MissingControl => "missing control",
            SkipReason::NoFocusedElement => "no focused element",
            SkipReason::Unbound => "unbound",
        };
        f.write_str(text)
    }
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Navigated(String),
    Interacted(Interaction),
    /// An expansion control was activated
    Expanded,
    Focused(usize),
    Cleared,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Navigated(url) => write!(f, "navigated to {}", url),
            Outcome::Interacted(interaction) => write!(f, "{}", interaction),
            Outcome::Expanded => f.write_str("expanded"),
            Outcome::Focused(index) => write!(f, "focused {}", index),
            Outcome::Cleared => f.write_str("cleared"),
            Outcome::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// Navigate to a root-relative path on the page's origin and notify the host
pub fn navigate_to<P: PageAdapter>(page: &mut P, options: &mut Options, path: &str) -> String {
    let url = absolute_url(&page.location().origin, path);
    tracing::info!("Navigating to {}", url);
    page.assign_location(&url);
    options.notify_navigate(&url);
    url
}

/// Borrowed view of the layer state needed to run one command
pub struct Dispatcher<'a, P: PageAdapter> {
    pub page: &'a mut P,
    pub focus: &'a mut FocusState,
    pub collector: &'a Collector,
    pub style: &'a HighlightStyle,
    pub options: &'a mut Options,
}

impl<P: PageAdapter> Dispatcher<'_, P> {
    pub fn execute(&mut self, command: Command) -> Outcome {
        let outcome = match command {
            Command::FocusNext => self
                .focus
                .move_next(&mut *self.page, self.collector, self.style)
                .map_or(Outcome::Skipped(SkipReason::EmptySequence), Outcome::Focused),
            Command::FocusPrevious => self
                .focus
                .move_previous(&mut *self.page, self.collector, self.style)
                .map_or(Outcome::Skipped(SkipReason::EmptySequence), Outcome::Focused),
            Command::ClearFocus => {
                self.focus.clear(&mut *self.page, self.collector);
                Outcome::Cleared
            }
            Command::Open => self.open(),
            Command::Reply | Command::Retweet | Command::Like | Command::Bookmark => {
                match command.interaction() {
                    Some(interaction) => self.interact(interaction),
                    None => Outcome::Skipped(SkipReason::Unbound),
                }
            }
            Command::Unbound => Outcome::Skipped(SkipReason::Unbound),
            _ => match command.destination() {
                Some(destination) => self.go(destination),
                None => Outcome::Skipped(SkipReason::Unbound),
            },
        };

        if let Outcome::Skipped(reason) = &outcome {
            tracing::debug!("{:?} skipped: {}", command, reason);
        }
        outcome
    }

    fn go(&mut self, destination: Destination) -> Outcome {
        let username = match destination {
            Destination::Fixed(_) => None,
            Destination::User(_) => resolve_username(&*self.page),
        };
        match destination.path(username.as_deref()) {
            Some(path) => {
                Outcome::Navigated(navigate_to(&mut *self.page, &mut *self.options, &path))
            }
            None => Outcome::Skipped(SkipReason::NoUsername),
        }
    }

    fn interact(&mut self, interaction: Interaction) -> Outcome {
        let Some(element) = self.focus.resolve(&*self.page, self.collector) else {
            return Outcome::Skipped(self.unresolved_reason());
        };
        if element.is_expansion_control() {
            return Outcome::Skipped(SkipReason::UnsupportedTarget);
        }
        let Some(control) = self
            .page
            .find_interaction_control(&element.handle, interaction)
        else {
            return Outcome::Skipped(SkipReason::MissingControl);
        };

        self.page.click(&control);
        tracing::debug!("Activated {} control", interaction);
        self.options.notify_interaction(interaction);
        Outcome::Interacted(interaction)
    }

    fn open(&mut self) -> Outcome {
        let Some(element) = self.focus.resolve(&*self.page, self.collector) else {
            return Outcome::Skipped(self.unresolved_reason());
        };

        if element.is_expansion_control() {
            let Some(button) = self.page.primary_button(&element.handle) else {
                return Outcome::Skipped(SkipReason::MissingControl);
            };
            self.page.click(&button);
            tracing::debug!("Expanded feed at index {}", self.focus.index());
            return Outcome::Expanded;
        }

        match self.page.find_permalink(&element.handle) {
            Some(href) => {
                Outcome::Navigated(navigate_to(&mut *self.page, &mut *self.options, &href))
            }
            None => Outcome::Skipped(SkipReason::MissingControl),
        }
    }

    fn unresolved_reason(&self) -> SkipReason {
        if self.collector.collect(&*self.page).is_empty() {
            SkipReason::EmptySequence
        } else {
            SkipReason::NoFocusedElement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryElement, MemoryPage, PageEffect};

    struct Harness {
        page: MemoryPage,
        focus: FocusState,
        collector: Collector,
        style: HighlightStyle,
        options: Options,
    }

    impl Harness {
        fn new(page: MemoryPage) -> Self {
            Self {
                page,
                focus: FocusState::new(),
                collector: Collector::default(),
                style: HighlightStyle::default(),
                options: Options::new(),
            }
        }

        fn run(&mut self, command: Command) -> Outcome {
            Dispatcher {
                page: &mut self.page,
                focus: &mut self.focus,
                collector: &self.collector,
                style: &self.style,
                options: &mut self.options,
            }
            .execute(command)
        }
    }

    #[test]
    fn test_fixed_navigation() {
        let mut h = Harness::new(MemoryPage::new("https://x.com/openai").unwrap());
        assert_eq!(
            h.run(Command::GoGrok),
            Outcome::Navigated("https://x.com/i/grok".to_string())
        );
        assert_eq!(h.page.navigations(), vec!["https://x.com/i/grok".to_string()]);
    }

    #[test]
    fn test_contextual_navigation_uses_path_user() {
        let mut h = Harness::new(MemoryPage::new("https://x.com/openai/status/1").unwrap());
        assert_eq!(
            h.run(Command::GoLists),
            Outcome::Navigated("https://x.com/openai/lists".to_string())
        );
    }

    #[test]
    fn test_contextual_navigation_without_user_skips() {
        let mut h = Harness::new(MemoryPage::new("https://x.com/i/bookmarks").unwrap());
        assert_eq!(
            h.run(Command::GoCommunities),
            Outcome::Skipped(SkipReason::NoUsername)
        );
        assert!(h.page.navigations().is_empty());
    }

    #[test]
    fn test_interaction_on_empty_feed() {
        let mut h = Harness::new(MemoryPage::default());
        assert_eq!(
            h.run(Command::Like),
            Outcome::Skipped(SkipReason::EmptySequence)
        );
        assert_eq!(
            h.run(Command::FocusNext),
            Outcome::Skipped(SkipReason::EmptySequence)
        );
    }

    #[test]
    fn test_interaction_clicks_control() {
        let mut page = MemoryPage::default();
        let item = page.push_content("/a/status/1");
        let mut h = Harness::new(page);

        assert_eq!(h.run(Command::Bookmark), Outcome::Interacted(Interaction::Bookmark));
        assert_eq!(
            h.page.clicks(),
            vec![MemoryElement::Control(item, Interaction::Bookmark)]
        );
    }

    #[test]
    fn test_missing_control() {
        let mut page = MemoryPage::default();
        page.push_content_with(Some("/a/status/1"), &[Interaction::Like]);
        let mut h = Harness::new(page);

        assert_eq!(
            h.run(Command::Retweet),
            Outcome::Skipped(SkipReason::MissingControl)
        );
        assert!(h.page.clicks().is_empty());
    }

    #[test]
    fn test_open_content_navigates_to_permalink() {
        let mut page = MemoryPage::default();
        page.push_content("/a/status/1");
        let mut h = Harness::new(page);

        assert_eq!(
            h.run(Command::Open),
            Outcome::Navigated("https://x.com/a/status/1".to_string())
        );
    }

    #[test]
    fn test_open_expansion_clicks_button() {
        let mut page = MemoryPage::default();
        let show = page.push_expansion("Show 5 posts");
        let mut h = Harness::new(page);

        assert_eq!(h.run(Command::Open), Outcome::Expanded);
        assert_eq!(
            h.page.effects(),
            &[PageEffect::Clicked(MemoryElement::Button(show))]
        );
        assert!(h.page.navigations().is_empty());
    }

    #[test]
    fn test_stale_index_is_no_focused_element() {
        let mut page = MemoryPage::default();
        for i in 0..3 {
            page.push_content(&format!("/a/status/{}", i));
        }
        let mut h = Harness::new(page);
        h.run(Command::FocusNext);
        h.run(Command::FocusNext);

        for id in h.page.node_ids().into_iter().skip(1) {
            h.page.remove(id);
        }
        assert_eq!(
            h.run(Command::Like),
            Outcome::Skipped(SkipReason::NoFocusedElement)
        );
    }

    #[test]
    fn test_unbound_is_skipped() {
        let mut h = Harness::new(MemoryPage::default());
        assert_eq!(h.run(Command::Unbound), Outcome::Skipped(SkipReason::Unbound));
    }
}
