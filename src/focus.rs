//! Focus state machine over the collected feed
//!
//! The only persistent state is an index and whether a highlight is drawn.
//! Every transition collects the feed again, so the index is always
//! interpreted against the page as it is now.

use crate::collector::Collector;
use crate::config::HighlightStyle;
use crate::page::{NavigableElement, PageAdapter};

/// Observable phase of the focus machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    /// No element carries the highlight
    Unfocused,
    /// The element at this index was highlighted by the last move
    Focused(usize),
}

/// Index of the focused element plus highlight flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    index: usize,
    highlighted: bool,
}

/// Index after a forward move, or None for an empty feed
pub fn next_index(current: usize, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    Some((current.min(last) + 1).min(last))
}

/// Index after a backward move, or None for an empty feed
pub fn previous_index(current: usize, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    Some(current.min(last).saturating_sub(1))
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn phase(&self) -> FocusPhase {
        if self.highlighted {
            FocusPhase::Focused(self.index)
        } else {
            FocusPhase::Unfocused
        }
    }

    /// Move forward one element; returns the new index
    pub fn move_next<P: PageAdapter>(
        &mut self,
        page: &mut P,
        collector: &Collector,
        style: &HighlightStyle,
    ) -> Option<usize> {
        let elements = collector.collect(page);
        let Some(index) = next_index(self.index, elements.len()) else {
            tracing::debug!("Focus next: feed is empty");
            return None;
        };
        self.focus_at(page, &elements, index, style);
        Some(index)
    }

    /// Move back one element; returns the new index
    pub fn move_previous<P: PageAdapter>(
        &mut self,
        page: &mut P,
        collector: &Collector,
        style: &HighlightStyle,
    ) -> Option<usize> {
        let elements = collector.collect(page);
        let Some(index) = previous_index(self.index, elements.len()) else {
            tracing::debug!("Focus previous: feed is empty");
            return None;
        };
        self.focus_at(page, &elements, index, style);
        Some(index)
    }

    /// Strip the highlight from every element and return to index 0
    pub fn clear<P: PageAdapter>(&mut self, page: &mut P, collector: &Collector) {
        for element in collector.collect(page) {
            page.clear_highlight(&element.handle);
        }
        self.index = 0;
        self.highlighted = false;
    }

    /// Element at the stored index in a fresh collection
    ///
    /// This does not require a drawn highlight: actions after a clear target
    /// the first element.
    pub fn resolve<P: PageAdapter>(
        &self,
        page: &P,
        collector: &Collector,
    ) -> Option<NavigableElement<P::Element>> {
        collector.collect(page).into_iter().nth(self.index)
    }

    fn focus_at<P: PageAdapter>(
        &mut self,
        page: &mut P,
        elements: &[NavigableElement<P::Element>],
        index: usize,
        style: &HighlightStyle,
    ) {
        for element in elements {
            page.clear_highlight(&element.handle);
        }
        let target = &elements[index].handle;
        page.apply_highlight(target, style);
        page.scroll_into_view(target);

        tracing::debug!("Focused element {} of {}", index, elements.len());
        self.index = index;
        self.highlighted = true;
    }
}
