//! Navigable element collection
//!
//! Builds the ordered list of focusable items from a fresh page query. The
//! list is never cached: the feed mutates under us (infinite scroll,
//! virtualization), so every focus operation collects again.

use crate::page::{ElementKind, ExpansionPattern, NavigableElement, PageAdapter};

/// Finds content items and expansion controls in document order
#[derive(Debug, Clone, Default)]
pub struct Collector {
    pattern: ExpansionPattern,
}

impl Collector {
    pub fn new(pattern: ExpansionPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &ExpansionPattern {
        &self.pattern
    }

    /// Every content item plus every cell whose first button reads like
    /// "Show N posts", sorted by document position
    ///
    /// For expansion controls the cell is the handle; its button is looked up
    /// again when activated.
    pub fn collect<P: PageAdapter>(&self, page: &P) -> Vec<NavigableElement<P::Element>> {
        let mut elements: Vec<NavigableElement<P::Element>> = page
            .content_items()
            .into_iter()
            .map(|handle| NavigableElement {
                handle,
                kind: ElementKind::Content,
            })
            .collect();

        for cell in page.cells() {
            let Some(button) = page.primary_button(&cell) else {
                continue;
            };
            if self.pattern.matches(&page.text_content(&button)) {
                elements.push(NavigableElement {
                    handle: cell,
                    kind: ElementKind::ExpansionControl,
                });
            }
        }

        // Stable, so elements the page cannot order keep query order
        elements.sort_by(|a, b| page.compare_document_position(&a.handle, &b.handle));
        elements
    }
}
