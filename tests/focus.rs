//! Focus state machine and collector tests

mod common;

use common::{ch, feed_page, feed_with_expansion, layer_over, tap};
use feedkeys::dispatch::SkipReason;
use feedkeys::page::{MemoryElement, PageEffect};
use feedkeys::{Collector, Command, FocusPhase, Outcome};

// ========================================================================
// Bounds
// ========================================================================

#[test]
fn test_next_reaches_last_and_stays() {
    for len in 1..=6 {
        let (mut layer, _) = layer_over(feed_page(len));

        for _ in 0..len.saturating_sub(1) {
            layer.execute(Command::FocusNext);
        }
        assert_eq!(layer.focus_index(), len - 1, "len {}", len);

        for _ in 0..3 {
            layer.execute(Command::FocusNext);
            assert_eq!(layer.focus_index(), len - 1, "len {}", len);
        }
    }
}

#[test]
fn test_previous_at_zero_stays() {
    for len in 1..=4 {
        let (mut layer, _) = layer_over(feed_page(len));
        assert_eq!(layer.execute(Command::FocusPrevious), Outcome::Focused(0));
        assert_eq!(layer.focus_index(), 0);
    }
}

#[test]
fn test_first_next_skips_the_top_item() {
    let (mut layer, _) = layer_over(feed_page(3));
    assert_eq!(tap(&mut layer, ch('j')), vec![Outcome::Focused(1)]);
}

#[test]
fn test_next_and_previous_on_empty_page() {
    let (mut layer, _) = layer_over(feed_page(0));
    assert_eq!(
        layer.execute(Command::FocusNext),
        Outcome::Skipped(SkipReason::EmptySequence)
    );
    assert_eq!(
        layer.execute(Command::FocusPrevious),
        Outcome::Skipped(SkipReason::EmptySequence)
    );
    assert_eq!(layer.focus_phase(), FocusPhase::Unfocused);
    assert!(layer.page().effects().is_empty());
}

// ========================================================================
// Clear
// ========================================================================

#[test]
fn test_clear_from_any_state() {
    for moves in 0..4 {
        let (mut layer, _) = layer_over(feed_page(4));
        for _ in 0..moves {
            layer.execute(Command::FocusNext);
        }

        assert_eq!(tap(&mut layer, feedkeys::KeyCode::Escape), vec![Outcome::Cleared]);
        assert_eq!(layer.focus_index(), 0);
        assert_eq!(layer.focus_phase(), FocusPhase::Unfocused);
        assert!(layer.page().highlighted().is_empty());
    }
}

#[test]
fn test_clear_on_empty_page() {
    let (mut layer, _) = layer_over(feed_page(0));
    assert_eq!(layer.clear_focus(), Outcome::Cleared);
    assert_eq!(layer.focus_index(), 0);
}

// ========================================================================
// Highlight
// ========================================================================

#[test]
fn test_exactly_one_highlight_while_focused() {
    let (mut layer, _) = layer_over(feed_page(5));
    let ids = layer.page().node_ids();

    layer.focus_next();
    layer.focus_next();
    layer.focus_previous();

    assert_eq!(layer.page().highlighted(), vec![ids[1]]);
    let style = layer.page().highlight_style(ids[1]).unwrap();
    assert_eq!(style.outline, "4px solid #1d9bf0");
}

#[test]
fn test_move_scrolls_target_into_view() {
    let (mut layer, _) = layer_over(feed_page(3));
    let ids = layer.page().node_ids();

    layer.page_mut().take_effects();
    layer.focus_next();

    let effects = layer.page().effects();
    assert_eq!(effects.last(), Some(&PageEffect::Scrolled(ids[1])));
    assert!(effects.contains(&PageEffect::Highlighted(ids[1])));
}

// ========================================================================
// Live page mutation
// ========================================================================

#[test]
fn test_shrinking_feed_is_clamped() {
    let (mut layer, _) = layer_over(feed_page(6));
    for _ in 0..5 {
        layer.focus_next();
    }
    assert_eq!(layer.focus_index(), 5);

    let ids = layer.page().node_ids();
    for id in &ids[2..] {
        layer.page_mut().remove(*id);
    }

    assert_eq!(layer.focus_next(), Outcome::Focused(1));
    assert_eq!(layer.page().highlighted(), vec![ids[1]]);
}

#[test]
fn test_index_is_positional_after_prepend() {
    let (mut layer, _) = layer_over(feed_page(3));
    layer.focus_next();

    let inserted = layer.page_mut().insert_content(0, "/fresh/status/1");
    layer.focus_next();

    // Index 2 now holds what used to be index 1
    let elements = layer.navigable_elements();
    assert_eq!(layer.focus_index(), 2);
    assert_ne!(elements[2].handle, MemoryElement::Node(inserted));
}

// ========================================================================
// Collector
// ========================================================================

#[test]
fn test_collect_is_idempotent() {
    let (page, _) = feed_with_expansion();
    let collector = Collector::default();

    let first = collector.collect(&page);
    let second = collector.collect(&page);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_expansion_is_navigable_but_not_interactive() {
    let (page, show) = feed_with_expansion();
    let (mut layer, observed) = layer_over(page);

    for _ in 0..3 {
        tap(&mut layer, ch('j'));
    }
    assert_eq!(layer.focus_index(), 3);
    assert_eq!(layer.page().highlighted(), vec![show]);

    layer.page_mut().take_effects();
    for key in ['r', 't', 'l', 'b'] {
        assert_eq!(
            tap(&mut layer, ch(key)),
            vec![Outcome::Skipped(SkipReason::UnsupportedTarget)]
        );
    }
    assert!(layer.page().clicks().is_empty());
    assert!(observed.interactions().is_empty());
}
