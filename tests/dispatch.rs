//! Action dispatcher tests: navigation, interactions and open

mod common;

use common::{ch, feed_page, feed_with_expansion, layer_over, sequence, tap};
use feedkeys::dispatch::SkipReason;
use feedkeys::page::MemoryElement;
use feedkeys::{Command, Interaction, MemoryPage, Outcome};

fn page_at(url: &str) -> MemoryPage {
    MemoryPage::new(url).unwrap()
}

// ========================================================================
// Navigation
// ========================================================================

#[test]
fn test_fixed_destinations() {
    let cases = [
        ('h', "https://x.com/home"),
        ('e', "https://x.com/explore"),
        ('n', "https://x.com/notifications"),
        ('m', "https://x.com/messages"),
        ('k', "https://x.com/i/grok"),
        ('b', "https://x.com/i/bookmarks"),
    ];

    for (key, expected) in cases {
        let (mut layer, observed) = layer_over(page_at("https://x.com/home"));
        let outcomes = sequence(&mut layer, ch('g'), ch(key));
        assert_eq!(outcomes[0], Outcome::Navigated(expected.to_string()));
        assert_eq!(observed.navigations(), vec![expected.to_string()]);
        assert_eq!(layer.page().url(), expected);
    }
}

#[test]
fn test_profile_from_path() {
    let (mut layer, observed) = layer_over(page_at("https://x.com/openai"));
    sequence(&mut layer, ch('g'), ch('p'));
    assert_eq!(observed.navigations(), vec!["https://x.com/openai".to_string()]);
}

#[test]
fn test_lists_and_communities_from_path() {
    let (mut layer, observed) = layer_over(page_at("https://x.com/openai/status/42"));
    sequence(&mut layer, ch('g'), ch('l'));
    assert_eq!(
        observed.navigations(),
        vec!["https://x.com/openai/lists".to_string()]
    );

    let (mut layer, observed) = layer_over(page_at("https://x.com/openai"));
    sequence(&mut layer, ch('g'), ch('c'));
    assert_eq!(
        observed.navigations(),
        vec!["https://x.com/openai/communities".to_string()]
    );
}

#[test]
fn test_profile_falls_back_to_profile_link() {
    let mut page = page_at("https://x.com/home");
    page.set_profile_link(Some("/jack"));
    let (mut layer, observed) = layer_over(page);

    sequence(&mut layer, ch('g'), ch('p'));
    assert_eq!(observed.navigations(), vec!["https://x.com/jack".to_string()]);
}

#[test]
fn test_profile_without_any_username_is_silent() {
    let (mut layer, observed) = layer_over(page_at("https://x.com/home"));

    assert_eq!(
        sequence(&mut layer, ch('g'), ch('p')),
        vec![Outcome::Skipped(SkipReason::NoUsername)]
    );
    assert!(observed.navigations().is_empty());
    assert!(layer.page().navigations().is_empty());
}

#[test]
fn test_reserved_segments_are_not_usernames() {
    for url in ["https://x.com/explore", "https://x.com/i/grok"] {
        let (mut layer, observed) = layer_over(page_at(url));
        layer.execute(Command::GoLists);
        assert!(observed.navigations().is_empty(), "{}", url);
    }
}

#[test]
fn test_navigate_helper_reports_to_observer() {
    let (mut layer, observed) = layer_over(page_at("https://x.com/home"));
    assert_eq!(layer.navigate_to("/settings"), "https://x.com/settings");
    assert_eq!(observed.navigations(), vec!["https://x.com/settings".to_string()]);
}

// ========================================================================
// Interactions
// ========================================================================

#[test]
fn test_each_interaction_clicks_its_control() {
    let cases = [
        ('r', Interaction::Reply),
        ('t', Interaction::Retweet),
        ('l', Interaction::Like),
        ('b', Interaction::Bookmark),
    ];

    for (key, interaction) in cases {
        let (mut layer, observed) = layer_over(feed_page(3));
        let second = layer.page().node_ids()[1];
        tap(&mut layer, ch('j'));

        assert_eq!(tap(&mut layer, ch(key)), vec![Outcome::Interacted(interaction)]);
        assert_eq!(
            layer.page().clicks(),
            vec![MemoryElement::Control(second, interaction)]
        );
        assert_eq!(observed.interactions(), vec![interaction]);
    }
}

#[test]
fn test_interaction_targets_first_item_before_any_move() {
    let (mut layer, observed) = layer_over(feed_page(2));
    let first = layer.page().node_ids()[0];

    tap(&mut layer, ch('l'));
    assert_eq!(
        layer.page().clicks(),
        vec![MemoryElement::Control(first, Interaction::Like)]
    );
    assert_eq!(observed.interactions(), vec![Interaction::Like]);
}

#[test]
fn test_missing_control_is_silent() {
    let mut page = MemoryPage::default();
    page.push_content_with(Some("/a/status/1"), &[Interaction::Reply]);
    let (mut layer, observed) = layer_over(page);

    assert_eq!(
        tap(&mut layer, ch('l')),
        vec![Outcome::Skipped(SkipReason::MissingControl)]
    );
    assert!(observed.interactions().is_empty());
}

#[test]
fn test_interaction_on_empty_feed_is_silent() {
    let (mut layer, observed) = layer_over(feed_page(0));
    assert_eq!(
        tap(&mut layer, ch('r')),
        vec![Outcome::Skipped(SkipReason::EmptySequence)]
    );
    assert!(observed.interactions().is_empty());
}

// ========================================================================
// Open
// ========================================================================

#[test]
fn test_open_navigates_to_permalink() {
    let (mut layer, observed) = layer_over(feed_page(3));
    tap(&mut layer, ch('j'));

    assert_eq!(
        tap(&mut layer, ch('o')),
        vec![Outcome::Navigated("https://x.com/user1/status/101".to_string())]
    );
    assert_eq!(
        observed.navigations(),
        vec!["https://x.com/user1/status/101".to_string()]
    );
}

#[test]
fn test_open_accepts_absolute_permalink() {
    let mut page = MemoryPage::default();
    page.push_content("https://x.com/abs/status/7");
    let (mut layer, _) = layer_over(page);

    assert_eq!(
        layer.execute(Command::Open),
        Outcome::Navigated("https://x.com/abs/status/7".to_string())
    );
}

#[test]
fn test_open_on_expansion_clicks_button() {
    let (page, show) = feed_with_expansion();
    let (mut layer, observed) = layer_over(page);
    for _ in 0..3 {
        tap(&mut layer, ch('j'));
    }

    assert_eq!(tap(&mut layer, ch('o')), vec![Outcome::Expanded]);
    assert_eq!(layer.page().clicks(), vec![MemoryElement::Button(show)]);
    assert!(observed.navigations().is_empty());
    assert!(observed.interactions().is_empty());
}

#[test]
fn test_open_without_permalink_is_silent() {
    let mut page = MemoryPage::default();
    page.push_content_with(None, &Interaction::ALL);
    let (mut layer, observed) = layer_over(page);

    assert_eq!(
        layer.execute(Command::Open),
        Outcome::Skipped(SkipReason::MissingControl)
    );
    assert!(observed.navigations().is_empty());
}

// ========================================================================
// Palette path
// ========================================================================

#[test]
fn test_palette_entries_run_the_same_actions() {
    let (mut layer, observed) = layer_over(feed_page(3));
    let ids: Vec<&str> = layer.commands().iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 17);

    assert_eq!(layer.run_command("tweet-next"), Some(Outcome::Focused(1)));
    assert_eq!(
        layer.run_command("tweet-like"),
        Some(Outcome::Interacted(Interaction::Like))
    );
    assert_eq!(layer.run_command("tweet-unfocus"), Some(Outcome::Cleared));
    assert_eq!(observed.interactions(), vec![Interaction::Like]);
}

#[test]
fn test_palette_search_runs_the_top_hit() {
    let (mut layer, observed) = layer_over(feed_page(2));

    let hits = layer.search_commands("bookm");
    let ids: Vec<&str> = hits.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"nav-bookmarks"));
    assert!(ids.contains(&"tweet-bookmark"));

    assert!(layer.search_commands("qqq").is_empty());
    assert_eq!(layer.search_commands("").len(), 17);

    let like = layer.search_commands("like");
    assert_eq!(like[0].id, "tweet-like");
    assert_eq!(
        layer.run_command(like[0].id),
        Some(Outcome::Interacted(Interaction::Like))
    );
    assert_eq!(observed.interactions(), vec![Interaction::Like]);
}
