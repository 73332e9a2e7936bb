//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use feedkeys::keymap::{default_bindings, KeyCode, KeyInput};
use feedkeys::page::NodeId;
use feedkeys::{Interaction, KeyboardLayer, Keymap, LayerConfig, MemoryPage, Options, Outcome};

/// Everything the host hooks observed
#[derive(Clone, Default)]
pub struct Observed {
    pub navigations: Rc<RefCell<Vec<String>>>,
    pub interactions: Rc<RefCell<Vec<Interaction>>>,
    pub palette_open: Rc<Cell<bool>>,
}

impl Observed {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        self.interactions.borrow().clone()
    }

    /// Options wired to this observer
    pub fn options(&self) -> Options {
        let navigations = self.navigations.clone();
        let interactions = self.interactions.clone();
        let palette_open = self.palette_open.clone();
        Options::new()
            .on_navigate(move |url| navigations.borrow_mut().push(url.to_string()))
            .on_interaction(move |interaction| interactions.borrow_mut().push(interaction))
            .is_command_palette_open(move || palette_open.get())
    }
}

/// A page at `https://x.com/home` with `n` content items
pub fn feed_page(n: usize) -> MemoryPage {
    let mut page = MemoryPage::default();
    for i in 0..n {
        page.push_content(&format!("/user{}/status/{}", i, 100 + i));
    }
    page
}

/// Three content items followed by a "Show 3 posts" control
pub fn feed_with_expansion() -> (MemoryPage, NodeId) {
    let mut page = feed_page(3);
    let show = page.push_expansion("Show 3 posts");
    (page, show)
}

/// A layer over `page` with the hard-coded default bindings
pub fn layer_over(page: MemoryPage) -> (KeyboardLayer<MemoryPage>, Observed) {
    let observed = Observed::default();
    let layer = KeyboardLayer::new(
        page,
        Keymap::with_bindings(default_bindings()),
        &LayerConfig::default(),
        observed.options(),
    );
    (layer, observed)
}

pub fn ch(c: char) -> KeyCode {
    KeyCode::char(c)
}

/// Press and release one key; returns the outcomes of the press
pub fn tap(layer: &mut KeyboardLayer<MemoryPage>, key: KeyCode) -> Vec<Outcome> {
    let outcomes = layer.handle_key(KeyInput::Down(key));
    layer.handle_key(KeyInput::Up(key));
    outcomes
}

/// Hold `leader`, tap `follower`, release `leader`
pub fn sequence(
    layer: &mut KeyboardLayer<MemoryPage>,
    leader: KeyCode,
    follower: KeyCode,
) -> Vec<Outcome> {
    let mut outcomes = layer.handle_key(KeyInput::Down(leader));
    outcomes.extend(layer.handle_key(KeyInput::Down(follower)));
    outcomes.extend(layer.handle_key(KeyInput::Up(follower)));
    outcomes.extend(layer.handle_key(KeyInput::Up(leader)));
    outcomes
}

/// Tap `key` while `modifier` is held
pub fn with_modifier(
    layer: &mut KeyboardLayer<MemoryPage>,
    modifier: KeyCode,
    key: KeyCode,
) -> Vec<Outcome> {
    let mut outcomes = layer.handle_key(KeyInput::Down(modifier));
    outcomes.extend(layer.handle_key(KeyInput::Down(key)));
    outcomes.extend(layer.handle_key(KeyInput::Up(key)));
    outcomes.extend(layer.handle_key(KeyInput::Up(modifier)));
    outcomes
}
