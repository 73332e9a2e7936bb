//! The keyboard layer: owns the focus state and wires keys to the dispatcher
//!
//! ```text
//! key event → Keymap (recognizer + guard) → Command → Dispatcher → PageAdapter
//!                                              ↑
//!                          command palette ────┘
//! ```

use crate::collector::Collector;
use crate::commands::{self, CommandEntry};
use crate::config::{HighlightStyle, LayerConfig};
use crate::dispatch::{self, Dispatcher, Outcome};
use crate::focus::{FocusPhase, FocusState};
use crate::keymap::{
    embedded_bindings, key_from_dom, Command, KeyCode, KeyContext, KeyInput, Keymap, TypingState,
};
use crate::location;
use crate::options::Options;
use crate::page::{NavigableElement, PageAdapter};

/// One independent keyboard layer over one page
pub struct KeyboardLayer<P: PageAdapter> {
    page: P,
    keymap: Keymap,
    collector: Collector,
    focus: FocusState,
    typing: TypingState,
    style: HighlightStyle,
    options: Options,
}

impl<P: PageAdapter> KeyboardLayer<P> {
    pub fn new(page: P, keymap: Keymap, config: &LayerConfig, options: Options) -> Self {
        Self {
            page,
            keymap,
            collector: Collector::new(config.expansion_pattern()),
            focus: FocusState::new(),
            typing: TypingState::default(),
            style: config.highlight.clone(),
            options,
        }
    }

    /// Embedded default keymap and default configuration
    pub fn with_defaults(page: P, options: Options) -> Self {
        Self::new(
            page,
            Keymap::with_bindings(embedded_bindings()),
            &LayerConfig::default(),
            options,
        )
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Guard inputs as of now
    pub fn context(&self) -> KeyContext {
        KeyContext {
            overlay_open: self.options.palette_open(),
            active_target: self.page.active_target(),
            composing: self.typing.is_composing(),
        }
    }

    /// Feed one key event; returns the outcome of every command it fired
    pub fn handle_key(&mut self, input: KeyInput) -> Vec<Outcome> {
        let context = self.context();
        let fired = self.keymap.handle_key(input, &context);
        fired
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }

    pub fn key_down(&mut self, key: KeyCode) -> Vec<Outcome> {
        self.handle_key(KeyInput::Down(key))
    }

    pub fn key_up(&mut self, key: KeyCode) -> Vec<Outcome> {
        self.handle_key(KeyInput::Up(key))
    }

    /// Key-down by DOM `KeyboardEvent.key` name; unknown names are ignored
    pub fn dom_key_down(&mut self, key: &str) -> Vec<Outcome> {
        match key_from_dom(key) {
            Some(key) => self.key_down(key),
            None => Vec::new(),
        }
    }

    pub fn dom_key_up(&mut self, key: &str) -> Vec<Outcome> {
        match key_from_dom(key) {
            Some(key) => self.key_up(key),
            None => Vec::new(),
        }
    }

    /// The page lost focus: every held key is released
    pub fn blur(&mut self) {
        self.handle_key(KeyInput::Blur);
    }

    pub fn composition_start(&mut self) {
        self.typing.composition_start();
    }

    pub fn composition_end(&mut self) {
        self.typing.composition_end();
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Run a command directly, bypassing the chord recognizer and guard
    pub fn execute(&mut self, command: Command) -> Outcome {
        Dispatcher {
            page: &mut self.page,
            focus: &mut self.focus,
            collector: &self.collector,
            style: &self.style,
            options: &mut self.options,
        }
        .execute(command)
    }

    /// Registry entries with shortcuts from this layer's keymap
    pub fn commands(&self) -> Vec<CommandEntry> {
        commands::command_entries(&self.keymap)
    }

    /// Registry entries matching a palette query, best first
    pub fn search_commands(&self, query: &str) -> Vec<CommandEntry> {
        let entries = self.commands();
        commands::filter_commands(&entries, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Run a registry entry by id, as a palette would
    pub fn run_command(&mut self, id: &str) -> Option<Outcome> {
        let def = commands::find(id)?;
        Some(self.execute(def.command))
    }

    pub fn focus_next(&mut self) -> Outcome {
        self.execute(Command::FocusNext)
    }

    pub fn focus_previous(&mut self) -> Outcome {
        self.execute(Command::FocusPrevious)
    }

    pub fn clear_focus(&mut self) -> Outcome {
        self.execute(Command::ClearFocus)
    }

    /// Navigate to a root-relative path; returns the absolute URL
    pub fn navigate_to(&mut self, path: &str) -> String {
        dispatch::navigate_to(&mut self.page, &mut self.options, path)
    }

    /// Username from the current URL or the profile link
    pub fn username(&self) -> Option<String> {
        location::resolve_username(&self.page)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn focus_index(&self) -> usize {
        self.focus.index()
    }

    pub fn focus_phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    pub fn is_composing(&self) -> bool {
        self.typing.is_composing()
    }

    /// A fresh collection of the page's focusable elements
    pub fn navigable_elements(&self) -> Vec<NavigableElement<P::Element>> {
        self.collector.collect(&self.page)
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}
