//! Live browser page and JavaScript bindings
//!
//! Build for `wasm32-unknown-unknown` with the `web` feature. The host page
//! forwards `keydown`, `keyup`, `blur`, `compositionstart` and
//! `compositionend` events to a [`WebKeyboardLayer`].
//!
//! ```javascript
//! import init, { WebKeyboardLayer } from 'feedkeys';
//!
//! await init();
//! const layer = new WebKeyboardLayer(null);
//! layer.setOnNavigate((url) => console.log('navigated', url));
//! document.addEventListener('keydown', (e) => layer.keyDown(e.key));
//! document.addEventListener('keyup', (e) => layer.keyUp(e.key));
//! window.addEventListener('blur', () => layer.blur());
//! ```

use std::cmp::Ordering;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use super::{Interaction, Location, PageAdapter};
use crate::config::{HighlightStyle, LayerConfig, PageSelectors};
use crate::keymap::{embedded_bindings, ActiveTarget, Keymap};
use crate::layer::KeyboardLayer;
use crate::options::Options;

/// The browser document, addressed through configurable selectors
pub struct DomPage {
    window: Window,
    document: Document,
    selectors: PageSelectors,
}

impl DomPage {
    /// The page of the current global window, if there is one
    pub fn current(selectors: PageSelectors) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            selectors,
        })
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => node_list_elements(&list),
            Err(e) => {
                tracing::warn!("Invalid selector {:?}: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn query_within(&self, element: &Element, selector: &str) -> Option<Element> {
        element.query_selector(selector).ok().flatten()
    }
}

fn node_list_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl PageAdapter for DomPage {
    type Element = Element;

    fn content_items(&self) -> Vec<Element> {
        self.query_all(&self.selectors.content_item)
    }

    fn cells(&self) -> Vec<Element> {
        self.query_all(&self.selectors.cell)
    }

    fn primary_button(&self, cell: &Element) -> Option<Element> {
        self.query_within(cell, &self.selectors.cell_button)
    }

    fn text_content(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn compare_document_position(&self, a: &Element, b: &Element) -> Ordering {
        let a: &Node = a.as_ref();
        let position = a.compare_document_position(b.as_ref());
        if position & Node::DOCUMENT_POSITION_FOLLOWING != 0 {
            Ordering::Less
        } else if position & Node::DOCUMENT_POSITION_PRECEDING != 0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn find_interaction_control(&self, item: &Element, interaction: Interaction) -> Option<Element> {
        self.query_within(item, self.selectors.control(interaction))
    }

    fn find_permalink(&self, item: &Element) -> Option<String> {
        let link = self.query_within(item, &self.selectors.permalink)?;
        match link.dyn_ref::<HtmlAnchorElement>() {
            Some(anchor) => Some(anchor.href()),
            None => link.get_attribute("href"),
        }
    }

    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            origin: location.origin().unwrap_or_default(),
            pathname: location.pathname().unwrap_or_default(),
        }
    }

    fn profile_link_href(&self) -> Option<String> {
        let link = self
            .document
            .query_selector(&self.selectors.profile_link)
            .ok()
            .flatten()?;
        link.dyn_ref::<HtmlAnchorElement>()?;
        link.get_attribute("href")
    }

    fn active_target(&self) -> ActiveTarget {
        let Some(active) = self.document.active_element() else {
            return ActiveTarget::None;
        };
        ActiveTarget::from_element(
            &active.tag_name(),
            active.get_attribute("contenteditable").as_deref(),
        )
    }

    fn apply_highlight(&mut self, element: &Element, style: &HighlightStyle) {
        let Some(el) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let css = el.style();
        for (property, value) in style.properties() {
            if let Err(e) = css.set_property(property, value) {
                tracing::debug!("Could not set {}: {:?}", property, e);
            }
        }
    }

    fn clear_highlight(&mut self, element: &Element) {
        let Some(el) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let css = el.style();
        for (property, _) in HighlightStyle::default().properties() {
            let _ = css.remove_property(property);
        }
    }

    fn scroll_into_view(&mut self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn click(&mut self, element: &Element) {
        if let Some(el) = element.dyn_ref::<HtmlElement>() {
            el.click();
        }
    }

    fn assign_location(&mut self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            tracing::warn!("Navigation to {} failed: {:?}", url, e);
        }
    }
}

/// JavaScript-facing keyboard layer over the current document
#[wasm_bindgen]
pub struct WebKeyboardLayer {
    inner: KeyboardLayer<DomPage>,
}

#[wasm_bindgen]
impl WebKeyboardLayer {
    /// Create a layer; `config` is an optional JSON string of layer settings
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WebKeyboardLayer, JsValue> {
        let config = match config.as_deref() {
            Some(json) => LayerConfig::from_json(json)
                .map_err(|e| JsValue::from_str(&format!("Invalid layer config: {}", e)))?,
            None => LayerConfig::default(),
        };
        let page = DomPage::current(config.selectors.clone())
            .ok_or_else(|| JsValue::from_str("No browser document available"))?;
        let keymap = Keymap::with_bindings(embedded_bindings());

        Ok(Self {
            inner: KeyboardLayer::new(page, keymap, &config, Options::new()),
        })
    }

    /// `onNavigate(url)`, called after every navigation
    #[wasm_bindgen(js_name = "setOnNavigate")]
    pub fn set_on_navigate(&mut self, callback: js_sys::Function) {
        self.rebuild_options(|options| {
            options.on_navigate(move |url| {
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(url));
            })
        });
    }

    /// `onInteraction(id)`, called after every successful interaction
    #[wasm_bindgen(js_name = "setOnInteraction")]
    pub fn set_on_interaction(&mut self, callback: js_sys::Function) {
        self.rebuild_options(|options| {
            options.on_interaction(move |interaction| {
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(interaction.id()));
            })
        });
    }

    /// `isCommandPaletteOpen()`, consulted before guarded chords
    #[wasm_bindgen(js_name = "setIsCommandPaletteOpen")]
    pub fn set_is_command_palette_open(&mut self, predicate: js_sys::Function) {
        self.rebuild_options(|options| {
            options.is_command_palette_open(move || {
                predicate
                    .call0(&JsValue::NULL)
                    .map(|v| v.is_truthy())
                    .unwrap_or(false)
            })
        });
    }

    /// Returns true when the key fired at least one command
    #[wasm_bindgen(js_name = "keyDown")]
    pub fn key_down(&mut self, key: &str) -> bool {
        !self.inner.dom_key_down(key).is_empty()
    }

    #[wasm_bindgen(js_name = "keyUp")]
    pub fn key_up(&mut self, key: &str) {
        self.inner.dom_key_up(key);
    }

    pub fn blur(&mut self) {
        self.inner.blur();
    }

    #[wasm_bindgen(js_name = "compositionStart")]
    pub fn composition_start(&mut self) {
        self.inner.composition_start();
    }

    #[wasm_bindgen(js_name = "compositionEnd")]
    pub fn composition_end(&mut self) {
        self.inner.composition_end();
    }

    #[wasm_bindgen(js_name = "focusNext")]
    pub fn focus_next(&mut self) {
        self.inner.focus_next();
    }

    #[wasm_bindgen(js_name = "focusPrevious")]
    pub fn focus_previous(&mut self) {
        self.inner.focus_previous();
    }

    #[wasm_bindgen(js_name = "clearFocus")]
    pub fn clear_focus(&mut self) {
        self.inner.clear_focus();
    }

    #[wasm_bindgen(getter, js_name = "focusIndex")]
    pub fn focus_index(&self) -> usize {
        self.inner.focus_index()
    }

    /// The command table as a JSON array
    pub fn commands(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.commands())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Command table entries matching a palette query, best first, as JSON
    #[wasm_bindgen(js_name = "filterCommands")]
    pub fn filter_commands(&self, query: &str) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.search_commands(query))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Run a command table entry by id; returns false for unknown ids
    #[wasm_bindgen(js_name = "runCommand")]
    pub fn run_command(&mut self, id: &str) -> bool {
        self.inner.run_command(id).is_some()
    }

    #[wasm_bindgen(js_name = "navigateTo")]
    pub fn navigate_to(&mut self, path: &str) -> String {
        self.inner.navigate_to(path)
    }

    pub fn username(&self) -> Option<String> {
        self.inner.username()
    }
}

impl WebKeyboardLayer {
    fn rebuild_options(&mut self, update: impl FnOnce(Options) -> Options) {
        let options = std::mem::take(self.inner.options_mut());
        *self.inner.options_mut() = update(options);
    }
}
