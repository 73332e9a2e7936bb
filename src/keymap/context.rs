//! Typing-context guard and conditional keybindings
//!
//! Feed commands must stay out of the way while the user is writing: in a
//! text field, through an IME composition, or inside an overlay such as the
//! command palette. [`KeyContext`] captures that state once per key event and
//! [`Condition`] lets bindings opt in or out of it.

use serde::{Deserialize, Serialize};

/// What currently holds input focus on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTarget {
    /// Nothing focused (document body)
    #[default]
    None,
    /// `<input>`
    Input,
    /// `<textarea>`
    TextArea,
    /// An element with `contenteditable="true"`
    ContentEditable,
    /// Any other focused element (buttons, links, ...)
    Other,
}

impl ActiveTarget {
    /// Classify a focused element by tag name and its `contenteditable` attribute
    ///
    /// Only a literal `contenteditable="true"` is text entry; inherited or
    /// `plaintext-only` editability is not.
    pub fn from_element(tag_name: &str, contenteditable: Option<&str>) -> Self {
        match tag_name.to_ascii_uppercase().as_str() {
            "INPUT" => ActiveTarget::Input,
            "TEXTAREA" => ActiveTarget::TextArea,
            "BODY" | "HTML" => ActiveTarget::None,
            _ if contenteditable == Some("true") => ActiveTarget::ContentEditable,
            _ => ActiveTarget::Other,
        }
    }

    /// Whether key presses on this target are text entry
    pub fn is_text_entry(self) -> bool {
        matches!(
            self,
            ActiveTarget::Input | ActiveTarget::TextArea | ActiveTarget::ContentEditable
        )
    }
}

/// IME composition flag, toggled by compositionstart / compositionend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingState {
    composing: bool,
}

impl TypingState {
    pub fn composition_start(&mut self) {
        self.composing = true;
    }

    pub fn composition_end(&mut self) {
        self.composing = false;
    }

    pub fn is_composing(self) -> bool {
        self.composing
    }
}

/// Context captured from the page for keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Whether an external overlay (command palette) is open
    pub overlay_open: bool,
    /// The element holding input focus
    pub active_target: ActiveTarget,
    /// Whether an IME composition is in progress
    pub composing: bool,
}

impl KeyContext {
    /// Context for a page with nothing focused and no overlay
    pub fn idle() -> Self {
        Self::default()
    }

    /// Context for the user typing into a text field
    pub fn typing_in(target: ActiveTarget) -> Self {
        Self {
            active_target: target,
            ..Self::default()
        }
    }

    /// Whether guarded commands must be suppressed
    pub fn should_suppress(&self) -> bool {
        self.overlay_open || self.active_target.is_text_entry() || self.composing
    }
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Binding active only outside a typing context
    NotTyping,
    /// Binding active only inside a typing context
    Typing,
    /// Binding active only while an overlay is open
    OverlayOpen,
    /// Binding active only while no overlay is open
    OverlayClosed,
    /// Binding active only during IME composition
    Composing,
    /// Binding active only outside IME composition
    NotComposing,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::NotTyping => !ctx.should_suppress(),
            Condition::Typing => ctx.should_suppress(),
            Condition::OverlayOpen => ctx.overlay_open,
            Condition::OverlayClosed => !ctx.overlay_open,
            Condition::Composing => ctx.composing,
            Condition::NotComposing => !ctx.composing,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
