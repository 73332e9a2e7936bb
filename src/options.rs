//! Host hooks: navigation and interaction observers, palette predicate

use std::fmt;

use crate::page::Interaction;

type NavigateHook = Box<dyn FnMut(&str)>;
type InteractionHook = Box<dyn FnMut(Interaction)>;
type PalettePredicate = Box<dyn Fn() -> bool>;

/// Optional callbacks supplied by the host
///
/// ```ignore
/// let options = Options::new()
///     .on_navigate(|url| println!("-> {url}"))
///     .is_command_palette_open(move || palette.get());
/// ```
#[derive(Default)]
pub struct Options {
    on_navigate: Option<NavigateHook>,
    on_interaction: Option<InteractionHook>,
    is_command_palette_open: Option<PalettePredicate>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after every navigation with the absolute URL
    pub fn on_navigate(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_navigate = Some(Box::new(hook));
        self
    }

    /// Called after every successful content interaction
    pub fn on_interaction(mut self, hook: impl FnMut(Interaction) + 'static) -> Self {
        self.on_interaction = Some(Box::new(hook));
        self
    }

    /// Guard predicate: while it returns true, guarded chords are ignored
    pub fn is_command_palette_open(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.is_command_palette_open = Some(Box::new(predicate));
        self
    }

    pub(crate) fn notify_navigate(&mut self, url: &str) {
        if let Some(hook) = self.on_navigate.as_mut() {
            hook(url);
        }
    }

    pub(crate) fn notify_interaction(&mut self, interaction: Interaction) {
        if let Some(hook) = self.on_interaction.as_mut() {
            hook(interaction);
        }
    }

    pub(crate) fn palette_open(&self) -> bool {
        self.is_command_palette_open
            .as_ref()
            .is_some_and(|predicate| predicate())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("on_navigate", &self.on_navigate.is_some())
            .field("on_interaction", &self.on_interaction.is_some())
            .field(
                "is_command_palette_open",
                &self.is_command_palette_open.is_some(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_empty_options_are_inert() {
        let mut options = Options::new();
        options.notify_navigate("https://x.com/home");
        options.notify_interaction(Interaction::Like);
        assert!(!options.palette_open());
    }

    #[test]
    fn test_hooks_receive_values() {
        let urls = Rc::new(RefCell::new(Vec::new()));
        let sink = urls.clone();
        let open = Rc::new(Cell::new(true));
        let flag = open.clone();

        let mut options = Options::new()
            .on_navigate(move |url| sink.borrow_mut().push(url.to_string()))
            .is_command_palette_open(move || flag.get());

        options.notify_navigate("https://x.com/home");
        assert_eq!(*urls.borrow(), vec!["https://x.com/home".to_string()]);
        assert!(options.palette_open());

        open.set(false);
        assert!(!options.palette_open());
    }
}
