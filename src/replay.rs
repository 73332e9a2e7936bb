//! Scripted key sessions against an in-memory feed
//!
//! A script describes a page and a list of steps. Each step is a map with a
//! single key:
//!
//! ```yaml
//! url: https://x.com/home
//! profile_link: /jack
//! elements:
//!   - content: /jack/status/1
//!   - content: /jack/status/2
//!     controls: [like, reply]
//!   - expansion: Show 3 posts
//! steps:
//!   - press: j
//!   - press: g h
//!   - down: meta
//!   - press: l
//!   - up: meta
//!   - target: input
//!   - compose: true
//!   - palette: true
//!   - insert: { at: 0, permalink: /new/status/9 }
//!   - remove: 1
//!   - run: tweet-like
//!   - blur: true
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;

use crate::config::LayerConfig;
use crate::dispatch::Outcome;
use crate::focus::FocusPhase;
use crate::keymap::{parse_key_string, ActiveTarget, KeyCode, KeyInput, Keymap, KeymapError};
use crate::layer::KeyboardLayer;
use crate::options::Options;
use crate::page::{Interaction, MemoryPage, NodeId};

/// Errors from loading or running a replay script
#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    ParseError(String),
    InvalidUrl(String),
    InvalidKey(KeymapError),
    /// Step number (1-based) and what is wrong with it
    InvalidStep(usize, String),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::ParseError(e) => write!(f, "Parse error: {}", e),
            ReplayError::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
            ReplayError::InvalidKey(e) => write!(f, "{}", e),
            ReplayError::InvalidStep(n, e) => write!(f, "Step {}: {}", n, e),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

/// Page setup and steps, as written in YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub profile_link: Option<String>,
    #[serde(default)]
    pub active_target: ActiveTarget,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

fn default_url() -> String {
    "https://x.com/home".to_string()
}

/// One page element; exactly one of `content`, `expansion` or `cell` is set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementConfig {
    /// Permalink of a content item
    pub content: Option<String>,
    /// Interaction controls of the content item (all four when omitted)
    pub controls: Option<Vec<Interaction>>,
    /// Button text of an expansion cell
    pub expansion: Option<String>,
    /// Button text of any other cell (empty for a cell without a button)
    pub cell: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsertConfig {
    pub at: usize,
    pub permalink: String,
}

/// One step as written in YAML; exactly one field is set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepConfig {
    pub down: Option<String>,
    pub up: Option<String>,
    pub press: Option<String>,
    pub blur: Option<bool>,
    pub compose: Option<bool>,
    pub palette: Option<bool>,
    pub target: Option<ActiveTarget>,
    pub insert: Option<InsertConfig>,
    pub append: Option<ElementConfig>,
    pub remove: Option<usize>,
    pub url: Option<String>,
    pub run: Option<String>,
}

/// A validated step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Down(KeyCode),
    Up(KeyCode),
    /// Press every key in order, then release in reverse order
    Press(Vec<KeyCode>),
    Blur,
    CompositionStart,
    CompositionEnd,
    Palette(bool),
    Target(ActiveTarget),
    Insert { at: usize, permalink: String },
    Append(PageElement),
    /// Remove the node at this document position
    Remove(usize),
    Url(String),
    Run(String),
}

/// A validated page element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageElement {
    Content {
        permalink: Option<String>,
        controls: Vec<Interaction>,
    },
    Expansion(String),
    Cell(Option<String>),
}

impl ElementConfig {
    fn to_element(&self) -> Result<PageElement, String> {
        match (&self.content, &self.expansion, &self.cell) {
            (Some(permalink), None, None) => Ok(PageElement::Content {
                permalink: (!permalink.is_empty()).then(|| permalink.clone()),
                controls: self
                    .controls
                    .clone()
                    .unwrap_or_else(|| Interaction::ALL.to_vec()),
            }),
            (None, Some(text), None) if self.controls.is_none() => {
                Ok(PageElement::Expansion(text.clone()))
            }
            (None, None, Some(text)) if self.controls.is_none() => Ok(PageElement::Cell(
                (!text.is_empty()).then(|| text.clone()),
            )),
            _ => Err("element needs exactly one of content, expansion or cell".to_string()),
        }
    }
}

fn single_key(text: &str) -> Result<KeyCode, ReplayError> {
    let chord = parse_key_string(text).map_err(ReplayError::InvalidKey)?;
    match chord.keys() {
        [key] => Ok(*key),
        _ => Err(ReplayError::InvalidKey(KeymapError::InvalidKey(format!(
            "Expected a single key: {}",
            text
        )))),
    }
}

impl StepConfig {
    /// Validate; `number` is used in error messages
    pub fn to_step(&self, number: usize) -> Result<Step, ReplayError> {
        let mut steps = Vec::new();

        if let Some(key) = &self.down {
            steps.push(Step::Down(single_key(key)?));
        }
        if let Some(key) = &self.up {
            steps.push(Step::Up(single_key(key)?));
        }
        if let Some(keys) = &self.press {
            let chord = parse_key_string(keys).map_err(ReplayError::InvalidKey)?;
            steps.push(Step::Press(chord.keys().to_vec()));
        }
        if let Some(blur) = self.blur {
            if blur {
                steps.push(Step::Blur);
            }
        }
        if let Some(start) = self.compose {
            steps.push(if start {
                Step::CompositionStart
            } else {
                Step::CompositionEnd
            });
        }
        if let Some(open) = self.palette {
            steps.push(Step::Palette(open));
        }
        if let Some(target) = self.target {
            steps.push(Step::Target(target));
        }
        if let Some(insert) = &self.insert {
            steps.push(Step::Insert {
                at: insert.at,
                permalink: insert.permalink.clone(),
            });
        }
        if let Some(element) = &self.append {
            let element = element
                .to_element()
                .map_err(|e| ReplayError::InvalidStep(number, e))?;
            steps.push(Step::Append(element));
        }
        if let Some(index) = self.remove {
            steps.push(Step::Remove(index));
        }
        if let Some(url) = &self.url {
            steps.push(Step::Url(url.clone()));
        }
        if let Some(id) = &self.run {
            steps.push(Step::Run(id.clone()));
        }

        match steps.len() {
            1 => Ok(steps.remove(0)),
            0 => Err(ReplayError::InvalidStep(number, "empty step".to_string())),
            _ => Err(ReplayError::InvalidStep(
                number,
                "a step must do exactly one thing".to_string(),
            )),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Down(key) => write!(f, "down {}", key.label()),
            Step::Up(key) => write!(f, "up {}", key.label()),
            Step::Press(keys) => {
                let labels: Vec<String> = keys.iter().map(|k| k.label()).collect();
                write!(f, "press {}", labels.join(" + "))
            }
            Step::Blur => f.write_str("blur"),
            Step::CompositionStart => f.write_str("composition start"),
            Step::CompositionEnd => f.write_str("composition end"),
            Step::Palette(open) => {
                write!(f, "palette {}", if *open { "open" } else { "closed" })
            }
            Step::Target(target) => write!(f, "focus {:?}", target),
            Step::Insert { at, permalink } => write!(f, "insert {} at {}", permalink, at),
            Step::Append(element) => write!(f, "append {:?}", element),
            Step::Remove(index) => write!(f, "remove {}", index),
            Step::Url(url) => write!(f, "url {}", url),
            Step::Run(id) => write!(f, "run {}", id),
        }
    }
}

impl Script {
    pub fn parse(content: &str) -> Result<Self, ReplayError> {
        serde_yaml::from_str(content).map_err(|e| ReplayError::ParseError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Build the initial page
    pub fn page(&self) -> Result<MemoryPage, ReplayError> {
        let mut page = MemoryPage::new(&self.url)
            .map_err(|e| ReplayError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        page.set_profile_link(self.profile_link.as_deref());
        page.set_active_target(self.active_target);

        for (i, element) in self.elements.iter().enumerate() {
            let element = element
                .to_element()
                .map_err(|e| ReplayError::ParseError(format!("element {}: {}", i + 1, e)))?;
            append_element(&mut page, &element);
        }
        Ok(page)
    }

    /// Validated steps
    pub fn steps(&self) -> Result<Vec<Step>, ReplayError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| step.to_step(i + 1))
            .collect()
    }
}

fn append_element(page: &mut MemoryPage, element: &PageElement) -> NodeId {
    match element {
        PageElement::Content {
            permalink,
            controls,
        } => page.push_content_with(permalink.as_deref(), controls),
        PageElement::Expansion(text) => page.push_expansion(text),
        PageElement::Cell(text) => page.push_cell(text.as_deref()),
    }
}

/// What one step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub outcomes: Vec<Outcome>,
}

/// Result of a whole replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub focus_index: usize,
    pub focus_phase: FocusPhase,
    /// URLs reported through the navigation hook
    pub navigations: Vec<String>,
    /// Interaction ids reported through the interaction hook
    pub interactions: Vec<Interaction>,
    pub final_url: String,
}

/// Run a script through a fresh layer
pub fn run(
    script: &Script,
    keymap: Keymap,
    config: &LayerConfig,
) -> Result<ReplayReport, ReplayError> {
    let steps = script.steps()?;
    let page = script.page()?;

    let palette_open = Rc::new(Cell::new(false));
    let navigations = Rc::new(RefCell::new(Vec::new()));
    let interactions = Rc::new(RefCell::new(Vec::new()));

    let options = {
        let palette_open = palette_open.clone();
        let navigations = navigations.clone();
        let interactions = interactions.clone();
        Options::new()
            .on_navigate(move |url| navigations.borrow_mut().push(url.to_string()))
            .on_interaction(move |interaction| interactions.borrow_mut().push(interaction))
            .is_command_palette_open(move || palette_open.get())
    };

    let mut layer = KeyboardLayer::new(page, keymap, config, options);
    let mut reports = Vec::with_capacity(steps.len());

    for (i, step) in steps.into_iter().enumerate() {
        let outcomes = apply_step(&mut layer, &palette_open, &step)
            .map_err(|e| ReplayError::InvalidStep(i + 1, e))?;
        tracing::debug!("Replay step {}: {} -> {:?}", i + 1, step, outcomes);
        reports.push(StepReport { step, outcomes });
    }

    let navigations = navigations.borrow().clone();
    let interactions = interactions.borrow().clone();
    Ok(ReplayReport {
        steps: reports,
        focus_index: layer.focus_index(),
        focus_phase: layer.focus_phase(),
        navigations,
        interactions,
        final_url: layer.page().url(),
    })
}

fn apply_step(
    layer: &mut KeyboardLayer<MemoryPage>,
    palette_open: &Cell<bool>,
    step: &Step,
) -> Result<Vec<Outcome>, String> {
    let outcomes = match step {
        Step::Down(key) => layer.handle_key(KeyInput::Down(*key)),
        Step::Up(key) => layer.handle_key(KeyInput::Up(*key)),
        Step::Press(keys) => {
            let mut outcomes = Vec::new();
            for key in keys {
                outcomes.extend(layer.handle_key(KeyInput::Down(*key)));
            }
            for key in keys.iter().rev() {
                outcomes.extend(layer.handle_key(KeyInput::Up(*key)));
            }
            outcomes
        }
        Step::Blur => layer.handle_key(KeyInput::Blur),
        Step::CompositionStart => {
            layer.composition_start();
            Vec::new()
        }
        Step::CompositionEnd => {
            layer.composition_end();
            Vec::new()
        }
        Step::Palette(open) => {
            palette_open.set(*open);
            Vec::new()
        }
        Step::Target(target) => {
            layer.page_mut().set_active_target(*target);
            Vec::new()
        }
        Step::Insert { at, permalink } => {
            layer.page_mut().insert_content(*at, permalink);
            Vec::new()
        }
        Step::Append(element) => {
            append_element(layer.page_mut(), element);
            Vec::new()
        }
        Step::Remove(index) => {
            let page = layer.page_mut();
            let id = page
                .node_ids()
                .get(*index)
                .copied()
                .ok_or_else(|| format!("no element at position {}", index))?;
            page.remove(id);
            Vec::new()
        }
        Step::Url(url) => {
            layer
                .page_mut()
                .set_url(url)
                .map_err(|e| format!("invalid URL {}: {}", url, e))?;
            Vec::new()
        }
        Step::Run(id) => {
            let outcome = layer
                .run_command(id)
                .ok_or_else(|| format!("unknown command id {}", id))?;
            vec![outcome]
        }
    };
    Ok(outcomes)
}
