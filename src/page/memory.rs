//! In-memory page used by tests, benchmarks and the replay command
//!
//! Nodes are kept in document order. Every effect the layer performs is
//! appended to an effect log so callers can assert on it afterwards.

use std::cmp::Ordering;
use std::collections::HashMap;

use url::Url;

use super::{Interaction, Location, PageAdapter};
use crate::config::HighlightStyle;
use crate::keymap::ActiveTarget;

/// Stable identity of a node for the lifetime of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Handle to anything the layer can address on a [`MemoryPage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryElement {
    /// A content item or a cell
    Node(NodeId),
    /// The first button of a cell
    Button(NodeId),
    /// An interaction control inside a content item
    Control(NodeId, Interaction),
}

impl MemoryElement {
    pub fn node(self) -> NodeId {
        match self {
            MemoryElement::Node(id) | MemoryElement::Button(id) | MemoryElement::Control(id, _) => {
                id
            }
        }
    }
}

/// Something the layer did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    Highlighted(NodeId),
    Unhighlighted(NodeId),
    Scrolled(NodeId),
    Clicked(MemoryElement),
    Navigated(String),
}

#[derive(Debug, Clone)]
enum NodeKind {
    Content {
        permalink: Option<String>,
        controls: Vec<Interaction>,
    },
    Cell {
        button_text: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct MemoryNode {
    id: NodeId,
    kind: NodeKind,
    highlight: Option<HighlightStyle>,
}

/// A scripted feed page
#[derive(Debug, Clone)]
pub struct MemoryPage {
    origin: String,
    pathname: String,
    profile_link: Option<String>,
    active_target: ActiveTarget,
    /// Document order
    nodes: Vec<MemoryNode>,
    positions: HashMap<NodeId, usize>,
    next_id: u32,
    effects: Vec<PageEffect>,
}

impl MemoryPage {
    /// Create an empty page at the given absolute URL
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(url)?;
        Ok(Self {
            origin: parsed.origin().ascii_serialization(),
            pathname: parsed.path().to_string(),
            profile_link: None,
            active_target: ActiveTarget::None,
            nodes: Vec::new(),
            positions: HashMap::new(),
            next_id: 0,
            effects: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Building the page
    // ------------------------------------------------------------------

    /// Append a content item with every interaction control
    pub fn push_content(&mut self, permalink: &str) -> NodeId {
        self.push_content_with(Some(permalink), &Interaction::ALL)
    }

    /// Append a content item with only some controls
    pub fn push_content_with(
        &mut self,
        permalink: Option<&str>,
        controls: &[Interaction],
    ) -> NodeId {
        let kind = NodeKind::Content {
            permalink: permalink.map(str::to_string),
            controls: controls.to_vec(),
        };
        self.insert_node(self.nodes.len(), kind)
    }

    /// Insert a content item at a document position
    pub fn insert_content(&mut self, at: usize, permalink: &str) -> NodeId {
        let kind = NodeKind::Content {
            permalink: Some(permalink.to_string()),
            controls: Interaction::ALL.to_vec(),
        };
        self.insert_node(at.min(self.nodes.len()), kind)
    }

    /// Append a cell whose button reads e.g. "Show 3 posts"
    pub fn push_expansion(&mut self, button_text: &str) -> NodeId {
        self.push_cell(Some(button_text))
    }

    /// Append a feed cell, with or without a button
    pub fn push_cell(&mut self, button_text: Option<&str>) -> NodeId {
        let kind = NodeKind::Cell {
            button_text: button_text.map(str::to_string),
        };
        self.insert_node(self.nodes.len(), kind)
    }

    /// Remove a node; returns false if it was not on the page
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(&idx) = self.positions.get(&id) else {
            return false;
        };
        self.nodes.remove(idx);
        self.reindex();
        true
    }

    /// Remove every node
    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
        self.positions.clear();
    }

    pub fn set_url(&mut self, url: &str) -> Result<(), url::ParseError> {
        let parsed = Url::parse(url)?;
        self.origin = parsed.origin().ascii_serialization();
        self.pathname = parsed.path().to_string();
        Ok(())
    }

    pub fn set_profile_link(&mut self, href: Option<&str>) {
        self.profile_link = href.map(str::to_string);
    }

    pub fn set_active_target(&mut self, target: ActiveTarget) {
        self.active_target = target;
    }

    fn insert_node(&mut self, at: usize, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            at,
            MemoryNode {
                id,
                kind,
                highlight: None,
            },
        );
        self.reindex();
        id
    }

    fn reindex(&mut self) {
        self.positions = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();
    }

    fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.positions.get(&id).map(|&idx| &self.nodes[idx])
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MemoryNode> {
        let idx = *self.positions.get(&id)?;
        self.nodes.get_mut(idx)
    }

    // ------------------------------------------------------------------
    // Inspecting the page
    // ------------------------------------------------------------------

    /// Node ids in document order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current absolute URL
    pub fn url(&self) -> String {
        format!("{}{}", self.origin, self.pathname)
    }

    /// Nodes currently carrying highlight styling, in document order
    pub fn highlighted(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.highlight.is_some())
            .map(|n| n.id)
            .collect()
    }

    pub fn highlight_style(&self, id: NodeId) -> Option<&HighlightStyle> {
        self.node(id).and_then(|n| n.highlight.as_ref())
    }

    pub fn effects(&self) -> &[PageEffect] {
        &self.effects
    }

    /// Drain the effect log
    pub fn take_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn clicks(&self) -> Vec<MemoryElement> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Clicked(el) => Some(*el),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Navigated(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn scrolls(&self) -> Vec<NodeId> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Scrolled(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self {
            origin: "https://x.com".to_string(),
            pathname: "/home".to_string(),
            profile_link: None,
            active_target: ActiveTarget::None,
            nodes: Vec::new(),
            positions: HashMap::new(),
            next_id: 0,
            effects: Vec::new(),
        }
    }
}

impl PageAdapter for MemoryPage {
    type Element = MemoryElement;

    fn content_items(&self) -> Vec<MemoryElement> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Content { .. }))
            .map(|n| MemoryElement::Node(n.id))
            .collect()
    }

    fn cells(&self) -> Vec<MemoryElement> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Cell { .. }))
            .map(|n| MemoryElement::Node(n.id))
            .collect()
    }

    fn primary_button(&self, cell: &MemoryElement) -> Option<MemoryElement> {
        let MemoryElement::Node(id) = *cell else {
            return None;
        };
        match &self.node(id)?.kind {
            NodeKind::Cell {
                button_text: Some(_),
            } => Some(MemoryElement::Button(id)),
            _ => None,
        }
    }

    fn text_content(&self, element: &MemoryElement) -> String {
        match *element {
            MemoryElement::Button(id) | MemoryElement::Node(id) => match self.node(id) {
                Some(MemoryNode {
                    kind:
                        NodeKind::Cell {
                            button_text: Some(text),
                        },
                    ..
                }) => text.clone(),
                _ => String::new(),
            },
            MemoryElement::Control(_, interaction) => interaction.id().to_string(),
        }
    }

    fn compare_document_position(&self, a: &MemoryElement, b: &MemoryElement) -> Ordering {
        let pa = self.positions.get(&a.node());
        let pb = self.positions.get(&b.node());
        match (pa, pb) {
            (Some(pa), Some(pb)) => pa.cmp(pb),
            // Detached nodes have no relative position
            _ => Ordering::Equal,
        }
    }

    fn find_interaction_control(
        &self,
        item: &MemoryElement,
        interaction: Interaction,
    ) -> Option<MemoryElement> {
        let MemoryElement::Node(id) = *item else {
            return None;
        };
        match &self.node(id)?.kind {
            NodeKind::Content { controls, .. } if controls.contains(&interaction) => {
                Some(MemoryElement::Control(id, interaction))
            }
            _ => None,
        }
    }

    fn find_permalink(&self, item: &MemoryElement) -> Option<String> {
        let MemoryElement::Node(id) = *item else {
            return None;
        };
        match &self.node(id)?.kind {
            NodeKind::Content { permalink, .. } => permalink.clone(),
            NodeKind::Cell { .. } => None,
        }
    }

    fn location(&self) -> Location {
        Location {
            origin: self.origin.clone(),
            pathname: self.pathname.clone(),
        }
    }

    fn profile_link_href(&self) -> Option<String> {
        self.profile_link.clone()
    }

    fn active_target(&self) -> ActiveTarget {
        self.active_target
    }

    fn apply_highlight(&mut self, element: &MemoryElement, style: &HighlightStyle) {
        let id = element.node();
        if let Some(node) = self.node_mut(id) {
            node.highlight = Some(style.clone());
            self.effects.push(PageEffect::Highlighted(id));
        }
    }

    fn clear_highlight(&mut self, element: &MemoryElement) {
        let id = element.node();
        if let Some(node) = self.node_mut(id) {
            if node.highlight.take().is_some() {
                self.effects.push(PageEffect::Unhighlighted(id));
            }
        }
    }

    fn scroll_into_view(&mut self, element: &MemoryElement) {
        self.effects.push(PageEffect::Scrolled(element.node()));
    }

    fn click(&mut self, element: &MemoryElement) {
        self.effects.push(PageEffect::Clicked(*element));
    }

    fn assign_location(&mut self, url: &str) {
        if let Err(e) = self.set_url(url) {
            tracing::warn!("MemoryPage could not parse navigation target {}: {}", url, e);
        }
        self.effects.push(PageEffect::Navigated(url.to_string()));
    }
}
