//! Node types stored in the document arena.

use std::collections::BTreeMap;
use std::fmt;

/// Index of a node in its owning [`Document`](crate::Document).
///
/// Ids are never reused; a removed node keeps its id and can be re-attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element data: lowercase tag name plus attributes.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Tag name (lowercase).
    pub tag: String,
    /// Attributes by name. `class` is stored here like any other attribute.
    pub attributes: BTreeMap<String, String>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate over the whitespace-separated class list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let entry = self.attributes.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class);
    }

    /// Whether text can be typed into this element.
    pub fn is_editable(&self) -> bool {
        matches!(self.tag.as_str(), "textarea" | "input")
            || self.attribute("contenteditable") == Some("true")
            || self.attribute("g_editable") == Some("true")
    }

    /// Whether this element blocks activation.
    pub fn is_disabled(&self) -> bool {
        self.attributes.contains_key("disabled") || self.attribute("aria-disabled") == Some("true")
    }

    /// Whether `inner_text` separates this element from its siblings with a line break.
    pub(crate) fn is_block(&self) -> bool {
        matches!(
            self.tag.as_str(),
            "div" | "p" | "tr" | "li" | "ul" | "ol" | "blockquote" | "table" | "section" | "body"
        )
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

/// A node in the arena with its tree links.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn element(data: ElementData) -> Self {
        Self {
            kind: NodeKind::Element(data),
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(text.into()),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }
}
