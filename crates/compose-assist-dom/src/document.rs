//! The host document: a node arena with tree operations, selector queries,
//! focus and a text caret.
//!
//! Child-list changes to nodes connected to the root are recorded and later
//! flushed as one [`MutationBatch`](crate::MutationBatch) by
//! [`SharedDocument::mutate`](crate::SharedDocument::mutate). Changes inside
//! detached subtrees are not observable, matching how a page observer only
//! sees the live tree.

use crate::error::{DomError, DomResult};
use crate::mutation::MutationRecord;
use crate::node::{ElementData, Node, NodeId, NodeKind};
use crate::selector::Selector;

/// Insertion point inside a text node, in character offsets.
///
/// `start == end` is a collapsed caret; otherwise the range is replaced on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
}

/// Host page document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    focus: Option<NodeId>,
    caret: Option<Caret>,
    pending: Vec<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty `html > body` document.
    pub fn new() -> Self {
        let mut nodes = vec![Node::element(ElementData::new("html"))];
        let root = NodeId(0);
        let mut body = Node::element(ElementData::new("body"));
        body.parent = Some(root);
        nodes.push(body);
        let body = NodeId(1);
        nodes[0].children.push(body);

        Self {
            nodes,
            root,
            body,
            focus: None,
            caret: None,
            pending: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id.0).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::NodeNotFound(id))
    }

    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).map(Node::is_element).unwrap_or(false)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(Node::element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(Node::text(text))
    }

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Link a fresh detached `child` under detached `parent`, unrecorded.
    pub(crate) fn adopt(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|e| e.tag.as_str())
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is attached to this document's root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. A child that already has a parent is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.element(parent)?;
        self.node(child)?;
        if child == self.root || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        let mut reference = reference;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
            if r == child {
                reference = self.next_sibling(child);
            }
        }

        self.detach(child);

        let index = match reference {
            Some(r) => self
                .children(parent)
                .iter()
                .position(|&c| c == r)
                .ok_or(DomError::NotAChild { parent, child: r })?,
            None => self.children(parent).len(),
        };

        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);

        if self.is_connected(parent) {
            self.pending.push(MutationRecord::added(parent, child));
        }
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Detach a node from its parent, if it has one.
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        self.node(node)?;
        self.detach(node);
        Ok(())
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.parent(child) else {
            return;
        };
        let connected = self.is_connected(old_parent);

        if let Some(focus) = self.focus {
            if self.contains(child, focus) {
                self.focus = None;
                self.caret = None;
            }
        }
        if let Some(caret) = self.caret {
            if self.contains(child, caret.node) {
                self.caret = None;
            }
        }

        if let Some(node) = self.nodes.get_mut(old_parent.0) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = None;
        }
        if connected {
            self.pending.push(MutationRecord::removed(old_parent, child));
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        self.element_mut(id)?
            .attributes
            .remove(&name.to_ascii_lowercase());
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).map(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.element_mut(id)?.add_class(class);
        Ok(())
    }

    /// Data of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).ok().and_then(Node::as_text)
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.element(id)?;
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        let node = self.create_text(text);
        self.append_child(id, node)
    }

    /// Rendered text of a subtree: text nodes, with line breaks for `<br>`
    /// and around block elements.
    pub fn inner_text(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        let mut out = String::new();
        for &child in self.children(id) {
            self.collect_text(child, &mut out);
        }
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(element) => {
                if element.tag == "br" {
                    out.push('\n');
                    return;
                }
                let block = element.is_block();
                if block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                for &child in &node.children {
                    self.collect_text(child, out);
                }
                if block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).map(|e| selector.matches(e)).unwrap_or(false)
    }

    /// First connected element matching `selector`, in document order.
    pub fn query_selector(&self, selector: &Selector) -> Option<NodeId> {
        self.query_selector_within(self.root, selector)
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    /// First descendant of `scope` matching `selector`; `scope` itself is not tested.
    pub fn query_selector_within(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    /// Parse and run a selector in one step.
    pub fn query(&self, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(self.query_selector(&Selector::parse(selector)?))
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    /// Focus an element. For editable elements an existing caret inside the
    /// element is kept; otherwise the caret goes to the end of its text.
    pub fn focus(&mut self, id: NodeId) -> DomResult<()> {
        let editable = self.element(id)?.is_editable();
        self.focus = Some(id);

        if !editable {
            self.caret = None;
            return Ok(());
        }
        if let Some(caret) = self.caret {
            if self.contains(id, caret.node) {
                return Ok(());
            }
        }

        let last_text = self
            .descendants(id)
            .into_iter()
            .filter(|&n| self.text(n).is_some())
            .last();
        let text_node = match last_text {
            Some(node) => node,
            None => {
                let node = self.create_text("");
                self.append_child(id, node)?;
                node
            }
        };
        let end = self.text(text_node).map(|t| t.chars().count()).unwrap_or(0);
        self.caret = Some(Caret {
            node: text_node,
            start: end,
            end,
        });
        Ok(())
    }

    /// Place the caret inside a text node and focus its nearest editable ancestor.
    pub fn set_caret(&mut self, text_node: NodeId, start: usize, end: usize) -> DomResult<()> {
        let len = self
            .text(text_node)
            .ok_or(DomError::NodeNotFound(text_node))?
            .chars()
            .count();

        let mut editable = self.parent(text_node);
        while let Some(id) = editable {
            if self.element(id).map(ElementData::is_editable).unwrap_or(false) {
                break;
            }
            editable = self.parent(id);
        }
        let host = editable.ok_or(DomError::NoEditableFocus)?;

        let start = start.min(len);
        self.focus = Some(host);
        self.caret = Some(Caret {
            node: text_node,
            start,
            end: end.clamp(start, len),
        });
        Ok(())
    }

    /// Insert text at the caret of the focused editable element, replacing
    /// any selected range. The caret collapses after the inserted text.
    pub fn insert_text(&mut self, text: &str) -> DomResult<()> {
        let focus = self.focus.ok_or(DomError::NoEditableFocus)?;
        if !self.element(focus)?.is_editable() {
            return Err(DomError::NoEditableFocus);
        }
        let caret = self.caret.ok_or(DomError::NoEditableFocus)?;

        let node = self.node_mut(caret.node)?;
        let NodeKind::Text(data) = &mut node.kind else {
            return Err(DomError::NoEditableFocus);
        };
        let start = byte_offset(data, caret.start);
        let end = byte_offset(data, caret.end.max(caret.start));
        data.replace_range(start..end, text);

        let collapsed = caret.start + text.chars().count();
        self.caret = Some(Caret {
            node: caret.node,
            start: collapsed,
            end: collapsed,
        });
        Ok(())
    }

    pub(crate) fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending)
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
