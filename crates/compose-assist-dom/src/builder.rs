//! Declarative subtree construction.

use crate::document::Document;
use crate::error::DomResult;
use crate::node::{ElementData, Node, NodeId};

/// A subtree description that can be materialized into a [`Document`].
#[derive(Debug, Clone)]
pub enum NodeSpec {
    Element(ElementSpec),
    Text(String),
}

/// Element description with attributes and children.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeSpec>,
}

/// Start an element description.
pub fn el(tag: &str) -> ElementSpec {
    ElementSpec {
        tag: tag.to_string(),
        ..Default::default()
    }
}

impl ElementSpec {
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Append to the `class` attribute.
    pub fn class(mut self, class: &str) -> Self {
        match self.attributes.iter_mut().find(|(n, _)| n == "class") {
            Some((_, value)) => {
                value.push(' ');
                value.push_str(class);
            }
            None => self.attributes.push(("class".to_string(), class.to_string())),
        }
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(NodeSpec::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(NodeSpec::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children
            .extend(children.into_iter().map(NodeSpec::Element));
        self
    }

    /// Build the subtree detached and return its root. Building a detached
    /// subtree records no mutations.
    pub fn build(&self, doc: &mut Document) -> NodeId {
        let mut data = ElementData::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            data.attributes
                .insert(name.to_ascii_lowercase(), value.clone());
        }
        let id = doc.push_node(Node::element(data));
        for child in &self.children {
            let child_id = match child {
                NodeSpec::Element(spec) => spec.build(doc),
                NodeSpec::Text(text) => doc.create_text(text),
            };
            doc.adopt(id, child_id);
        }
        id
    }
}

impl Document {
    /// Build `spec` and append it to `parent` as a single insertion.
    pub fn append_spec(&mut self, parent: NodeId, spec: &ElementSpec) -> DomResult<NodeId> {
        let id = spec.build(self);
        self.append_child(parent, id)?;
        Ok(id)
    }
}
