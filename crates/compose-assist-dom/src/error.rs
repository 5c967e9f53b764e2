//! Document errors.

use thiserror::Error;

use crate::node::NodeId;
use crate::selector::SelectorError;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child} into {parent}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("No editable element has focus")]
    NoEditableFocus,

    #[error("Invalid selector: {0}")]
    Selector(#[from] SelectorError),
}

/// Result type for document operations.
pub type DomResult<T> = Result<T, DomError>;
