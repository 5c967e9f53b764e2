//! # compose-assist DOM
//!
//! Model of the host page that compose-assist augments. The engine never
//! owns the page: it queries it with structural probes, observes its
//! child-list mutations and attaches a few elements to it.
//!
//! - [`Document`]: node arena with tree operations, selector queries,
//!   focus and a text caret.
//! - [`Selector`]: the CSS subset the probes are written in.
//! - [`SharedDocument`]: cloneable page handle with a single mutation
//!   observer channel and click dispatch.
//! - [`el`]: declarative subtree builder.

mod builder;
mod document;
mod error;
mod mutation;
mod node;
mod selector;
mod shared;

pub use builder::{ElementSpec, NodeSpec, el};
pub use document::{Caret, Document};
pub use error::{DomError, DomResult};
pub use mutation::{MutationBatch, MutationRecord};
pub use node::{ElementData, Node, NodeId, NodeKind};
pub use selector::{AttributeMatch, CompoundSelector, Selector, SelectorError};
pub use shared::{ClickListener, SharedDocument};
