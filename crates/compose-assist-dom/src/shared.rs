//! Shared handle to a live page: document, mutation observer and click listeners.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use crate::document::Document;
use crate::mutation::MutationBatch;
use crate::node::NodeId;

/// Callback invoked when a node is clicked. Runs outside the document lock.
pub type ClickListener = Arc<dyn Fn(NodeId) + Send + Sync>;

struct PageState {
    document: Document,
    observer: Option<mpsc::UnboundedSender<MutationBatch>>,
    listeners: HashMap<NodeId, Vec<ClickListener>>,
}

/// Cloneable handle to a page.
///
/// All access goes through short critical sections; the lock is never held
/// while listeners run, so listeners may read or mutate the document.
#[derive(Clone)]
pub struct SharedDocument {
    inner: Arc<Mutex<PageState>>,
}

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PageState {
                document,
                observer: None,
                listeners: HashMap::new(),
            })),
        }
    }

    /// Start observing child-list mutations of the whole document.
    ///
    /// A page has a single observer; calling this again replaces the previous
    /// one, whose receiver then sees the channel close.
    pub fn observe(&self) -> mpsc::UnboundedReceiver<MutationBatch> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().observer = Some(tx);
        rx
    }

    /// Stop observing; the current receiver sees the channel close.
    pub fn disconnect(&self) {
        self.inner.lock().observer = None;
    }

    /// Run a read-only query against the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.lock().document)
    }

    /// Run one host task against the document. Child-list changes made by
    /// `f` are delivered to the observer as one batch. Listeners of nodes
    /// the task disconnected are dropped.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut state = self.inner.lock();
        let result = f(&mut state.document);
        let records = state.document.take_mutations();
        if records.is_empty() {
            return result;
        }
        if records.iter().any(|r| !r.removed_nodes.is_empty()) {
            let PageState {
                document, listeners, ..
            } = &mut *state;
            let before = listeners.len();
            listeners.retain(|&id, _| document.is_connected(id));
            if listeners.len() < before {
                trace!(dropped = before - listeners.len(), "dropped detached click listeners");
            }
        }
        let closed = match &state.observer {
            Some(observer) => {
                trace!(records = records.len(), "delivering mutation batch");
                observer.send(MutationBatch::new(records)).is_err()
            }
            None => false,
        };
        if closed {
            state.observer = None;
        }
        result
    }

    /// Register `listener` for clicks on `node`. The registration lasts
    /// until a host task disconnects the node.
    pub fn add_click_listener(&self, node: NodeId, listener: ClickListener) {
        self.inner
            .lock()
            .listeners
            .entry(node)
            .or_default()
            .push(listener);
    }

    pub fn has_click_listener(&self, node: NodeId) -> bool {
        self.inner
            .lock()
            .listeners
            .get(&node)
            .is_some_and(|listeners| !listeners.is_empty())
    }

    /// Dispatch a click. Returns `false` when nothing was delivered: the node
    /// is detached, it or one of its ancestors is disabled, or no listener is
    /// registered.
    pub fn click(&self, node: NodeId) -> bool {
        let listeners = {
            let state = self.inner.lock();
            let doc = &state.document;

            if !doc.is_connected(node) {
                trace!(%node, "click ignored: detached");
                return false;
            }

            let mut current = Some(node);
            while let Some(id) = current {
                if doc.element(id).map(|e| e.is_disabled()).unwrap_or(false) {
                    trace!(%node, "click ignored: disabled");
                    return false;
                }
                current = doc.parent(id);
            }

            match state.listeners.get(&node) {
                Some(listeners) if !listeners.is_empty() => listeners.clone(),
                _ => return false,
            }
        };

        for listener in listeners {
            listener(node);
        }
        true
    }

    /// Snapshot of the document for inspection.
    pub fn snapshot(&self) -> Document {
        self.inner.lock().document.clone()
    }
}

impl std::fmt::Debug for SharedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedDocument").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
