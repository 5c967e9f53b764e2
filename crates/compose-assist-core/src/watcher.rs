//! Debounced reaction to compose surfaces appearing in the page.

use std::sync::Arc;
use std::time::Duration;

use compose_assist_dom::{MutationBatch, SharedDocument};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::injector::InjectionCoordinator;
use crate::locator::SurfaceLocator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Idle,
    /// A qualifying batch arrived; attempt injection once `deadline` passes
    /// without another one.
    Pending { deadline: Instant },
}

/// Drains the page's mutation batches and triggers an injection attempt
/// after each burst of compose-related changes settles.
#[derive(Debug)]
pub struct MutationWatcher {
    page: SharedDocument,
    locator: Arc<SurfaceLocator>,
    coordinator: Arc<InjectionCoordinator>,
    debounce: Duration,
}

impl MutationWatcher {
    pub fn new(
        page: SharedDocument,
        locator: Arc<SurfaceLocator>,
        coordinator: Arc<InjectionCoordinator>,
        debounce: Duration,
    ) -> Self {
        Self {
            page,
            locator,
            coordinator,
            debounce,
        }
    }

    /// Whether some added node looks like a compose surface.
    pub fn qualifies(&self, batch: &MutationBatch) -> bool {
        self.page.read(|doc| {
            batch
                .added_nodes()
                .any(|node| self.locator.is_compose_signature(doc, node))
        })
    }

    /// Run until the batch channel closes or `cancel` fires.
    pub async fn run(
        self,
        mut batches: mpsc::UnboundedReceiver<MutationBatch>,
        cancel: CancellationToken,
    ) {
        let mut state = WatchState::Idle;

        loop {
            let deadline = match state {
                WatchState::Pending { deadline } => Some(deadline),
                WatchState::Idle => None,
            };
            let wake = deadline.unwrap_or_else(Instant::now);

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("mutation watcher cancelled");
                    break;
                }
                batch = batches.recv() => {
                    let Some(batch) = batch else {
                        debug!("mutation channel closed");
                        break;
                    };
                    if self.qualifies(&batch) {
                        debug!(records = batch.len(), "compose surface activity");
                        state = WatchState::Pending {
                            deadline: Instant::now() + self.debounce,
                        };
                    }
                }
                _ = tokio::time::sleep_until(wake), if deadline.is_some() => {
                    state = WatchState::Idle;
                    let outcome = self.coordinator.attempt_injection();
                    debug!(?outcome, "debounced injection attempt");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
