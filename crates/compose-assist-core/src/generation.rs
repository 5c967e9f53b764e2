//! Trigger activation: one request per activation, reply typed into the
//! compose box, busy state always undone.

use std::sync::Arc;

use compose_assist_dom::{NodeId, SharedDocument};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{GenerationRequest, ReplyGenerator};
use crate::controls::{self, InjectedControlSet};
use crate::error::GenerationError;
use crate::locator::SurfaceLocator;
use crate::notify::{FAILURE_ALERT, Notifier};

/// Result of one activation.
#[derive(Debug)]
pub enum ActivationOutcome {
    /// The trigger was already busy; no request was made.
    Ignored,
    /// The reply was inserted at the caret.
    Inserted(String),
    /// No text was inserted and the user was alerted.
    Failed(GenerationError),
}

impl ActivationOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, ActivationOutcome::Inserted(_))
    }
}

/// Restores the trigger's idle label and enabled state when dropped.
#[derive(Debug)]
pub struct BusyGuard {
    page: SharedDocument,
    trigger: NodeId,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let trigger = self.trigger;
        if let Err(error) = self.page.mutate(|doc| controls::set_idle(doc, trigger)) {
            warn!(%error, %trigger, "failed to restore trigger state");
        }
    }
}

/// An activation whose synchronous part is done: the trigger is busy and
/// the request is built.
#[derive(Debug)]
pub struct PendingGeneration {
    request: GenerationRequest,
    busy: BusyGuard,
}

impl PendingGeneration {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

pub struct GenerationClient {
    page: SharedDocument,
    locator: Arc<SurfaceLocator>,
    generator: Arc<dyn ReplyGenerator>,
    notifier: Arc<dyn Notifier>,
    outcomes: Mutex<Option<mpsc::UnboundedSender<ActivationOutcome>>>,
}

impl GenerationClient {
    pub fn new(
        page: SharedDocument,
        locator: Arc<SurfaceLocator>,
        generator: Arc<dyn ReplyGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            page,
            locator,
            generator,
            notifier,
            outcomes: Mutex::new(None),
        }
    }

    /// Receive the outcome of every click-driven activation. A new
    /// subscription replaces the previous one.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ActivationOutcome> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.outcomes.lock() = Some(tx);
        rx
    }

    /// Run one activation to completion.
    pub async fn on_activate(&self, controls: &InjectedControlSet) -> ActivationOutcome {
        match self.begin(controls) {
            Some(pending) => self.complete(pending).await,
            None => ActivationOutcome::Ignored,
        }
    }

    /// Synchronous part of an activation: read the tone, mark the trigger
    /// busy and capture the email content. `None` when already busy.
    pub fn begin(&self, controls: &InjectedControlSet) -> Option<PendingGeneration> {
        let trigger = controls.trigger;
        let request = self.page.mutate(|doc| {
            if controls::is_busy(doc, trigger) {
                return None;
            }
            let tone = controls::selected_tone(doc, controls.tone_selector);
            if let Err(error) = controls::set_busy(doc, trigger) {
                warn!(%error, %trigger, "failed to mark trigger busy");
            }
            let email_content = self.locator.find_email_content(doc).unwrap_or_default();
            Some(GenerationRequest {
                email_content,
                tone,
            })
        });

        let Some(request) = request else {
            debug!(%trigger, "activation ignored: generation in progress");
            return None;
        };

        Some(PendingGeneration {
            request,
            busy: BusyGuard {
                page: self.page.clone(),
                trigger,
            },
        })
    }

    /// Await the reply and apply it. The trigger returns to idle on every path.
    pub async fn complete(&self, pending: PendingGeneration) -> ActivationOutcome {
        let PendingGeneration { request, busy } = pending;

        let result = match self.generator.generate(&request).await {
            Ok(reply) => self.insert_reply(&reply).map(|()| reply),
            Err(error) => Err(error),
        };

        let outcome = match result {
            Ok(reply) => {
                info!(tone = %request.tone, chars = reply.chars().count(), "reply inserted");
                ActivationOutcome::Inserted(reply)
            }
            Err(error) => {
                warn!(%error, tone = %request.tone, "reply generation failed");
                self.notifier.alert(FAILURE_ALERT);
                ActivationOutcome::Failed(error)
            }
        };

        drop(busy);
        outcome
    }

    fn insert_reply(&self, reply: &str) -> Result<(), GenerationError> {
        self.page.mutate(|doc| {
            let compose_box = self
                .locator
                .find_compose_box(doc)
                .ok_or(GenerationError::ComposeBoxNotFound)?;
            doc.focus(compose_box)?;
            doc.insert_text(reply)?;
            Ok(())
        })
    }

    /// Click handler body: begin synchronously, finish on a spawned task.
    pub(crate) fn activate_from_click(self: &Arc<Self>, controls: InjectedControlSet) {
        let Some(pending) = self.begin(&controls) else {
            self.publish(ActivationOutcome::Ignored);
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let client = Arc::clone(self);
                handle.spawn(async move {
                    let outcome = client.complete(pending).await;
                    client.publish(outcome);
                });
            }
            Err(_) => {
                warn!("activation dropped: no async runtime");
                drop(pending);
            }
        }
    }

    fn publish(&self, outcome: ActivationOutcome) {
        let mut outcomes = self.outcomes.lock();
        let closed = match outcomes.as_ref() {
            Some(tx) => tx.send(outcome).is_err(),
            None => false,
        };
        if closed {
            *outcomes = None;
        }
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod tests;
