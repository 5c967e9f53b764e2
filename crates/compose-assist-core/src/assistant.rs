//! Composition root for one page.

use std::sync::Arc;
use std::time::Duration;

use compose_assist_config::{Config, ConfigValidator};
use compose_assist_dom::SharedDocument;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{HttpReplyGenerator, ReplyGenerator};
use crate::controls::InjectedControlSet;
use crate::error::AssistantError;
use crate::generation::{ActivationOutcome, GenerationClient};
use crate::injector::{InjectionCoordinator, InjectionOutcome, InjectionStatsSnapshot};
use crate::locator::SurfaceLocator;
use crate::notify::Notifier;
use crate::watcher::MutationWatcher;

/// Reply assistant attached to one page.
///
/// Created stopped; [`start`](Self::start) must be called from within a
/// tokio runtime.
#[derive(Debug)]
pub struct ComposeAssistant {
    page: SharedDocument,
    locator: Arc<SurfaceLocator>,
    generation: Arc<GenerationClient>,
    coordinator: Arc<InjectionCoordinator>,
    debounce: Duration,
    initial_delay: Duration,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl ComposeAssistant {
    /// Build with an explicit generator and notifier.
    pub fn new(
        page: SharedDocument,
        config: &Config,
        generator: Arc<dyn ReplyGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AssistantError> {
        let warnings = ConfigValidator::validate(config)?.into_result()?;
        for warning in warnings {
            warn!(path = %warning.path, "{}", warning.message);
        }

        let locator = Arc::new(SurfaceLocator::from_config(&config.locator)?);
        let generation = Arc::new(GenerationClient::new(
            page.clone(),
            Arc::clone(&locator),
            generator,
            notifier,
        ));
        let coordinator = Arc::new(InjectionCoordinator::new(
            page.clone(),
            Arc::clone(&locator),
            Arc::clone(&generation),
            Duration::from_millis(config.watcher.cooldown_ms),
        ));

        Ok(Self {
            page,
            locator,
            generation,
            coordinator,
            debounce: Duration::from_millis(config.watcher.debounce_ms),
            initial_delay: Duration::from_millis(config.watcher.initial_delay_ms),
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
        })
    }

    /// Build with the HTTP generator described by `config.generator`.
    pub fn from_config(
        page: SharedDocument,
        config: &Config,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AssistantError> {
        let generator = HttpReplyGenerator::from_config(&config.generator)?;
        Self::new(page, config, Arc::new(generator), notifier)
    }

    /// Start observing the page and schedule the startup injection attempt.
    /// Calling it again has no effect.
    pub fn start(&mut self) {
        if !self.tasks.is_empty() {
            return;
        }

        let watcher = MutationWatcher::new(
            self.page.clone(),
            Arc::clone(&self.locator),
            Arc::clone(&self.coordinator),
            self.debounce,
        );
        let batches = self.page.observe();
        self.tasks
            .push(tokio::spawn(watcher.run(batches, self.cancel.child_token())));

        let coordinator = Arc::clone(&self.coordinator);
        let cancel = self.cancel.child_token();
        let delay = self.initial_delay;
        self.tasks.push(tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let outcome = coordinator.attempt_injection();
                    debug!(?outcome, "startup injection attempt");
                }
            }
        }));

        info!(
            debounce_ms = self.debounce.as_millis() as u64,
            "compose assistant started"
        );
    }

    /// Stop watching and wait for the background tasks to finish.
    /// Activations already in flight still complete.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            if let Err(error) = task.await {
                warn!(%error, "assistant task ended abnormally");
            }
        }
        info!("compose assistant stopped");
    }

    /// Run one injection attempt now.
    pub fn attempt_injection(&self) -> InjectionOutcome {
        self.coordinator.attempt_injection()
    }

    /// Run one activation of `controls` directly, without a click.
    pub async fn activate(&self, controls: &InjectedControlSet) -> ActivationOutcome {
        self.generation.on_activate(controls).await
    }

    /// Outcomes of click-driven activations.
    pub fn activations(&self) -> mpsc::UnboundedReceiver<ActivationOutcome> {
        self.generation.subscribe()
    }

    pub fn stats(&self) -> InjectionStatsSnapshot {
        self.coordinator.stats()
    }

    pub fn page(&self) -> &SharedDocument {
        &self.page
    }

    pub fn locator(&self) -> &SurfaceLocator {
        &self.locator
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
