//! Idempotent injection of the reply controls into the compose toolbar.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use compose_assist_dom::{Selector, SharedDocument};
use tracing::{debug, info, warn};

use crate::controls::{self, InjectedControlSet};
use crate::generation::GenerationClient;
use crate::locator::SurfaceLocator;

/// Result of one injection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionOutcome {
    /// Another attempt ran less than one cooldown ago.
    Guarded,
    /// Controls are already present in the page.
    AlreadyInjected,
    /// No compose toolbar in the page.
    NoSurface,
    Injected(InjectedControlSet),
}

/// Attempt counters.
#[derive(Debug, Default)]
pub struct InjectionStats {
    attempts: AtomicU64,
    injected: AtomicU64,
    guarded: AtomicU64,
    already_injected: AtomicU64,
    no_surface: AtomicU64,
}

/// Point-in-time copy of [`InjectionStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionStatsSnapshot {
    pub attempts: u64,
    pub injected: u64,
    pub guarded: u64,
    pub already_injected: u64,
    pub no_surface: u64,
}

impl InjectionStats {
    fn record(&self, outcome: &InjectionOutcome) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            InjectionOutcome::Guarded => &self.guarded,
            InjectionOutcome::AlreadyInjected => &self.already_injected,
            InjectionOutcome::NoSurface => &self.no_surface,
            InjectionOutcome::Injected(_) => &self.injected,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> InjectionStatsSnapshot {
        InjectionStatsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            injected: self.injected.load(Ordering::Relaxed),
            guarded: self.guarded.load(Ordering::Relaxed),
            already_injected: self.already_injected.load(Ordering::Relaxed),
            no_surface: self.no_surface.load(Ordering::Relaxed),
        }
    }
}

/// Owns the injection guard for one page.
///
/// At most one attempt runs per cooldown window: the guard is taken at the
/// start of an attempt and released by a timer once the cooldown elapses,
/// whatever the attempt found.
#[derive(Debug)]
pub struct InjectionCoordinator {
    page: SharedDocument,
    locator: Arc<SurfaceLocator>,
    generation: Arc<GenerationClient>,
    marker: Selector,
    guard: Arc<AtomicBool>,
    cooldown: Duration,
    stats: InjectionStats,
}

impl InjectionCoordinator {
    pub fn new(
        page: SharedDocument,
        locator: Arc<SurfaceLocator>,
        generation: Arc<GenerationClient>,
        cooldown: Duration,
    ) -> Self {
        Self {
            page,
            locator,
            generation,
            marker: controls::container_marker(),
            guard: Arc::new(AtomicBool::new(false)),
            cooldown,
            stats: InjectionStats::default(),
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> InjectionStatsSnapshot {
        self.stats.snapshot()
    }

    /// Try to inject the controls. Safe to call at any time and any number
    /// of times.
    pub fn attempt_injection(&self) -> InjectionOutcome {
        if self.guard.swap(true, Ordering::AcqRel) {
            debug!("injection attempt skipped: guard held");
            self.stats.record(&InjectionOutcome::Guarded);
            return InjectionOutcome::Guarded;
        }

        let outcome = self.inject();
        self.release_after_cooldown();
        self.stats.record(&outcome);
        outcome
    }

    fn inject(&self) -> InjectionOutcome {
        let outcome = self.page.mutate(|doc| {
            if doc.query_selector(&self.marker).is_some() {
                debug!("controls already present");
                return InjectionOutcome::AlreadyInjected;
            }
            let Some(toolbar) = self.locator.find_compose_toolbar(doc) else {
                debug!("compose toolbar not found");
                return InjectionOutcome::NoSurface;
            };

            let inserted = controls::create_control_set(doc).and_then(|set| {
                let first = doc.first_child(toolbar);
                doc.insert_before(toolbar, set.container, first)?;
                Ok(set)
            });
            match inserted {
                Ok(set) => {
                    info!(%toolbar, container = %set.container, "reply controls injected");
                    InjectionOutcome::Injected(set)
                }
                Err(error) => {
                    warn!(%error, %toolbar, "failed to insert reply controls");
                    InjectionOutcome::NoSurface
                }
            }
        });

        if let InjectionOutcome::Injected(set) = outcome {
            let generation = Arc::clone(&self.generation);
            self.page.add_click_listener(
                set.trigger,
                Arc::new(move |_| generation.activate_from_click(set)),
            );
        }
        outcome
    }

    fn release_after_cooldown(&self) {
        let guard = Arc::clone(&self.guard);
        let cooldown = self.cooldown;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(cooldown).await;
                    guard.store(false, Ordering::Release);
                });
            }
            Err(_) => guard.store(false, Ordering::Release),
        }
    }
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;
