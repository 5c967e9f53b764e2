//! # compose-assist core
//!
//! Detects webmail compose surfaces in a host page, injects a tone selector
//! and an "AI Reply" trigger exactly once per surface, and turns a trigger
//! activation into one generation request whose reply is typed into the
//! compose box.
//!
//! ## Architecture
//!
//! ```text
//! host page ──mutation batches──▶ MutationWatcher ──debounced──▶ InjectionCoordinator
//!                                                                      │ injects
//!                                                                      ▼
//!                         compose box ◀──insert── GenerationClient ◀──click── trigger
//!                                                       │
//!                                                       ▼
//!                                                 ReplyGenerator (HTTP)
//! ```
//!
//! [`ComposeAssistant`] wires the pieces together for one page.

mod api;
mod assistant;
pub mod controls;
mod error;
pub mod fixtures;
mod generation;
mod injector;
mod locator;
mod notify;
mod tone;
mod watcher;

pub use api::{GenerationRequest, HttpReplyGenerator, MIN_COMPANION_CONTENT_CHARS, ReplyGenerator};
pub use assistant::ComposeAssistant;
pub use controls::InjectedControlSet;
pub use error::{AssistantError, GenerationError};
pub use generation::{ActivationOutcome, BusyGuard, GenerationClient, PendingGeneration};
pub use injector::{InjectionCoordinator, InjectionOutcome, InjectionStats, InjectionStatsSnapshot};
pub use locator::{Probe, SurfaceLocator};
pub use notify::{FAILURE_ALERT, Notifier, RecordingNotifier, TracingNotifier};
pub use tone::{DEFAULT_TONE, TONES, ToneOption, find_tone};
pub use watcher::MutationWatcher;

// Re-export for callers driving the assistant lifecycle.
pub use tokio_util::sync::CancellationToken;
