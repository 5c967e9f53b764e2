//! Error types for the compose assistant.

use compose_assist_config::ConfigError;
use compose_assist_dom::{DomError, SelectorError};
use thiserror::Error;

/// Why one activation produced no reply. Every variant is reported to the
/// user the same way; the compose box is left untouched.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The endpoint answered with a non-success status.
    #[error("Generation endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout or body read failure.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid generation endpoint: {0}")]
    InvalidEndpoint(String),

    /// Rejected before sending.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Compose box not found")]
    ComposeBoxNotFound,

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Network(err.to_string())
    }
}

impl From<url::ParseError> for GenerationError {
    fn from(err: url::ParseError) -> Self {
        GenerationError::InvalidEndpoint(err.to_string())
    }
}

/// Errors building a [`ComposeAssistant`](crate::ComposeAssistant).
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Invalid probe {probe:?}: {source}")]
    InvalidProbe {
        probe: String,
        #[source]
        source: SelectorError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generator error: {0}")]
    Generator(#[from] GenerationError),
}
