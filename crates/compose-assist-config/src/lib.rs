//! # compose-assist config
//!
//! TOML configuration for the compose assistant: generation endpoint,
//! watcher timings, locator probe lists and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{BASE_URL_ENV, ConfigLoader, DEFAULT_CONFIG_PATH};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
