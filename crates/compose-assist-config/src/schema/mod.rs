//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_locator;
mod schema_logging;

pub use schema_locator::*;
pub use schema_logging::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub watcher: WatcherConfig,

    #[serde(default)]
    pub locator: LocatorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote reply generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL; requests go to `{base_url}/generate`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api/email".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Timings of the mutation watcher and the injection coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Quiet period after the last qualifying mutation batch.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long the injection guard stays set after an attempt.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Delay before the startup injection attempt.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            cooldown_ms: default_cooldown_ms(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_cooldown_ms() -> u64 {
    1000
}

fn default_initial_delay_ms() -> u64 {
    1000
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
