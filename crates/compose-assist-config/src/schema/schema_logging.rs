//! Logging configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for daily rolling log files. Empty disables file logging.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Emit console logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_directory(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn file_logging_enabled(&self) -> bool {
        !self.directory.trim().is_empty()
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_directory() -> String {
    "~/.compose-assist/logs".to_string()
}
