//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError::InvalidValue`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_generator(config, &mut result);
        Self::validate_watcher(config, &mut result);
        Self::validate_locator(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_generator(config: &Config, result: &mut ValidationResult) {
        let generator = &config.generator;
        let url = generator.base_url.trim();

        if url.is_empty() {
            result.add_error(ValidationError::new(
                "generator.base_url",
                "base_url cannot be empty",
            ));
        } else if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "generator.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if generator.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "generator.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if generator.connect_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "generator.connect_timeout_secs",
                "connect_timeout_secs must be greater than 0",
            ));
        } else if generator.connect_timeout_secs > generator.timeout_secs {
            result.add_warning(ValidationWarning::new(
                "generator.connect_timeout_secs",
                "connect_timeout_secs exceeds timeout_secs and has no effect",
            ));
        }
    }

    fn validate_watcher(config: &Config, result: &mut ValidationResult) {
        let watcher = &config.watcher;

        if watcher.debounce_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "watcher.debounce_ms",
                "debounce_ms is 0, every qualifying mutation batch triggers an attempt",
            ));
        } else if watcher.debounce_ms > 10_000 {
            result.add_warning(ValidationWarning::new(
                "watcher.debounce_ms",
                "debounce_ms is very high (>10s), controls will appear late",
            ));
        }

        if watcher.cooldown_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "watcher.cooldown_ms",
                "cooldown_ms is 0, the injection guard is released on the next tick",
            ));
        }
    }

    fn validate_locator(config: &Config, result: &mut ValidationResult) {
        let locator = &config.locator;
        let required = [
            ("locator.toolbar", &locator.toolbar),
            ("locator.compose_box", &locator.compose_box),
            ("locator.compose_signature", &locator.compose_signature),
        ];

        for (path, probes) in required {
            if probes.is_empty() {
                result.add_error(ValidationError::new(path, "at least one probe is required"));
            }
        }

        if locator.email_content.is_empty() {
            result.add_warning(ValidationWarning::new(
                "locator.email_content",
                "no email content probes, requests will carry empty content",
            ));
        }

        let all = [
            ("locator.toolbar", &locator.toolbar),
            ("locator.email_content", &locator.email_content),
            ("locator.compose_box", &locator.compose_box),
            ("locator.compose_signature", &locator.compose_signature),
        ];
        for (path, probes) in all {
            if probes.iter().any(|p| p.trim().is_empty()) {
                result.add_error(ValidationError::new(path, "probes cannot be empty strings"));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim().to_ascii_lowercase();
        if level.is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "level cannot be empty",
            ));
        } else if !KNOWN_LEVELS.contains(&level.as_str()) && !level.contains('=') {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, KNOWN_LEVELS
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
