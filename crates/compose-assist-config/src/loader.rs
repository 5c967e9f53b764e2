//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variable that overrides `generator.base_url`.
pub const BASE_URL_ENV: &str = "COMPOSE_ASSIST_BASE_URL";

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load `path` when one is given; it must exist. Otherwise load the
    /// first existing file among [`DEFAULT_CONFIG_PATH`] and the per-user
    /// config file, or fall back to defaults. Environment overrides are
    /// applied in every case.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let mut candidates = std::iter::once(PathBuf::from(DEFAULT_CONFIG_PATH))
                    .chain(Self::user_config_path());
                match candidates.find(|p| p.exists()) {
                    Some(found) => Self::load(&found)?,
                    None => Config::default(),
                }
            }
        };
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Per-user config file, e.g. `~/.config/compose-assist/config.toml`.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("compose-assist").join("config.toml"))
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.generator.base_url = url;
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.compose-assist/logs`).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    }
}
