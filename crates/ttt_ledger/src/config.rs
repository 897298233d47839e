//! Runtime configuration loaded from an optional TOML file.

use crate::ConfigError;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for the console game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct LedgerConfig {
    /// Text file holding statistics and match history.
    #[serde(default = "default_data_file")]
    data_file: PathBuf,

    /// Pause before the bot announces its move, in milliseconds.
    #[serde(default = "default_bot_think_ms")]
    bot_think_ms: u64,

    /// Fixed seed for the bot's move selection.
    #[serde(default)]
    bot_seed: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("game_data.txt")
}

fn default_bot_think_ms() -> u64 {
    300
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            bot_think_ms: default_bot_think_ms(),
            bot_seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl LedgerConfig {
    /// Bot thinking pause as a [`Duration`].
    pub fn bot_think(&self) -> Duration {
        Duration::from_millis(self.bot_think_ms)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(data_file = %config.data_file.display(), "Config loaded");
        Ok(config)
    }

    /// Loads the file when it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = LedgerConfig::from_toml("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.data_file(), &PathBuf::from("game_data.txt"));
        assert_eq!(config.bot_think(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = LedgerConfig::from_toml("data_file = \"stats.txt\"\nbot_seed = 42\n").unwrap();
        assert_eq!(config.data_file(), &PathBuf::from("stats.txt"));
        assert_eq!(config.bot_seed(), &Some(42));
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = LedgerConfig::from_toml("bot_think_ms = \"slow\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = LedgerConfig::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_setters_chain() {
        let config = LedgerConfig::default()
            .with_bot_think_ms(0)
            .with_bot_seed(Some(7));
        assert_eq!(config.bot_think(), Duration::ZERO);
        assert_eq!(config.bot_seed(), &Some(7));
    }
}
