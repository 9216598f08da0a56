//! Configuration for the interactive frontend.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Frontend settings, read from TOML.
///
/// None of these reach the search engine: they only shape how a game is
/// presented.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cosmetic pause before the AI's reply is shown, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Print every candidate move's minimax score after the AI moves.
    #[serde(default)]
    show_analysis: bool,
}

fn default_think_delay_ms() -> u64 {
    500
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: default_think_delay_ms(),
            log_filter: default_log_filter(),
            show_analysis: false,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            think_delay_ms = config.think_delay_ms,
            show_analysis = config.show_analysis,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Pause before showing the AI's reply.
    pub fn think_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.think_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(*config.think_delay_ms(), 500);
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml("think_delay_ms = 0\nshow_analysis = true\n").unwrap();
        assert_eq!(*config.think_delay_ms(), 0);
        assert!(*config.show_analysis());
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_bad_toml() {
        let err = EngineConfig::from_toml("think_delay_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
