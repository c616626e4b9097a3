//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use gebeta_rules::Variant;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "gebeta.toml";

/// Environment variable overriding [`AppConfig::hint_url`].
pub const HINT_URL_ENV: &str = "GEBETA_HINT_URL";

/// Configuration for the terminal client and its hint collaborator.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the move-suggestion service.
    #[serde(default = "default_hint_url")]
    hint_url: String,

    /// How long to wait for a suggestion, in milliseconds.
    #[serde(default = "default_hint_timeout_ms")]
    hint_timeout_ms: u64,

    /// Variant used by `play` when none is given.
    #[serde(default)]
    default_variant: Variant,

    /// Whether the play loop offers hints at all.
    #[serde(default = "default_hints_enabled")]
    hints_enabled: bool,
}

fn default_hint_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_hint_timeout_ms() -> u64 {
    3000
}

fn default_hints_enabled() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hint_url: default_hint_url(),
            hint_timeout_ms: default_hint_timeout_ms(),
            default_variant: Variant::default(),
            hints_enabled: default_hints_enabled(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(hint_url = %config.hint_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file at `path` if it exists, falling back to defaults, then
    /// applies environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_env_overrides(std::env::var(HINT_URL_ENV).ok()))
    }

    /// Replaces the hint URL when an override is present.
    pub fn with_env_overrides(mut self, hint_url: Option<String>) -> Self {
        if let Some(url) = hint_url.filter(|url| !url.trim().is_empty()) {
            info!(url = %url, "Overriding hint URL from environment");
            self.hint_url = url;
        }
        self
    }

    /// The hint timeout as a [`Duration`].
    pub fn hint_timeout(&self) -> Duration {
        Duration::from_millis(self.hint_timeout_ms)
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
