//! Bot configuration loading.

use crate::relay::RelayClient;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Top-level bot configuration, loaded from a TOML file.
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Overlay relay settings; omit the section to disable relaying.
    #[serde(default)]
    relay: Option<RelayConfig>,
}

/// Overlay relay settings.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Relay endpoint URL to POST events to.
    endpoint: String,
    /// Bearer token; the `RELAY_TOKEN` environment variable takes
    /// precedence when set.
    #[serde(default)]
    token: Option<String>,
}

impl BotConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(relay = config.relay.is_some(), "Config loaded successfully");
        Ok(config)
    }

    /// Builds a relay client from this config, or `None` when no relay
    /// section is present. The token is resolved from `RELAY_TOKEN`
    /// first, then the config file.
    #[instrument(skip(self))]
    pub fn relay_client(&self) -> Result<Option<RelayClient>, ConfigError> {
        let Some(relay) = &self.relay else {
            return Ok(None);
        };

        let token = std::env::var("RELAY_TOKEN")
            .ok()
            .or_else(|| relay.token.clone())
            .ok_or_else(|| {
                ConfigError::new(
                    "Relay token not set: provide RELAY_TOKEN or [relay] token".to_string(),
                )
            })?;

        Ok(Some(RelayClient::new(relay.endpoint.clone(), token)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
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
