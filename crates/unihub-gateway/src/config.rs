//! Gateway configuration system.
//!
//! Configuration can be loaded from:
//! - TOML files (default: ~/.config/unihub/gateway.toml)
//! - Environment variables (UNIHUB_* prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use unihub_gateway::config::GatewayConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = GatewayConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = GatewayConfig::from_file(std::path::Path::new("gateway.toml")).expect("Failed to load");
//!
//! // Or from environment variables
//! let config = GatewayConfig::from_env();
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use unihub_core::defaults;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Remote gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL for the gateway API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Requests slower than this many milliseconds are logged at WARN.
    #[serde(default = "default_slow_request_ms")]
    pub slow_request_ms: u64,
}

fn default_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

fn default_slow_request_ms() -> u64 {
    defaults::SLOW_REQUEST_MS
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GATEWAY_URL.to_string(),
            timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            slow_request_ms: defaults::SLOW_REQUEST_MS,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the default file path, falling back to
    /// environment variables when no file exists.
    pub fn load() -> ConfigResult<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                info!("Loading gateway config from {}", path.display());
                return Self::from_file(&path);
            }
        }
        debug!("No gateway config file found, using environment");
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from `UNIHUB_*` environment variables,
    /// using defaults for anything unset.
    pub fn from_env() -> Self {
        let base_url =
            env::var("UNIHUB_GATEWAY_URL").unwrap_or_else(|_| defaults::GATEWAY_URL.to_string());
        let timeout_secs = env::var("UNIHUB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);
        let slow_request_ms = env::var("UNIHUB_SLOW_REQUEST_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::SLOW_REQUEST_MS);

        Self {
            base_url,
            timeout_secs,
            slow_request_ms,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    fn default_path() -> Option<PathBuf> {
        env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("unihub")
                .join("gateway.toml")
        })
    }
}
