//! API endpoint configuration.
//!
//! Resolution order for the base URL: `DIMLOG_API_URL` environment variable,
//! then `~/.config/dimlog/config.json`, then the built-in default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Built-in QC server base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Environment variable overriding the base URL.
const BASE_URL_ENV: &str = "DIMLOG_API_URL";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid JSON of the expected shape.
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// QC server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the QC server API, without the `/measurements` suffix.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the config file and environment.
    ///
    /// A missing config file yields the defaults; a malformed one is an
    /// error so a typo does not silently send data to the wrong server.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match config_path() {
            Some(path) if path.exists() => Some(std::fs::read_to_string(path)?),
            _ => None,
        };
        let env = std::env::var(BASE_URL_ENV).ok();
        Self::resolve(env, file.as_deref())
    }

    /// Pure resolution step, separated from process environment for tests.
    fn resolve(env_base_url: Option<String>, file: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(content) => serde_json::from_str(content)?,
            None => Self::default(),
        };
        if let Some(url) = env_base_url {
            config.base_url = url;
        }
        Ok(config)
    }
}

/// Returns the config file path (`~/.config/dimlog/config.json`).
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dimlog").join("config.json"))
}
