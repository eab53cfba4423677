//! Connection settings for the QVM endpoint.
//!
//! Settings are read from a YAML file holding one mapping per named section:
//!
//! ```yaml
//! qvm_conn:
//!   endpoint: https://qvm.example.org/api/execute
//!   user_id: alice
//!   api_key: secret
//! ```
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`KMQC_ENDPOINT`, `KMQC_USER_ID`, `KMQC_API_KEY`),
//!    including those loaded from a `.env` file
//! 2. The selected section of the configuration file

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Section read when none is given.
pub const DEFAULT_SECTION: &str = "qvm_conn";

/// Environment variable overriding the endpoint URL.
pub const ENV_ENDPOINT: &str = "KMQC_ENDPOINT";
/// Environment variable overriding the user id.
pub const ENV_USER_ID: &str = "KMQC_USER_ID";
/// Environment variable overriding the API key.
pub const ENV_API_KEY: &str = "KMQC_API_KEY";

/// Endpoint and credentials for one QVM connection.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Absolute URL programs are posted to.
    #[serde(default)]
    pub endpoint: String,

    /// Sent as `X-User-Id`.
    #[serde(default)]
    pub user_id: String,

    /// Sent as `X-Api-Key`.
    #[serde(default)]
    pub api_key: String,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("user_id", &self.user_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ConnectionConfig {
    /// Build a config from explicit values.
    pub fn new(
        endpoint: impl Into<String>,
        user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_id: user_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Load and validate one section of a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P, section: &str) -> Result<Self, ConfigError> {
        let config = Self::read_section(path.as_ref(), section)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment overrides:
    /// 1. Load .env file if it exists
    /// 2. Read the section from the file, if one is given
    /// 3. Apply environment variable overrides
    pub fn load(path: Option<&Path>, section: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match path {
            Some(path) => Self::read_section(path, section)?,
            None => Self::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    fn read_section(path: &Path, section: &str) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let mut sections: HashMap<String, serde_yaml_ng::Value> =
            serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let value = sections
            .remove(section)
            .ok_or_else(|| ConfigError::MissingSection(section.to_string()))?;

        debug!("Loaded section {} from {}", section, path.display());
        serde_yaml_ng::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn merge_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override fields for every key `lookup` resolves.
    ///
    /// Keys are [`ENV_ENDPOINT`], [`ENV_USER_ID`] and [`ENV_API_KEY`].
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_ENDPOINT) {
            self.endpoint = v;
        }
        if let Some(v) = lookup(ENV_USER_ID) {
            self.user_id = v;
        }
        if let Some(v) = lookup(ENV_API_KEY) {
            self.api_key = v;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::Validation(format!("Invalid endpoint '{}': {e}", self.endpoint))
        })?;

        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(ConfigError::Validation(format!(
                "Endpoint must be an absolute http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        if self.user_id.trim().is_empty() {
            return Err(ConfigError::Validation("user_id must not be empty".into()));
        }

        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Validation("api_key must not be empty".into()));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing config section: {0}")]
    MissingSection(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
