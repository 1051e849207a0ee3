//! Dashboard configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Collection endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0:?}")]
    InvalidEndpoint(String),

    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL of the source user collection
    pub endpoint: String,
    /// Per-request timeout for the initial load
    pub request_timeout_ms: u64,
    /// `tracing` filter directive, e.g. `"info"` or `"jarurat_core=debug"`
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: 10_000,
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"endpoint": "http://localhost:8080/users"}"#;
        let config = DashboardConfig::from_json_str(json).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/users");
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            DashboardConfig::from_json_str(r#"{"endpoint": "ftp://x"}"#),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json_str(r#"{"request_timeout_ms": 0}"#),
            Err(ConfigError::InvalidTimeout)
        ));
        assert!(matches!(
            DashboardConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
