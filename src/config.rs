//! Stored configuration for the CLI.
//!
//! The library treats credentials as opaque inputs; this module is the
//! credential store the CLI resolves them from. Resolution order is
//! explicit flag, then environment, then the config file.

use crate::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable carrying the API key.
pub const API_KEY_ENV: &str = "CHILDSAFE_API_KEY";

/// Environment variable carrying a base URL override.
pub const BASE_URL_ENV: &str = "CHILDSAFE_BASE_URL";

/// On-disk CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    /// API key, if one has been stored.
    pub api_key: Option<String>,

    /// Service base URL.
    pub base_url: String,
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl StoredConfig {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: StoredConfig = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("childsafe")
            .join("config.json")
    }

    /// Resolve the API key from an explicit flag, the environment, or
    /// the stored configuration.
    pub fn resolve_key(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| std::env::var(API_KEY_ENV).ok())
            .or_else(|| self.api_key.clone())
    }

    /// Resolve the base URL from an explicit flag, the environment, or
    /// the stored configuration.
    pub fn resolve_base_url(&self, flag: Option<String>) -> String {
        flag.or_else(|| std::env::var(BASE_URL_ENV).ok())
            .unwrap_or_else(|| self.base_url.clone())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoredConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_flag_takes_precedence_over_file() {
        let config = StoredConfig {
            api_key: Some("stored-key".to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        };

        let resolved = config.resolve_key(Some("flag-key".to_string()));
        assert_eq!(resolved, Some("flag-key".to_string()));
    }

    #[test]
    fn test_stored_key_used_without_flag() {
        let config = StoredConfig {
            api_key: Some("stored-key".to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        };

        // The environment variable is unset in the test environment.
        if std::env::var(API_KEY_ENV).is_err() {
            assert_eq!(config.resolve_key(None), Some("stored-key".to_string()));
        }
    }

    #[test]
    fn test_config_round_trip_serialization() {
        let config = StoredConfig {
            api_key: Some("abc123".to_string()),
            base_url: "http://127.0.0.1:9000".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: StoredConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api_key, config.api_key);
        assert_eq!(parsed.base_url, config.base_url);
    }
}
