//! Configuration management for Newschat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{NewschatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Newschat
///
/// Holds all configuration needed for the chat client: the remote service
/// endpoint settings and interactive chat behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote chatbot service configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Interactive chat configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Remote chatbot service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the chatbot service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    ///
    /// The service performs retrieval and model inference per query, so the
    /// bound is generous. There is no automatic retry; all retries are
    /// explicit user actions.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum length of a single user message in characters
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

fn default_max_message_chars() -> usize {
    2000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// Missing files are not an error; defaults are used so the client can
    /// run against a locally configured service out of the box.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NewschatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| NewschatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("NEWSCHAT_API_BASE") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("NEWSCHAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid NEWSCHAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_base) = &cli.api_base {
            self.api.base_url = api_base.clone();
        }
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(NewschatError::Config("api.base_url cannot be empty".to_string()).into());
        }

        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(NewschatError::Config(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(NewschatError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.max_message_chars == 0 {
            return Err(NewschatError::Config(
                "chat.max_message_chars must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_seconds, 300);
        assert_eq!(config.chat.max_message_chars, 2000);
    }

    #[test]
    fn test_parse_minimal_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("api:\n  base_url: https://example.com\n")
            .expect("parse failed");
        assert_eq!(config.api.base_url, "https://example.com");
        assert_eq!(config.api.timeout_seconds, 300);
        assert_eq!(config.chat.max_message_chars, 2000);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
api:
  base_url: https://chat.example.com
  timeout_seconds: 60
chat:
  max_message_chars: 500
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("parse failed");
        assert_eq!(config.api.base_url, "https://chat.example.com");
        assert_eq!(config.api.timeout_seconds, 60);
        assert_eq!(config.chat.max_message_chars, 500);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_message_limit() {
        let mut config = Config::default();
        config.chat.max_message_chars = 0;
        assert!(config.validate().is_err());
    }
}
