//! Error types for Newschat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Normalized remote-service failure
///
/// Every transport or HTTP failure is reduced to this shape once, at the
/// service-client boundary, before it reaches session state or callers.
/// The `message` is user-presentable; `status` and `details` carry the
/// underlying HTTP status and response body when available.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// User-presentable description of the failure
    pub message: String,
    /// HTTP status code, when the failure came from a response
    pub status: Option<u16>,
    /// Raw response body, when one was received and parseable as JSON
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create an error carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            details: None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Main error type for Newschat operations
///
/// This enum encompasses all possible errors that can occur during
/// session management, remote service calls, configuration loading,
/// and durable pointer storage.
#[derive(Error, Debug)]
pub enum NewschatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Normalized remote-service errors (transport, HTTP, body parsing)
    #[error("{0}")]
    Api(ApiError),

    /// Session pointer storage errors (embedded database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Session state errors (invalid operation for current state)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors that escaped normalization
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Newschat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = NewschatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_api_error_display_uses_message_only() {
        let error = NewschatError::Api(ApiError {
            message: "Server error. Please try again later.".to_string(),
            status: Some(500),
            details: None,
        });
        assert_eq!(error.to_string(), "Server error. Please try again later.");
    }

    #[test]
    fn test_api_error_message_constructor() {
        let error = ApiError::message("boom");
        assert_eq!(error.message, "boom");
        assert!(error.status.is_none());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_storage_error_display() {
        let error = NewschatError::Storage("database unavailable".to_string());
        assert_eq!(error.to_string(), "Storage error: database unavailable");
    }

    #[test]
    fn test_session_error_display() {
        let error = NewschatError::Session("no active session".to_string());
        assert_eq!(error.to_string(), "Session error: no active session");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: NewschatError = io_error.into();
        assert!(matches!(error, NewschatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: NewschatError = json_error.into();
        assert!(matches!(error, NewschatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: NewschatError = yaml_error.into();
        assert!(matches!(error, NewschatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NewschatError>();
        assert_send_sync::<ApiError>();
    }
}
