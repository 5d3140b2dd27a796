//! Error types and handling infrastructure for giflens.
//!
//! This module provides a centralized error type using `thiserror`. The binary wraps
//! it with `anyhow` for start-up context.
//!
//! Only start-up can fail in a user-visible way (configuration, terminal setup). Fetch
//! failures are produced here too, but the search path logs and swallows them.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for giflens operations.
#[derive(Error, Debug)]
pub enum GiflensError {
    /// File system related errors (config file unreadable, log file not creatable)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// No API key was supplied by any configuration layer
    #[error("Missing API key: set GIPHY_API_KEY, add api_key to the config file, or pass --api-key")]
    MissingApiKey,

    /// Configuration values that cannot be used
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// The search request could not be sent or returned an error status
    #[error("Network request failed: {message}")]
    NetworkError {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not a usable search payload
    #[error("Malformed search response: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for giflens operations.
pub type Result<T> = std::result::Result<T, GiflensError>;

impl GiflensError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::NetworkError {
            message: message.into(),
            source,
        }
    }

    pub fn decode(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::DecodeError {
            message: message.into(),
            source,
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// True for the errors a search request can end in.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::DecodeError { .. })
    }
}

impl From<std::io::Error> for GiflensError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/etc/giflens/config.toml");
        let not_found = GiflensError::ConfigNotFound { path };
        assert_eq!(
            not_found.to_string(),
            "Config file not found: /etc/giflens/config.toml"
        );

        let config_err = GiflensError::config("debounce_ms must be positive");
        assert_eq!(
            config_err.to_string(),
            "Configuration error: debounce_ms must be positive"
        );

        assert!(GiflensError::MissingApiKey
            .to_string()
            .starts_with("Missing API key"));
    }

    #[test]
    fn test_fetch_failure_classification() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(GiflensError::decode("not json", json_err).is_fetch_failure());
        assert!(!GiflensError::ui("resize failed").is_fetch_failure());
        assert!(!GiflensError::MissingApiKey.is_fetch_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: GiflensError = io_err.into();

        match err {
            GiflensError::FileError { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            _ => panic!("Expected FileError variant"),
        }
    }
}
