//! Error types for Masonry.
//!
//! This module provides the unified error type used throughout the crate.
//! Layout and animation paths are mostly infallible by construction; errors
//! surface only when inputs are rejected (bad item lists, bad media queries)
//! or when the CLI touches the filesystem.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Masonry operations.
pub type MasonryResult<T> = Result<T, MasonryError>;

/// Errors that can occur while driving the masonry engine or its CLI.
///
/// Serializes as `{ "kind": ..., "message": ... }` so CLI callers asking for
/// JSON output get structured error information.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum MasonryError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// An item list failed validation (duplicate id, bad height).
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    /// A breakpoint media query could not be parsed.
    #[error("Invalid media query: {0}")]
    InvalidMediaQuery(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// An input file could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for MasonryError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for MasonryError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err.to_string()) }
}

impl From<crate::config::ConfigError> for MasonryError {
    fn from(err: crate::config::ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<String> for MasonryError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for MasonryError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_item_display() {
        let err = MasonryError::InvalidItem("duplicate id `3`".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid item"));
        assert!(msg.contains("duplicate id `3`"));
    }

    #[test]
    fn test_invalid_media_query_display() {
        let err = MasonryError::InvalidMediaQuery("(orientation: portrait)".to_string());
        assert!(err.to_string().contains("Invalid media query"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MasonryError = io_err.into();
        assert!(matches!(err, MasonryError::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_json_error_becomes_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MasonryError = json_err.into();
        assert!(matches!(err, MasonryError::ParseError(_)));
    }

    #[test]
    fn test_command_error_display() {
        let err = MasonryError::CommandError("Generic failure".to_string());
        assert_eq!(err.to_string(), "Generic failure");
    }

    #[test]
    fn test_from_str() {
        let err: MasonryError = "test error".into();
        assert!(matches!(err, MasonryError::CommandError(_)));
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let err = MasonryError::InvalidItem("negative height".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("InvalidItem"));
        assert!(json.contains("negative height"));
    }
}
