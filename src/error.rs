//! Error types for Pollr
//!
//! Centralized error handling using thiserror.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failure kinds a query attempt can report.
///
/// The classification policy matches on this tag to decide whether a failed
/// attempt is tolerated (retried) or fatal (aborts the execution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The thing being checked does not exist yet
    NotFound,
    /// A previously valid handle went stale between lookup and use
    Stale,
    /// The external system is temporarily unavailable
    Unavailable,
    /// Malformed input or misuse of the API
    Invalid,
    /// Unexpected failure inside the external system
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Stale => write!(f, "stale"),
            ErrorKind::Unavailable => write!(f, "unavailable"),
            ErrorKind::Invalid => write!(f, "invalid"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

/// Error raised by a single query attempt.
///
/// Carries a kind tag for classification plus a human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct AttemptError {
    kind: ErrorKind,
    message: String,
}

impl AttemptError {
    /// Create an attempt error with an explicit kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The thing being checked does not exist yet.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// A previously valid handle went stale.
    pub fn stale(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Stale, message)
    }

    /// The external system is temporarily unavailable.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Malformed input or misuse of the API.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, message)
    }

    /// Unexpected failure inside the external system.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// The kind tag used for classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Infrastructure errors that can occur outside the retry loop itself
#[derive(Debug, Error)]
pub enum PollrError {
    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Pollr operations
pub type Result<T> = std::result::Result<T, PollrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::Stale.to_string(), "stale");
        assert_eq!(ErrorKind::Unavailable.to_string(), "unavailable");
        assert_eq!(ErrorKind::Invalid.to_string(), "invalid");
        assert_eq!(ErrorKind::Internal.to_string(), "internal");
    }

    #[test]
    fn test_attempt_error_display() {
        let err = AttemptError::not_found("no element matching #login");
        assert_eq!(err.to_string(), "not_found: no element matching #login");
    }

    #[test]
    fn test_attempt_error_kind() {
        assert_eq!(AttemptError::stale("x").kind(), ErrorKind::Stale);
        assert_eq!(AttemptError::invalid("x").kind(), ErrorKind::Invalid);
        assert_eq!(
            AttemptError::new(ErrorKind::Unavailable, "x").kind(),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn test_attempt_error_message() {
        let err = AttemptError::internal("driver crashed");
        assert_eq!(err.message(), "driver crashed");
    }

    #[test]
    fn test_error_kind_serialization() {
        let yaml = serde_yaml::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(yaml.trim(), "not_found");

        let kind: ErrorKind = serde_yaml::from_str("stale").unwrap();
        assert_eq!(kind, ErrorKind::Stale);
    }

    #[test]
    fn test_config_error_display() {
        let err = PollrError::Config("timeout_ms must be non-zero".to_string());
        assert_eq!(err.to_string(), "Config error: timeout_ms must be non-zero");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PollrError = io_err.into();
        assert!(matches!(err, PollrError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<ErrorKind>("{ not: [valid").unwrap_err();
        let err: PollrError = yaml_err.into();
        assert!(matches!(err, PollrError::Yaml(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_ok().unwrap(), 42);
    }
}
