use core::result::Result as CoreResult;
use std::io::Error as IoError;

use serde_json::Error as SerdeJsonError;
use thiserror::Error as ThisError;
use toml::de::Error as TomlError;

/// Result type for core operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, ThisError)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A backend invocation failed.
    #[error("Invoker error: {0}")]
    Invoker(String),

    /// The invocation exceeded its deadline.
    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// A backend returned a response that could not be interpreted.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Determines whether this error may succeed if retried.
    ///
    /// Returns `true` for transient conditions like invocation failures
    /// or elapsed deadlines.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Invoker(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::Config("invalid config".to_owned());
        assert_eq!(error.to_string(), "Configuration error: invalid config");

        let error = Error::Invoker("backend failed".to_owned());
        assert_eq!(error.to_string(), "Invoker error: backend failed");

        let error = Error::Timeout(3000);
        assert_eq!(error.to_string(), "Timeout after 3000ms");
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(Error::Invoker("connection reset".to_owned()).is_retryable());
        assert!(Error::Timeout(100).is_retryable());

        assert!(!Error::Config("bad config".to_owned()).is_retryable());
        assert!(!Error::MissingApiKey("KEY".to_owned()).is_retryable());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = IoError::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
