//! # Error Types for Serendip
//!
//! Unified error handling across the Serendip crates.
//!
//! Only two conditions are fatal to a sampling call: an unknown method and
//! an embedding provider that cannot be loaded. Unknown seed words, empty
//! filter results and duplicate interests are handled where they occur and
//! never show up here.

use thiserror::Error;

/// Main error type for Serendip operations
#[derive(Error, Debug)]
pub enum SerendipError {
    /// Unrecognized sampling method name
    #[error("Unknown sampling method: {0} (expected pure_random, walk or interpolate)")]
    InvalidMethod(String),

    /// Embedding provider failed to load or answer
    #[error("Embedding provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider returned no neighbors at all
    #[error("No candidates returned by nearest-neighbor search")]
    NoCandidates,

    /// Not enough acceptable words to interpolate between
    #[error("Interpolation needs {needed} acceptable words, vocabulary pool has {found}")]
    InsufficientVocabulary { needed: usize, found: usize },

    /// Vector length does not match the provider's dimension
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Out-of-range argument (probabilities, noise scales)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for Serendip operations
pub type SerendipResult<T> = Result<T, SerendipError>;

impl From<serde_json::Error> for SerendipError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl SerendipError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Provider and IO failures depend on the environment; everything else
    /// is a property of the request.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_method_message_names_method() {
        let err = SerendipError::InvalidMethod("zigzag".into());
        assert!(err.to_string().contains("zigzag"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SerendipError = io.into();
        assert!(matches!(err, SerendipError::Io(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SerendipError = parse.into();
        assert!(matches!(err, SerendipError::Serialization(_)));
    }
}
