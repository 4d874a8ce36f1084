//! Domain error types
//!
//! This module defines the error hierarchy for metascrub. Errors carry
//! rendered messages rather than third-party error types so callers never
//! depend on the parsing or I/O crates underneath.

use thiserror::Error;

/// Main metascrub error type
///
/// The anonymising transform itself never fails; these errors belong to the
/// collaborators around it (configuration, file I/O, report rendering).
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input failed a precondition (missing folder, non-object document, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Location analysis errors
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        ScrubError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ScrubError {
    fn from(err: serde_json::Error) -> Self {
        ScrubError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ScrubError {
    fn from(err: serde_yaml::Error) -> Self {
        ScrubError::Serialization(format!("YAML error: {err}"))
    }
}

impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Configuration(format!("TOML parse error: {err}"))
    }
}
