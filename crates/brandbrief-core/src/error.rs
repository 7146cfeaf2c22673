//! Error types for the Brandbrief application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Brandbrief application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BriefError {
    /// No resolvable user identity for the current request
    #[error("Unauthorized")]
    Unauthorized,

    /// Missing or malformed required input
    #[error("{message}")]
    Validation { message: String },

    /// Module identifier outside the registered set
    #[error("Unknown moduleId: '{id}'")]
    UnknownModule { id: String },

    /// Profile store read/write failure
    #[error("Store error: {0}")]
    Store(String),

    /// Generation backend call failure
    #[error("Generation error: {0}")]
    Generation(String),

    /// Device cache read/write failure (always non-fatal for callers)
    #[error("Cache error: {0}")]
    Cache(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BriefError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error with an arbitrary message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a Validation error naming a missing required field
    pub fn missing_field(field: &str) -> Self {
        Self::Validation {
            message: format!("{field} is required"),
        }
    }

    /// Creates an UnknownModule error
    pub fn unknown_module(id: impl Into<String>) -> Self {
        Self::UnknownModule { id: id.into() }
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Creates a Cache error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a client-visible validation failure.
    ///
    /// `UnknownModule` is a special case of validation: both are terminal,
    /// returned immediately, and never retried.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownModule { .. })
    }

    /// Check if this is a Store error
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Check if this is a Generation error
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    /// Check if this is a Cache error
    pub fn is_cache(&self) -> bool {
        matches!(self, Self::Cache(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BriefError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BriefError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for BriefError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, BriefError>`.
pub type Result<T> = std::result::Result<T, BriefError>;
