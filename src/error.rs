//! Custom error types for caja-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for caja-cli operations
#[derive(Error, Debug)]
pub enum CajaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Document store rejected or failed an operation.
    ///
    /// `transient` distinguishes "store unavailable, retry later" from
    /// permanent rejections (bad collection, malformed document).
    #[error("Store error: {message}")]
    Store { message: String, transient: bool },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl CajaError {
    /// Create a "not found" error for movements
    pub fn movement_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Movement",
            identifier: identifier.into(),
        }
    }

    /// Create a transient store error (network/store unavailable)
    pub fn store_transient(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            transient: true,
        }
    }

    /// Create a permanent store error
    pub fn store_permanent(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            transient: false,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store { transient: true, .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CajaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CajaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for caja-cli operations
pub type CajaResult<T> = Result<T, CajaError>;
