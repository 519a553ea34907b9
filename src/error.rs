//! Custom error types for spendwatch
//!
//! This module defines the error hierarchy for the alerting subsystem using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for spendwatch operations
#[derive(Error, Debug)]
pub enum SpendwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors (lock acquisition, file corruption)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Push gateway transport errors (send could not be attempted or
    /// returned no per-token outcomes)
    #[error("Gateway error: {0}")]
    Gateway(String),
}

impl SpendwatchError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
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
}

// Implement From traits for common error types

impl From<std::io::Error> for SpendwatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for spendwatch operations
pub type SpendwatchResult<T> = Result<T, SpendwatchError>;
