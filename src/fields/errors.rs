//! Error type for field value coercion.
//!
//! Every failure here is a data rejection of one input value. There is a
//! single error kind carrying a human-readable message; no per-kind subtypes.

use thiserror::Error;

/// Result type for field coercion operations
pub type FieldResult<T> = Result<T, FieldValueError>;

/// A raw value was rejected by a field's coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldValueError {
    message: String,
}

impl FieldValueError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}
