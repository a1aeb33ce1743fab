//! Validation errors raised while building records from untyped input

use thiserror::Error;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Malformed or incomplete input, detected before anything is stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The message every payload factory reports on bad input.
    pub fn invalid_json() -> Self {
        Self::new("Invalid JSON")
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}
