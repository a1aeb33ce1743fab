//! Error types for the freight registry

use freight_types::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FreightError>;

#[derive(Error, Debug)]
pub enum FreightError {
    /// Lookup found nothing. The message names the key.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or incomplete input.
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FreightError {
    pub fn primary_key_not_found(key: &str) -> Self {
        FreightError::NotFound(format!("Object with primary key {} not found.", key))
    }

    pub fn field_not_found(field: &str, value: &str) -> Self {
        FreightError::NotFound(format!(
            "Object with field {} and value {} not found.",
            field, value
        ))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FreightError::NotFound(_))
    }
}

impl From<ValidationError> for FreightError {
    fn from(e: ValidationError) -> Self {
        FreightError::Validation(e.0)
    }
}

impl From<serde_json::Error> for FreightError {
    fn from(e: serde_json::Error) -> Self {
        FreightError::Serialization(e.to_string())
    }
}
