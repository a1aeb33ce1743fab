//! Freight Types - Record definitions for the freight registry
//!
//! This crate contains only pure data types and their validating factories,
//! with no async runtime or storage dependencies.

pub mod error;
pub mod organization;
pub mod shipment;
pub mod weight;

pub use error::{ValidationError, ValidationResult};
pub use organization::*;
pub use shipment::*;
pub use weight::*;

use serde_json::Value;

/// Read an optional string field from a JSON object.
///
/// Absent and `null` fields yield `Ok(None)`; any other non-string value is
/// rejected.
pub(crate) fn optional_str(json: &Value, field: &str) -> ValidationResult<Option<String>> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::invalid_json()),
    }
}

/// Read a string field that must be present and non-empty.
pub(crate) fn required_str(json: &Value, field: &str) -> ValidationResult<String> {
    match optional_str(json, field)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::invalid_json()),
    }
}
