//! HTTP handlers

pub mod health;
pub mod organizations;
pub mod shipments;

pub use health::health;

use crate::error::ApiError;
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

/// Unwrap a JSON body, reporting any parse failure as "Invalid JSON".
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection.body_text());
            Err(ApiError::invalid_json())
        }
    }
}
