//! Mapping from domain errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use freight_core::FreightError;
use serde_json::json;
use thiserror::Error;

/// Error returned by every handler, rendered as `{"message": ...}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_json() -> Self {
        ApiError::BadRequest("Invalid JSON".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FreightError> for ApiError {
    fn from(e: FreightError) -> Self {
        match e {
            FreightError::NotFound(message) => ApiError::NotFound(message),
            FreightError::Validation(message) => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(message) => tracing::error!("Request failed: {}", message),
            other => tracing::warn!("Request rejected ({}): {}", status, other),
        }

        let body = Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
