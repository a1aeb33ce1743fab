//! Organization handlers

use super::json_body;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use freight_core::Organization;
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Organization>>, ApiError> {
    let organizations = state.organizations.list().await?;
    Ok(Json(organizations))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>, ApiError> {
    let organization = state.organizations.get(&id).await?;
    Ok(Json(organization))
}

/// `GET /organizations/` with nothing after the slash
pub async fn missing_id() -> ApiError {
    ApiError::BadRequest("ID is required".to_string())
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Organization>), ApiError> {
    let body = json_body(payload)?;
    let organization = Organization::from_json(&body).map_err(|e| ApiError::BadRequest(e.0))?;

    let outcome = state.organizations.upsert(organization).await?;
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.into_inner())))
}
