//! Shipment handlers

use super::json_body;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use freight_core::{Shipment, WeightAggregate};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Shipment>>, ApiError> {
    let shipments = state.shipments.list().await?;
    Ok(Json(shipments))
}

pub async fn get(
    State(state): State<AppState>,
    Path(reference_id): Path<String>,
) -> Result<Json<Shipment>, ApiError> {
    let shipment = state.shipments.get(&reference_id).await?;
    Ok(Json(shipment))
}

pub async fn missing_reference_id() -> ApiError {
    ApiError::BadRequest("Reference ID is required".to_string())
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Shipment>), ApiError> {
    let body = json_body(payload)?;
    let shipment = Shipment::from_json(&body).map_err(|e| ApiError::BadRequest(e.0))?;

    let outcome = state.shipments.upsert(shipment).await?;
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.into_inner())))
}

pub async fn aggregate_weight(
    State(state): State<AppState>,
    Path(unit): Path<String>,
) -> Result<Json<WeightAggregate>, ApiError> {
    let aggregate = state.shipments.aggregate_weight(&unit).await?;
    Ok(Json(aggregate))
}

pub async fn missing_unit() -> ApiError {
    ApiError::BadRequest("Unit is required".to_string())
}
