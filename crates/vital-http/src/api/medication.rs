//! `/medicamentos/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vital_core::entities::{Medication, MedicationInput};
use vital_db::filters::MedicationFilter;

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<MedicationFilter>,
) -> Result<Json<Vec<Medication>>, ApiError> {
    Ok(Json(state.list_medications(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<MedicationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let input = required(body)?;
    Ok((
        StatusCode::CREATED,
        Json(state.create_medication(input).await?),
    ))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Medication>, ApiError> {
    Ok(Json(state.get_medication(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<MedicationInput>, JsonRejection>,
) -> Result<Json<Medication>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_medication(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Medication>, ApiError> {
    let existing = state.get_medication(id).await?;
    let input: MedicationInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_medication(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_medication(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
