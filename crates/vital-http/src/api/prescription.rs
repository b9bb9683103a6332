//! `/recetas/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vital_core::entities::{Prescription, PrescriptionInput};
use vital_db::filters::PrescriptionFilter;

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PrescriptionFilter>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    Ok(Json(state.list_prescriptions(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<PrescriptionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Prescription>), ApiError> {
    let input = required(body)?;
    Ok((
        StatusCode::CREATED,
        Json(state.create_prescription(input).await?),
    ))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Prescription>, ApiError> {
    Ok(Json(state.get_prescription(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<PrescriptionInput>, JsonRejection>,
) -> Result<Json<Prescription>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_prescription(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Prescription>, ApiError> {
    let existing = state.get_prescription(id).await?;
    let input: PrescriptionInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_prescription(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_prescription(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
