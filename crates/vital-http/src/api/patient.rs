//! `/pacientes/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vital_core::entities::{Patient, PatientInput};
use vital_db::filters::PatientFilter;

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PatientFilter>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(state.list_patients(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<PatientInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let input = required(body)?;
    Ok((StatusCode::CREATED, Json(state.create_patient(input).await?)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.get_patient(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<PatientInput>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_patient(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let existing = state.get_patient(id).await?;
    let input: PatientInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_patient(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_patient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
