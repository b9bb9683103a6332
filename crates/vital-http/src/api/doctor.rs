//! `/medicos/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vital_core::entities::{Doctor, DoctorInput};
use vital_db::filters::DoctorFilter;

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<DoctorFilter>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    Ok(Json(state.list_doctors(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<DoctorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let input = required(body)?;
    Ok((StatusCode::CREATED, Json(state.create_doctor(input).await?)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Doctor>, ApiError> {
    Ok(Json(state.get_doctor(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<DoctorInput>, JsonRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_doctor(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let existing = state.get_doctor(id).await?;
    let input: DoctorInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_doctor(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_doctor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
