//! `/especialidades/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use vital_core::entities::{Specialty, SpecialtyInput};

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Specialty>>, ApiError> {
    Ok(Json(state.list_specialties().await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<SpecialtyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Specialty>), ApiError> {
    let input = required(body)?;
    Ok((StatusCode::CREATED, Json(state.create_specialty(input).await?)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Specialty>, ApiError> {
    Ok(Json(state.get_specialty(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<SpecialtyInput>, JsonRejection>,
) -> Result<Json<Specialty>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_specialty(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Specialty>, ApiError> {
    let existing = state.get_specialty(id).await?;
    let input: SpecialtyInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_specialty(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_specialty(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
