//! `/tratamientos/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vital_core::entities::{Treatment, TreatmentInput};
use vital_db::filters::TreatmentFilter;

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TreatmentFilter>,
) -> Result<Json<Vec<Treatment>>, ApiError> {
    Ok(Json(state.list_treatments(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TreatmentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Treatment>), ApiError> {
    let input = required(body)?;
    Ok((StatusCode::CREATED, Json(state.create_treatment(input).await?)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Treatment>, ApiError> {
    Ok(Json(state.get_treatment(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<TreatmentInput>, JsonRejection>,
) -> Result<Json<Treatment>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_treatment(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Treatment>, ApiError> {
    let existing = state.get_treatment(id).await?;
    let input: TreatmentInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_treatment(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_treatment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
