//! `/consultas/` JSON handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vital_core::entities::{Consultation, ConsultationInput};
use vital_db::filters::ConsultationFilter;

use super::{merge_into, required};
use crate::AppState;
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ConsultationFilter>,
) -> Result<Json<Vec<Consultation>>, ApiError> {
    Ok(Json(state.list_consultations(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ConsultationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Consultation>), ApiError> {
    let input = required(body)?;
    Ok((
        StatusCode::CREATED,
        Json(state.create_consultation(input).await?),
    ))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Consultation>, ApiError> {
    Ok(Json(state.get_consultation(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ConsultationInput>, JsonRejection>,
) -> Result<Json<Consultation>, ApiError> {
    let input = required(body)?;
    Ok(Json(state.update_consultation(id, input).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Consultation>, ApiError> {
    let existing = state.get_consultation(id).await?;
    let input: ConsultationInput = merge_into(&existing, required(body)?)?;
    Ok(Json(state.update_consultation(id, input).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.delete_consultation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
