//! HTTP error type and status mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use vital_core::errors::FieldErrors;
use vital_db::error::DatabaseError;

/// Error type returned by every handler.
///
/// Validation failures carry the field → message map and render as a 400
/// with that map as the body. Everything non-client-caused collapses into
/// `Internal` and renders as an opaque 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validación fallida: {0}")]
    Validation(FieldErrors),

    /// Malformed request body outside the field-validation path.
    #[error("{0}")]
    BadRequest(String),

    /// The body failed extraction before reaching validation. Keeps the
    /// status axum assigns (422 for type errors, 400 for syntax, 415 for
    /// a missing content type) but renders the same JSON shape as every
    /// other error.
    #[error("{detail}")]
    Rejection { status: StatusCode, detail: String },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejection {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Invalid(errors) => Self::Validation(errors),
            DatabaseError::NotFound { .. } => Self::NotFound(err.to_string()),
            other => Self::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            Self::Rejection { status, detail } => {
                (status, Json(json!({ "detail": detail }))).into_response()
            }
            Self::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "unhandled error in request handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Error interno del servidor." })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_invalid_maps_to_validation() {
        let err: ApiError = DatabaseError::Invalid(FieldErrors::single("rut", "tomado")).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn database_not_found_keeps_its_message() {
        let err: ApiError = DatabaseError::NotFound {
            entity: "Paciente",
            id: 7,
        }
        .into();
        match err {
            ApiError::NotFound(detail) => assert_eq!(detail, "Paciente con id 7 no existe"),
            other => panic!("expected NotFound, got {other}"),
        }
    }
}
