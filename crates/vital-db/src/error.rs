//! Database error types for vital-db.

use thiserror::Error;
use vital_core::errors::FieldErrors;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Referenced identifier has no matching record.
    #[error("{entity} con id {id} no existe")]
    NotFound { entity: &'static str, id: i64 },

    /// A store-backed validation check failed (uniqueness, referenced-record
    /// existence). Carries the field → message map the handler layers
    /// surface.
    #[error("Validación fallida: {0}")]
    Invalid(FieldErrors),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid(FieldErrors::single(field, message))
    }
}
