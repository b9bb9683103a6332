//! # vital-db
//!
//! libSQL storage for the Salud Vital clinic records.
//!
//! Handles all relational state: specialties, patients, doctors,
//! consultations, treatments, medications, and prescriptions. Uniqueness and
//! cascade-delete semantics live in the schema; every connection enables
//! `PRAGMA foreign_keys` so parent deletes remove dependents transitively.

pub mod error;
pub mod filters;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

pub use service::ClinicService;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection; repository methods are
/// implemented on [`ClinicService`].
pub struct ClinicDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ClinicDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Enables foreign-key enforcement and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        tracing::debug!(path, "opening clinic database");
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Cascade deletes depend on this; it is per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let clinic_db = Self { db, conn };
        clinic_db.run_migrations().await?;
        Ok(clinic_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Id assigned by the most recent INSERT on this connection.
    #[must_use]
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> ClinicDb {
        ClinicDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "especialidades",
            "pacientes",
            "medicos",
            "consultas",
            "tratamientos",
            "medicamentos",
            "recetas",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [*table],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "table {table} missing"
            );
        }
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        // No especialidad with id 99 exists; the insert must be rejected.
        let result = db
            .conn()
            .execute(
                "INSERT INTO medicos (nombre, apellido, rut, correo, telefono, activo, especialidad_id)
                 VALUES ('Carla', 'Soto', '1-9', 'c@s.cl', '123', 1, 99)",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }
}
