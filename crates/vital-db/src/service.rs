//! Service wrapper hosting all repository methods.
//!
//! `ClinicService` owns the database handle; every repo file adds its
//! entity's methods as `impl ClinicService`. Store-backed validation checks
//! (uniqueness, referenced-record existence) live here so each repo runs
//! them before writing.

use crate::ClinicDb;
use crate::error::DatabaseError;

pub struct ClinicService {
    db: ClinicDb,
}

impl ClinicService {
    /// Open a service over a local database (`":memory:"` for tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = ClinicDb::open_local(path).await?;
        Ok(Self { db })
    }

    /// Create from an existing handle.
    #[must_use]
    pub const fn from_db(db: ClinicDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ClinicDb {
        &self.db
    }

    /// Error unless `id` exists in `table`. `field` names the input field
    /// the failure is reported against.
    pub(crate) async fn ensure_reference(
        &self,
        table: &'static str,
        field: &'static str,
        id: i64,
    ) -> Result<(), DatabaseError> {
        let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
        let mut rows = self.db.conn().query(&sql, [id]).await?;
        if rows.next().await?.is_none() {
            return Err(DatabaseError::invalid(
                field,
                format!("Clave primaria {id} inválida: el objeto no existe."),
            ));
        }
        Ok(())
    }

    /// Error if another row in `table` already holds `rut`. On update,
    /// `exclude_id` skips the row being edited.
    pub(crate) async fn ensure_unique_rut(
        &self,
        table: &'static str,
        entity_label: &str,
        rut: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), DatabaseError> {
        let (sql, params): (String, Vec<libsql::Value>) = match exclude_id {
            Some(id) => (
                format!("SELECT 1 FROM {table} WHERE rut = ?1 AND id != ?2"),
                vec![rut.into(), id.into()],
            ),
            None => (
                format!("SELECT 1 FROM {table} WHERE rut = ?1"),
                vec![rut.into()],
            ),
        };
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        if rows.next().await?.is_some() {
            return Err(DatabaseError::invalid(
                "rut",
                format!("Ya existe {entity_label} con este Rut."),
            ));
        }
        Ok(())
    }
}
