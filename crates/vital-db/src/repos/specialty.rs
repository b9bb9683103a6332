//! Specialty repository.

use vital_core::entities::{Specialty, SpecialtyInput};

use crate::ClinicService;
use crate::error::DatabaseError;

fn row_to_specialty(row: &libsql::Row) -> Result<Specialty, DatabaseError> {
    Ok(Specialty {
        id: row.get::<i64>(0)?,
        nombre: row.get::<String>(1)?,
        descripcion: row.get::<String>(2)?,
    })
}

impl ClinicService {
    /// Create a specialty from a validated input.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation fails, otherwise query errors.
    pub async fn create_specialty(
        &self,
        input: SpecialtyInput,
    ) -> Result<Specialty, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO especialidades (nombre, descripcion) VALUES (?1, ?2)",
                [input.nombre.as_str(), input.descripcion.as_str()],
            )
            .await?;
        Ok(input.into_specialty(self.db().last_insert_id()))
    }

    /// Fetch one specialty by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_specialty(&self, id: i64) -> Result<Specialty, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, nombre, descripcion FROM especialidades WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_specialty(&row),
            None => Err(DatabaseError::not_found("Especialidad", id)),
        }
    }

    /// All specialties ordered by id. Specialties have no list filters.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_specialties(&self) -> Result<Vec<Specialty>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, nombre, descripcion FROM especialidades ORDER BY id",
                (),
            )
            .await?;
        let mut specialties = Vec::new();
        while let Some(row) = rows.next().await? {
            specialties.push(row_to_specialty(&row)?);
        }
        Ok(specialties)
    }

    /// Replace every field of an existing specialty.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation fails.
    pub async fn update_specialty(
        &self,
        id: i64,
        input: SpecialtyInput,
    ) -> Result<Specialty, DatabaseError> {
        self.get_specialty(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        self.db()
            .conn()
            .execute(
                "UPDATE especialidades SET nombre = ?1, descripcion = ?2 WHERE id = ?3",
                (input.nombre.as_str(), input.descripcion.as_str(), id),
            )
            .await?;
        Ok(input.into_specialty(id))
    }

    /// Delete a specialty. Doctors in it (and their consultations,
    /// treatments, and prescriptions) go with it via cascade.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_specialty(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM especialidades WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Especialidad", id));
        }
        Ok(())
    }
}
