//! Patient repository.

use libsql::params_from_iter;
use vital_core::entities::{Patient, PatientInput};

use crate::ClinicService;
use crate::error::DatabaseError;
use crate::filters::PatientFilter;
use crate::helpers::{fmt_date, parse_date, parse_enum};

fn row_to_patient(row: &libsql::Row) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: row.get::<i64>(0)?,
        rut: row.get::<String>(1)?,
        nombre: row.get::<String>(2)?,
        apellido: row.get::<String>(3)?,
        fecha_nacimiento: parse_date(&row.get::<String>(4)?)?,
        tipo_sangre: parse_enum(&row.get::<String>(5)?)?,
        correo: row.get::<String>(6)?,
        telefono: row.get::<String>(7)?,
        direccion: row.get::<String>(8)?,
        activo: row.get::<i64>(9)? != 0,
    })
}

fn insert_params(input: &PatientInput) -> Vec<libsql::Value> {
    vec![
        input.rut.clone().into(),
        input.nombre.clone().into(),
        input.apellido.clone().into(),
        fmt_date(input.fecha_nacimiento).into(),
        input.tipo_sangre.as_str().into(),
        input.correo.clone().into(),
        input.telefono.clone().into(),
        input.direccion.clone().into(),
        i64::from(input.activo).into(),
    ]
}

impl ClinicService {
    /// Create a patient. `rut` must not collide with an existing patient.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation fails or the rut is taken.
    pub async fn create_patient(&self, input: PatientInput) -> Result<Patient, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_unique_rut("pacientes", "Paciente", &input.rut, None)
            .await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO pacientes (rut, nombre, apellido, fecha_nacimiento, tipo_sangre, correo, telefono, direccion, activo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params_from_iter(insert_params(&input)),
            )
            .await?;
        Ok(input.into_patient(self.db().last_insert_id()))
    }

    /// Fetch one patient by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_patient(&self, id: i64) -> Result<Patient, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, rut, nombre, apellido, fecha_nacimiento, tipo_sangre, correo, telefono, direccion, activo
                 FROM pacientes WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_patient(&row),
            None => Err(DatabaseError::not_found("Paciente", id)),
        }
    }

    /// Patients matching the filter, ordered by id. The `medico` filter
    /// joins through consultations and deduplicates.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_patients(
        &self,
        filter: &PatientFilter,
    ) -> Result<Vec<Patient>, DatabaseError> {
        let (sql, params) = filter.select_sql();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, params_from_iter(params))
            .await?;
        let mut patients = Vec::new();
        while let Some(row) = rows.next().await? {
            patients.push(row_to_patient(&row)?);
        }
        Ok(patients)
    }

    /// Replace every field of an existing patient. The rut uniqueness check
    /// skips the row being edited.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation fails.
    pub async fn update_patient(
        &self,
        id: i64,
        input: PatientInput,
    ) -> Result<Patient, DatabaseError> {
        self.get_patient(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_unique_rut("pacientes", "Paciente", &input.rut, Some(id))
            .await?;
        let mut params = insert_params(&input);
        params.push(id.into());
        self.db()
            .conn()
            .execute(
                "UPDATE pacientes
                 SET rut = ?1, nombre = ?2, apellido = ?3, fecha_nacimiento = ?4, tipo_sangre = ?5,
                     correo = ?6, telefono = ?7, direccion = ?8, activo = ?9
                 WHERE id = ?10",
                params_from_iter(params),
            )
            .await?;
        Ok(input.into_patient(id))
    }

    /// Delete a patient and, via cascade, their consultations, treatments,
    /// and prescriptions.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_patient(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM pacientes WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Paciente", id));
        }
        Ok(())
    }
}
