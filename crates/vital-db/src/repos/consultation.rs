//! Consultation repository.

use libsql::params_from_iter;
use vital_core::entities::{Consultation, ConsultationInput};

use crate::ClinicService;
use crate::error::DatabaseError;
use crate::filters::ConsultationFilter;
use crate::helpers::{fmt_datetime, parse_datetime, parse_enum};

fn row_to_consultation(row: &libsql::Row) -> Result<Consultation, DatabaseError> {
    Ok(Consultation {
        id: row.get::<i64>(0)?,
        paciente: row.get::<i64>(1)?,
        medico: row.get::<i64>(2)?,
        fecha_consulta: parse_datetime(&row.get::<String>(3)?)?,
        motivo: row.get::<String>(4)?,
        diagnostico: row.get::<String>(5)?,
        estado: parse_enum(&row.get::<String>(6)?)?,
    })
}

fn insert_params(input: &ConsultationInput) -> Vec<libsql::Value> {
    vec![
        input.paciente.into(),
        input.medico.into(),
        fmt_datetime(input.fecha_consulta).into(),
        input.motivo.clone().into(),
        input.diagnostico.clone().into(),
        input.estado.as_str().into(),
    ]
}

impl ClinicService {
    /// Create a consultation. Both the patient and the doctor must exist.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation or a reference check fails.
    pub async fn create_consultation(
        &self,
        input: ConsultationInput,
    ) -> Result<Consultation, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_reference("pacientes", "paciente", input.paciente)
            .await?;
        self.ensure_reference("medicos", "medico", input.medico)
            .await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO consultas (paciente_id, medico_id, fecha_consulta, motivo, diagnostico, estado)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params_from_iter(insert_params(&input)),
            )
            .await?;
        Ok(input.into_consultation(self.db().last_insert_id()))
    }

    /// Fetch one consultation by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_consultation(&self, id: i64) -> Result<Consultation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, paciente_id, medico_id, fecha_consulta, motivo, diagnostico, estado
                 FROM consultas WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_consultation(&row),
            None => Err(DatabaseError::not_found("Consulta", id)),
        }
    }

    /// Consultations matching the filter, ordered by id. Both range bounds
    /// are inclusive.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_consultations(
        &self,
        filter: &ConsultationFilter,
    ) -> Result<Vec<Consultation>, DatabaseError> {
        let (sql, params) = filter.select_sql();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, params_from_iter(params))
            .await?;
        let mut consultations = Vec::new();
        while let Some(row) = rows.next().await? {
            consultations.push(row_to_consultation(&row)?);
        }
        Ok(consultations)
    }

    /// Replace every field of an existing consultation.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation or a
    /// reference check fails.
    pub async fn update_consultation(
        &self,
        id: i64,
        input: ConsultationInput,
    ) -> Result<Consultation, DatabaseError> {
        self.get_consultation(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_reference("pacientes", "paciente", input.paciente)
            .await?;
        self.ensure_reference("medicos", "medico", input.medico)
            .await?;
        let mut params = insert_params(&input);
        params.push(id.into());
        self.db()
            .conn()
            .execute(
                "UPDATE consultas
                 SET paciente_id = ?1, medico_id = ?2, fecha_consulta = ?3, motivo = ?4,
                     diagnostico = ?5, estado = ?6
                 WHERE id = ?7",
                params_from_iter(params),
            )
            .await?;
        Ok(input.into_consultation(id))
    }

    /// Delete a consultation and, via cascade, its treatments and their
    /// prescriptions.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_consultation(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM consultas WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Consulta", id));
        }
        Ok(())
    }
}
