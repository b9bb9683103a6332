//! Treatment repository.

use libsql::params_from_iter;
use vital_core::entities::{Treatment, TreatmentInput};

use crate::ClinicService;
use crate::error::DatabaseError;
use crate::filters::TreatmentFilter;
use crate::helpers::get_opt_string;

fn row_to_treatment(row: &libsql::Row) -> Result<Treatment, DatabaseError> {
    Ok(Treatment {
        id: row.get::<i64>(0)?,
        consulta: row.get::<i64>(1)?,
        descripcion: row.get::<String>(2)?,
        duracion_dias: row.get::<i64>(3)?,
        observaciones: get_opt_string(row, 4)?,
    })
}

fn insert_params(input: &TreatmentInput) -> Vec<libsql::Value> {
    vec![
        input.consulta.into(),
        input.descripcion.clone().into(),
        input.duracion_dias.into(),
        input
            .observaciones
            .clone()
            .map_or(libsql::Value::Null, libsql::Value::from),
    ]
}

impl ClinicService {
    /// Create a treatment. The consultation must exist.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation or the reference check fails.
    pub async fn create_treatment(&self, input: TreatmentInput) -> Result<Treatment, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_reference("consultas", "consulta", input.consulta)
            .await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO tratamientos (consulta_id, descripcion, duracion_dias, observaciones)
                 VALUES (?1, ?2, ?3, ?4)",
                params_from_iter(insert_params(&input)),
            )
            .await?;
        Ok(input.into_treatment(self.db().last_insert_id()))
    }

    /// Fetch one treatment by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_treatment(&self, id: i64) -> Result<Treatment, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, consulta_id, descripcion, duracion_dias, observaciones
                 FROM tratamientos WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_treatment(&row),
            None => Err(DatabaseError::not_found("Tratamiento", id)),
        }
    }

    /// Treatments matching the filter, ordered by id. The `medico` and
    /// `paciente` filters join through the owning consultation.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_treatments(
        &self,
        filter: &TreatmentFilter,
    ) -> Result<Vec<Treatment>, DatabaseError> {
        let (sql, params) = filter.select_sql();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, params_from_iter(params))
            .await?;
        let mut treatments = Vec::new();
        while let Some(row) = rows.next().await? {
            treatments.push(row_to_treatment(&row)?);
        }
        Ok(treatments)
    }

    /// Replace every field of an existing treatment.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation or the
    /// reference check fails.
    pub async fn update_treatment(
        &self,
        id: i64,
        input: TreatmentInput,
    ) -> Result<Treatment, DatabaseError> {
        self.get_treatment(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_reference("consultas", "consulta", input.consulta)
            .await?;
        let mut params = insert_params(&input);
        params.push(id.into());
        self.db()
            .conn()
            .execute(
                "UPDATE tratamientos
                 SET consulta_id = ?1, descripcion = ?2, duracion_dias = ?3, observaciones = ?4
                 WHERE id = ?5",
                params_from_iter(params),
            )
            .await?;
        Ok(input.into_treatment(id))
    }

    /// Delete a treatment and, via cascade, its prescriptions.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_treatment(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM tratamientos WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Tratamiento", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use vital_core::entities::{ConsultationInput, DoctorInput, PatientInput, SpecialtyInput};
    use vital_core::enums::{BloodType, ConsultationStatus};

    async fn service() -> ClinicService {
        ClinicService::open_local(":memory:").await.unwrap()
    }

    async fn seed_consultation(service: &ClinicService) -> i64 {
        let especialidad = service
            .create_specialty(SpecialtyInput {
                nombre: "Traumatología".into(),
                descripcion: "Lesiones y fracturas".into(),
            })
            .await
            .unwrap()
            .id;
        let paciente = service
            .create_patient(PatientInput {
                rut: "12345678-9".into(),
                nombre: "Ana".into(),
                apellido: "Rojas".into(),
                fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
                tipo_sangre: BloodType::APositive,
                correo: "ana.rojas@correo.cl".into(),
                telefono: "+56 9 1234 5678".into(),
                direccion: "Av. Siempre Viva 742".into(),
                activo: true,
            })
            .await
            .unwrap()
            .id;
        let medico = service
            .create_doctor(DoctorInput {
                nombre: "Carla".into(),
                apellido: "Soto".into(),
                rut: "11222333-4".into(),
                correo: "carla.soto@saludvital.cl".into(),
                telefono: "+56 9 5555 5555".into(),
                activo: true,
                especialidad,
            })
            .await
            .unwrap()
            .id;
        service
            .create_consultation(ConsultationInput {
                paciente,
                medico,
                fecha_consulta: NaiveDate::from_ymd_opt(2024, 3, 15)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap(),
                motivo: "Dolor lumbar".into(),
                diagnostico: "Lumbago mecánico".into(),
                estado: ConsultationStatus::Completed,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_preserves_absent_observaciones() {
        let service = service().await;
        let consulta = seed_consultation(&service).await;
        let created = service
            .create_treatment(TreatmentInput {
                consulta,
                descripcion: "Reposo y antiinflamatorios".into(),
                duracion_dias: 7,
                observaciones: None,
            })
            .await
            .unwrap();
        let fetched = service.get_treatment(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.observaciones, None);
    }

    #[tokio::test]
    async fn negative_duration_is_rejected() {
        let service = service().await;
        let consulta = seed_consultation(&service).await;
        let err = service
            .create_treatment(TreatmentInput {
                consulta,
                descripcion: "Reposo".into(),
                duracion_dias: -1,
                observaciones: None,
            })
            .await
            .unwrap_err();
        match err {
            DatabaseError::Invalid(errors) => assert!(errors.get("duracion_dias").is_some()),
            other => panic!("expected Invalid, got {other}"),
        }
    }

    #[tokio::test]
    async fn filters_by_consulta() {
        let service = service().await;
        let consulta = seed_consultation(&service).await;
        let created = service
            .create_treatment(TreatmentInput {
                consulta,
                descripcion: "Kinesiología".into(),
                duracion_dias: 14,
                observaciones: Some("Dos sesiones por semana".into()),
            })
            .await
            .unwrap();

        let found = service
            .list_treatments(&TreatmentFilter {
                consulta: Some(consulta),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found, vec![created]);

        let none = service
            .list_treatments(&TreatmentFilter {
                consulta: Some(consulta + 1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
