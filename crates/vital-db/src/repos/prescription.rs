//! Prescription repository.

use libsql::params_from_iter;
use vital_core::entities::{Prescription, PrescriptionInput};

use crate::ClinicService;
use crate::error::DatabaseError;
use crate::filters::PrescriptionFilter;
use crate::helpers::parse_enum;

fn row_to_prescription(row: &libsql::Row) -> Result<Prescription, DatabaseError> {
    Ok(Prescription {
        id: row.get::<i64>(0)?,
        tratamiento: row.get::<i64>(1)?,
        medicamento: row.get::<i64>(2)?,
        dosis: row.get::<String>(3)?,
        frecuencia: parse_enum(&row.get::<String>(4)?)?,
        duracion: row.get::<String>(5)?,
        motivo: row.get::<String>(6)?,
    })
}

fn insert_params(input: &PrescriptionInput) -> Vec<libsql::Value> {
    vec![
        input.tratamiento.into(),
        input.medicamento.into(),
        input.dosis.clone().into(),
        input.frecuencia.as_str().into(),
        input.duracion.clone().into(),
        input.motivo.clone().into(),
    ]
}

impl ClinicService {
    /// Create a prescription. Both the treatment and the medication must
    /// exist.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation or a reference check fails.
    pub async fn create_prescription(
        &self,
        input: PrescriptionInput,
    ) -> Result<Prescription, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_reference("tratamientos", "tratamiento", input.tratamiento)
            .await?;
        self.ensure_reference("medicamentos", "medicamento", input.medicamento)
            .await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO recetas (tratamiento_id, medicamento_id, dosis, frecuencia, duracion, motivo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params_from_iter(insert_params(&input)),
            )
            .await?;
        Ok(input.into_prescription(self.db().last_insert_id()))
    }

    /// Fetch one prescription by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_prescription(&self, id: i64) -> Result<Prescription, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, tratamiento_id, medicamento_id, dosis, frecuencia, duracion, motivo
                 FROM recetas WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_prescription(&row),
            None => Err(DatabaseError::not_found("Receta", id)),
        }
    }

    /// Prescriptions matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_prescriptions(
        &self,
        filter: &PrescriptionFilter,
    ) -> Result<Vec<Prescription>, DatabaseError> {
        let (sql, params) = filter.select_sql();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, params_from_iter(params))
            .await?;
        let mut prescriptions = Vec::new();
        while let Some(row) = rows.next().await? {
            prescriptions.push(row_to_prescription(&row)?);
        }
        Ok(prescriptions)
    }

    /// Replace every field of an existing prescription.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation or a
    /// reference check fails.
    pub async fn update_prescription(
        &self,
        id: i64,
        input: PrescriptionInput,
    ) -> Result<Prescription, DatabaseError> {
        self.get_prescription(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_reference("tratamientos", "tratamiento", input.tratamiento)
            .await?;
        self.ensure_reference("medicamentos", "medicamento", input.medicamento)
            .await?;
        let mut params = insert_params(&input);
        params.push(id.into());
        self.db()
            .conn()
            .execute(
                "UPDATE recetas
                 SET tratamiento_id = ?1, medicamento_id = ?2, dosis = ?3, frecuencia = ?4,
                     duracion = ?5, motivo = ?6
                 WHERE id = ?7",
                params_from_iter(params),
            )
            .await?;
        Ok(input.into_prescription(id))
    }

    /// Delete a prescription.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_prescription(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM recetas WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Receta", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use vital_core::entities::{
        ConsultationInput, DoctorInput, MedicationInput, PatientInput, SpecialtyInput,
        TreatmentInput,
    };
    use vital_core::enums::{BloodType, ConsultationStatus, Frequency};

    async fn service() -> ClinicService {
        ClinicService::open_local(":memory:").await.unwrap()
    }

    async fn seed_treatment_and_medication(service: &ClinicService) -> (i64, i64) {
        let especialidad = service
            .create_specialty(SpecialtyInput {
                nombre: "Medicina General".into(),
                descripcion: "Atención primaria".into(),
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
        let consulta = service
            .create_consultation(ConsultationInput {
                paciente,
                medico,
                fecha_consulta: NaiveDate::from_ymd_opt(2024, 3, 15)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap(),
                motivo: "Fiebre persistente".into(),
                diagnostico: "Cuadro viral".into(),
                estado: ConsultationStatus::Completed,
            })
            .await
            .unwrap()
            .id;
        let tratamiento = service
            .create_treatment(TreatmentInput {
                consulta,
                descripcion: "Reposo e hidratación".into(),
                duracion_dias: 5,
                observaciones: None,
            })
            .await
            .unwrap()
            .id;
        let medicamento = service
            .create_medication(MedicationInput {
                nombre: "Paracetamol 500mg".into(),
                laboratorio: "Lab Chile".into(),
                stock: 120,
                precio_unitario: Decimal::from_str("1290.50").unwrap(),
            })
            .await
            .unwrap()
            .id;
        (tratamiento, medicamento)
    }

    fn prescription_input(tratamiento: i64, medicamento: i64) -> PrescriptionInput {
        PrescriptionInput {
            tratamiento,
            medicamento,
            dosis: "1 comprimido".into(),
            frecuencia: Frequency::Every8Hours,
            duracion: "5 días".into(),
            motivo: "Fiebre".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_echoes_every_field() {
        let service = service().await;
        let (tratamiento, medicamento) = seed_treatment_and_medication(&service).await;
        let created = service
            .create_prescription(prescription_input(tratamiento, medicamento))
            .await
            .unwrap();
        let fetched = service.get_prescription(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_medication_reference_fails() {
        let service = service().await;
        let (tratamiento, _) = seed_treatment_and_medication(&service).await;
        let err = service
            .create_prescription(prescription_input(tratamiento, 404))
            .await
            .unwrap_err();
        match err {
            DatabaseError::Invalid(errors) => assert!(errors.get("medicamento").is_some()),
            other => panic!("expected Invalid, got {other}"),
        }
    }

    #[tokio::test]
    async fn filters_by_frecuencia() {
        let service = service().await;
        let (tratamiento, medicamento) = seed_treatment_and_medication(&service).await;
        let every_8 = service
            .create_prescription(prescription_input(tratamiento, medicamento))
            .await
            .unwrap();
        let mut weekly_input = prescription_input(tratamiento, medicamento);
        weekly_input.frecuencia = Frequency::Weekly;
        service.create_prescription(weekly_input).await.unwrap();

        let found = service
            .list_prescriptions(&PrescriptionFilter {
                frecuencia: Some(Frequency::Every8Hours),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found, vec![every_8]);
    }
}
