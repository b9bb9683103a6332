//! Doctor repository.

use libsql::params_from_iter;
use vital_core::entities::{Doctor, DoctorInput};

use crate::ClinicService;
use crate::error::DatabaseError;
use crate::filters::DoctorFilter;

fn row_to_doctor(row: &libsql::Row) -> Result<Doctor, DatabaseError> {
    Ok(Doctor {
        id: row.get::<i64>(0)?,
        nombre: row.get::<String>(1)?,
        apellido: row.get::<String>(2)?,
        rut: row.get::<String>(3)?,
        correo: row.get::<String>(4)?,
        telefono: row.get::<String>(5)?,
        activo: row.get::<i64>(6)? != 0,
        especialidad: row.get::<i64>(7)?,
    })
}

fn insert_params(input: &DoctorInput) -> Vec<libsql::Value> {
    vec![
        input.nombre.clone().into(),
        input.apellido.clone().into(),
        input.rut.clone().into(),
        input.correo.clone().into(),
        input.telefono.clone().into(),
        i64::from(input.activo).into(),
        input.especialidad.into(),
    ]
}

impl ClinicService {
    /// Create a doctor. The rut must be free and the specialty must exist.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation or either store check fails.
    pub async fn create_doctor(&self, input: DoctorInput) -> Result<Doctor, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_unique_rut("medicos", "Médico", &input.rut, None)
            .await?;
        self.ensure_reference("especialidades", "especialidad", input.especialidad)
            .await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO medicos (nombre, apellido, rut, correo, telefono, activo, especialidad_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params_from_iter(insert_params(&input)),
            )
            .await?;
        Ok(input.into_doctor(self.db().last_insert_id()))
    }

    /// Fetch one doctor by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_doctor(&self, id: i64) -> Result<Doctor, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, nombre, apellido, rut, correo, telefono, activo, especialidad_id
                 FROM medicos WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_doctor(&row),
            None => Err(DatabaseError::not_found("Médico", id)),
        }
    }

    /// Doctors matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>, DatabaseError> {
        let (sql, params) = filter.select_sql();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, params_from_iter(params))
            .await?;
        let mut doctors = Vec::new();
        while let Some(row) = rows.next().await? {
            doctors.push(row_to_doctor(&row)?);
        }
        Ok(doctors)
    }

    /// Replace every field of an existing doctor.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation or a store
    /// check fails.
    pub async fn update_doctor(&self, id: i64, input: DoctorInput) -> Result<Doctor, DatabaseError> {
        self.get_doctor(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        self.ensure_unique_rut("medicos", "Médico", &input.rut, Some(id))
            .await?;
        self.ensure_reference("especialidades", "especialidad", input.especialidad)
            .await?;
        let mut params = insert_params(&input);
        params.push(id.into());
        self.db()
            .conn()
            .execute(
                "UPDATE medicos
                 SET nombre = ?1, apellido = ?2, rut = ?3, correo = ?4, telefono = ?5, activo = ?6,
                     especialidad_id = ?7
                 WHERE id = ?8",
                params_from_iter(params),
            )
            .await?;
        Ok(input.into_doctor(id))
    }

    /// Delete a doctor and, via cascade, their consultations and everything
    /// hanging off them.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_doctor(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM medicos WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Médico", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vital_core::entities::SpecialtyInput;

    async fn service() -> ClinicService {
        ClinicService::open_local(":memory:").await.unwrap()
    }

    async fn seed_specialty(service: &ClinicService, nombre: &str) -> i64 {
        service
            .create_specialty(SpecialtyInput {
                nombre: nombre.into(),
                descripcion: format!("Servicio de {nombre}"),
            })
            .await
            .unwrap()
            .id
    }

    fn doctor_input(rut: &str, especialidad: i64) -> DoctorInput {
        DoctorInput {
            nombre: "Carla".into(),
            apellido: "Soto".into(),
            rut: rut.into(),
            correo: "carla.soto@saludvital.cl".into(),
            telefono: "+56 9 5555 5555".into(),
            activo: true,
            especialidad,
        }
    }

    #[tokio::test]
    async fn create_then_get_echoes_every_field() {
        let service = service().await;
        let especialidad = seed_specialty(&service, "Cardiología").await;
        let created = service
            .create_doctor(doctor_input("11222333-4", especialidad))
            .await
            .unwrap();
        let fetched = service.get_doctor(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_specialty_is_reported_on_its_field() {
        let service = service().await;
        let err = service
            .create_doctor(doctor_input("11222333-4", 99))
            .await
            .unwrap_err();
        match err {
            DatabaseError::Invalid(errors) => {
                assert_eq!(
                    errors.get("especialidad").unwrap(),
                    ["Clave primaria 99 inválida: el objeto no existe.".to_string()]
                );
            }
            other => panic!("expected Invalid, got {other}"),
        }
    }

    #[tokio::test]
    async fn duplicate_rut_is_rejected() {
        let service = service().await;
        let especialidad = seed_specialty(&service, "Cardiología").await;
        service
            .create_doctor(doctor_input("11222333-4", especialidad))
            .await
            .unwrap();
        let err = service
            .create_doctor(doctor_input("11222333-4", especialidad))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Invalid(_)));
    }

    #[tokio::test]
    async fn filters_by_specialty_name_substring() {
        let service = service().await;
        let cardio = seed_specialty(&service, "Cardiología").await;
        let pedia = seed_specialty(&service, "Pediatría").await;
        let doc_cardio = service
            .create_doctor(doctor_input("11222333-4", cardio))
            .await
            .unwrap();
        service
            .create_doctor(doctor_input("22333444-5", pedia))
            .await
            .unwrap();

        let found = service
            .list_doctors(&DoctorFilter {
                especialidad_nombre: Some("cardio".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found, vec![doc_cardio]);
    }
}
