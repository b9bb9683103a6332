//! Medication repository.
//!
//! Unit prices are exact decimals stored as TEXT; scale is preserved
//! through storage so `"1290.50"` comes back as written.

use libsql::params_from_iter;
use vital_core::entities::{Medication, MedicationInput};

use crate::ClinicService;
use crate::error::DatabaseError;
use crate::filters::MedicationFilter;
use crate::helpers::parse_decimal;

fn row_to_medication(row: &libsql::Row) -> Result<Medication, DatabaseError> {
    Ok(Medication {
        id: row.get::<i64>(0)?,
        nombre: row.get::<String>(1)?,
        laboratorio: row.get::<String>(2)?,
        stock: row.get::<i64>(3)?,
        precio_unitario: parse_decimal(&row.get::<String>(4)?)?,
    })
}

fn insert_params(input: &MedicationInput) -> Vec<libsql::Value> {
    vec![
        input.nombre.clone().into(),
        input.laboratorio.clone().into(),
        input.stock.into(),
        input.precio_unitario.to_string().into(),
    ]
}

impl ClinicService {
    /// Create a medication.
    ///
    /// # Errors
    ///
    /// `Invalid` when field validation fails.
    pub async fn create_medication(
        &self,
        input: MedicationInput,
    ) -> Result<Medication, DatabaseError> {
        input.validate().map_err(DatabaseError::Invalid)?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO medicamentos (nombre, laboratorio, stock, precio_unitario)
                 VALUES (?1, ?2, ?3, ?4)",
                params_from_iter(insert_params(&input)),
            )
            .await?;
        Ok(input.into_medication(self.db().last_insert_id()))
    }

    /// Fetch one medication by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn get_medication(&self, id: i64) -> Result<Medication, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, nombre, laboratorio, stock, precio_unitario
                 FROM medicamentos WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_medication(&row),
            None => Err(DatabaseError::not_found("Medicamento", id)),
        }
    }

    /// Medications matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Query errors only.
    pub async fn list_medications(
        &self,
        filter: &MedicationFilter,
    ) -> Result<Vec<Medication>, DatabaseError> {
        let (sql, params) = filter.select_sql();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, params_from_iter(params))
            .await?;
        let mut medications = Vec::new();
        while let Some(row) = rows.next().await? {
            medications.push(row_to_medication(&row)?);
        }
        Ok(medications)
    }

    /// Replace every field of an existing medication.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `Invalid` when validation fails. On
    /// failure the stored row is left untouched.
    pub async fn update_medication(
        &self,
        id: i64,
        input: MedicationInput,
    ) -> Result<Medication, DatabaseError> {
        self.get_medication(id).await?;
        input.validate().map_err(DatabaseError::Invalid)?;
        let mut params = insert_params(&input);
        params.push(id.into());
        self.db()
            .conn()
            .execute(
                "UPDATE medicamentos
                 SET nombre = ?1, laboratorio = ?2, stock = ?3, precio_unitario = ?4
                 WHERE id = ?5",
                params_from_iter(params),
            )
            .await?;
        Ok(input.into_medication(id))
    }

    /// Delete a medication and, via cascade, the prescriptions citing it.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the id.
    pub async fn delete_medication(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM medicamentos WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Medicamento", id));
        }
        Ok(())
    }
}
