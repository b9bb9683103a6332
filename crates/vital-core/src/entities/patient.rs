use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BloodType;
use crate::errors::FieldErrors;
use crate::validate::{default_true, require_email, require_text};

/// A registered patient. `rut` is the national id and is unique across
/// patients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub fecha_nacimiento: NaiveDate,
    pub tipo_sangre: BloodType,
    pub correo: String,
    pub telefono: String,
    pub direccion: String,
    pub activo: bool,
}

impl Patient {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Payload for creating or replacing a patient.
///
/// `tipo_sangre` defaults to O+ and `activo` to true when omitted, matching
/// the schema defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PatientInput {
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub fecha_nacimiento: NaiveDate,
    #[serde(default)]
    pub tipo_sangre: BloodType,
    pub correo: String,
    pub telefono: String,
    pub direccion: String,
    #[serde(default = "default_true")]
    pub activo: bool,
}

impl PatientInput {
    /// Per-field constraint checks. Uniqueness of `rut` is checked against
    /// the store by the repository layer.
    ///
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "rut", &self.rut, Some(12));
        require_text(&mut errors, "nombre", &self.nombre, Some(100));
        require_text(&mut errors, "apellido", &self.apellido, Some(100));
        require_email(&mut errors, "correo", &self.correo);
        require_text(&mut errors, "telefono", &self.telefono, Some(20));
        require_text(&mut errors, "direccion", &self.direccion, Some(200));
        errors.into_result()
    }

    #[must_use]
    pub fn into_patient(self, id: i64) -> Patient {
        Patient {
            id,
            rut: self.rut,
            nombre: self.nombre,
            apellido: self.apellido,
            fecha_nacimiento: self.fecha_nacimiento,
            tipo_sangre: self.tipo_sangre,
            correo: self.correo,
            telefono: self.telefono,
            direccion: self.direccion,
            activo: self.activo,
        }
    }
}
