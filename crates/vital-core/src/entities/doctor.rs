use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;
use crate::validate::{default_true, require_email, require_text};

/// A doctor. Belongs to exactly one specialty; `rut` is unique across
/// doctors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Doctor {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub rut: String,
    pub correo: String,
    pub telefono: String,
    pub activo: bool,
    /// Foreign key → [`super::Specialty`].
    pub especialidad: i64,
}

impl Doctor {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.nombre, self.apellido)
    }
}

/// Payload for creating or replacing a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DoctorInput {
    pub nombre: String,
    pub apellido: String,
    pub rut: String,
    pub correo: String,
    pub telefono: String,
    #[serde(default = "default_true")]
    pub activo: bool,
    pub especialidad: i64,
}

impl DoctorInput {
    /// Per-field constraint checks. Uniqueness of `rut` and existence of
    /// `especialidad` are checked against the store by the repository layer.
    ///
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "nombre", &self.nombre, Some(100));
        require_text(&mut errors, "apellido", &self.apellido, Some(100));
        require_text(&mut errors, "rut", &self.rut, Some(12));
        require_email(&mut errors, "correo", &self.correo);
        require_text(&mut errors, "telefono", &self.telefono, Some(20));
        errors.into_result()
    }

    #[must_use]
    pub fn into_doctor(self, id: i64) -> Doctor {
        Doctor {
            id,
            nombre: self.nombre,
            apellido: self.apellido,
            rut: self.rut,
            correo: self.correo,
            telefono: self.telefono,
            activo: self.activo,
            especialidad: self.especialidad,
        }
    }
}
