use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Frequency;
use crate::errors::FieldErrors;
use crate::validate::require_text;

/// A prescription tying a medication to a treatment, with dosage and intake
/// frequency.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Prescription {
    pub id: i64,
    /// Foreign key → [`super::Treatment`].
    pub tratamiento: i64,
    /// Foreign key → [`super::Medication`].
    pub medicamento: i64,
    pub dosis: String,
    pub frecuencia: Frequency,
    /// Free text, e.g. "7 días" or "2 semanas".
    pub duracion: String,
    pub motivo: String,
}

impl Prescription {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Receta #{}", self.id)
    }
}

/// Payload for creating or replacing a prescription. `frecuencia` defaults
/// to 24H when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrescriptionInput {
    pub tratamiento: i64,
    pub medicamento: i64,
    pub dosis: String,
    #[serde(default)]
    pub frecuencia: Frequency,
    pub duracion: String,
    pub motivo: String,
}

impl PrescriptionInput {
    /// Per-field constraint checks. Existence of `tratamiento` and
    /// `medicamento` is checked against the store by the repository layer.
    ///
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "dosis", &self.dosis, Some(100));
        require_text(&mut errors, "duracion", &self.duracion, Some(100));
        require_text(&mut errors, "motivo", &self.motivo, Some(200));
        errors.into_result()
    }

    #[must_use]
    pub fn into_prescription(self, id: i64) -> Prescription {
        Prescription {
            id,
            tratamiento: self.tratamiento,
            medicamento: self.medicamento,
            dosis: self.dosis,
            frecuencia: self.frecuencia,
            duracion: self.duracion,
            motivo: self.motivo,
        }
    }
}
