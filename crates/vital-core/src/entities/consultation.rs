use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ConsultationStatus;
use crate::errors::FieldErrors;
use crate::validate::require_text;

/// A medical consultation between a patient and a doctor at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Consultation {
    pub id: i64,
    /// Foreign key → [`super::Patient`].
    pub paciente: i64,
    /// Foreign key → [`super::Doctor`].
    pub medico: i64,
    pub fecha_consulta: NaiveDateTime,
    pub motivo: String,
    pub diagnostico: String,
    pub estado: ConsultationStatus,
}

impl Consultation {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Consulta #{} ({})", self.id, self.fecha_consulta)
    }
}

/// Payload for creating or replacing a consultation. `estado` defaults to
/// AGENDADA when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConsultationInput {
    pub paciente: i64,
    pub medico: i64,
    pub fecha_consulta: NaiveDateTime,
    pub motivo: String,
    pub diagnostico: String,
    #[serde(default)]
    pub estado: ConsultationStatus,
}

impl ConsultationInput {
    /// Per-field constraint checks. Existence of `paciente` and `medico` is
    /// checked against the store by the repository layer.
    ///
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "motivo", &self.motivo, Some(200));
        require_text(&mut errors, "diagnostico", &self.diagnostico, None);
        errors.into_result()
    }

    #[must_use]
    pub fn into_consultation(self, id: i64) -> Consultation {
        Consultation {
            id,
            paciente: self.paciente,
            medico: self.medico,
            fecha_consulta: self.fecha_consulta,
            motivo: self.motivo,
            diagnostico: self.diagnostico,
            estado: self.estado,
        }
    }
}
