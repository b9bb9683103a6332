use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;
use crate::validate::{require_non_negative, require_text};

/// A treatment prescribed during a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Treatment {
    pub id: i64,
    /// Foreign key → [`super::Consultation`].
    pub consulta: i64,
    pub descripcion: String,
    pub duracion_dias: i64,
    pub observaciones: Option<String>,
}

impl Treatment {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Tratamiento #{}", self.id)
    }
}

/// Payload for creating or replacing a treatment. `observaciones` may be
/// omitted or blank.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TreatmentInput {
    pub consulta: i64,
    pub descripcion: String,
    pub duracion_dias: i64,
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl TreatmentInput {
    /// Per-field constraint checks. Existence of `consulta` is checked
    /// against the store by the repository layer.
    ///
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "descripcion", &self.descripcion, None);
        require_non_negative(&mut errors, "duracion_dias", self.duracion_dias);
        errors.into_result()
    }

    #[must_use]
    pub fn into_treatment(self, id: i64) -> Treatment {
        Treatment {
            id,
            consulta: self.consulta,
            descripcion: self.descripcion,
            duracion_dias: self.duracion_dias,
            observaciones: self.observaciones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_duration_fails() {
        let input = TreatmentInput {
            consulta: 1,
            descripcion: "Reposo y antiinflamatorios".into(),
            duracion_dias: -3,
            observaciones: None,
        };
        assert!(input.validate().unwrap_err().get("duracion_dias").is_some());
    }

    #[test]
    fn zero_duration_is_allowed() {
        let input = TreatmentInput {
            consulta: 1,
            descripcion: "Dosis única".into(),
            duracion_dias: 0,
            observaciones: Some("Controlar en una semana".into()),
        };
        assert!(input.validate().is_ok());
    }
}
