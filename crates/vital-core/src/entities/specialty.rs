use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;
use crate::validate::require_text;

/// A medical specialty (cardiology, pediatrics, ...). Referenced by doctors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Specialty {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
}

impl Specialty {
    /// Human-readable label shown in lists and doctor form selects.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.nombre.clone()
    }
}

/// Payload for creating or replacing a specialty.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpecialtyInput {
    pub nombre: String,
    pub descripcion: String,
}

impl SpecialtyInput {
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "nombre", &self.nombre, Some(100));
        require_text(&mut errors, "descripcion", &self.descripcion, None);
        errors.into_result()
    }

    /// Attach an id to a validated input, yielding the full record.
    #[must_use]
    pub fn into_specialty(self, id: i64) -> Specialty {
        Specialty {
            id,
            nombre: self.nombre,
            descripcion: self.descripcion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_fails_validation() {
        let input = SpecialtyInput {
            nombre: String::new(),
            descripcion: "Atención del corazón".into(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.get("nombre").is_some());
    }

    #[test]
    fn valid_specialty_passes() {
        let input = SpecialtyInput {
            nombre: "Cardiología".into(),
            descripcion: "Atención del corazón".into(),
        };
        assert!(input.validate().is_ok());
    }
}
