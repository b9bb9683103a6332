use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;
use crate::validate::{require_non_negative, require_price, require_text};

/// A medication in the clinic's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Medication {
    pub id: i64,
    pub nombre: String,
    pub laboratorio: String,
    pub stock: i64,
    /// Serialized as a decimal string (e.g. `"1290.50"`).
    pub precio_unitario: Decimal,
}

impl Medication {
    #[must_use]
    pub fn display_name(&self) -> String {
        self.nombre.clone()
    }
}

/// Payload for creating or replacing a medication.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MedicationInput {
    pub nombre: String,
    pub laboratorio: String,
    pub stock: i64,
    pub precio_unitario: Decimal,
}

impl MedicationInput {
    /// # Errors
    ///
    /// Returns the field → message map when any constraint fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "nombre", &self.nombre, Some(100));
        require_text(&mut errors, "laboratorio", &self.laboratorio, Some(100));
        require_non_negative(&mut errors, "stock", self.stock);
        require_price(&mut errors, "precio_unitario", self.precio_unitario);
        errors.into_result()
    }

    #[must_use]
    pub fn into_medication(self, id: i64) -> Medication {
        Medication {
            id,
            nombre: self.nombre,
            laboratorio: self.laboratorio,
            stock: self.stock,
            precio_unitario: self.precio_unitario,
        }
    }
}
