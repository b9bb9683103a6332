//! JSON API family: one handler module per entity.
//!
//! All modules follow the same contract: filtered `list`, `create` (201),
//! `retrieve`, `update` (PUT, full replace), `patch` (partial, merged over
//! the stored record before re-validating), `destroy` (204, cascading).

pub mod consultation;
pub mod doctor;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod specialty;
pub mod treatment;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Unwraps a body extraction so a rejected body renders in the API's JSON
/// error shape instead of axum's plain-text default.
pub(crate) fn required<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = body?;
    Ok(value)
}

/// PATCH semantics: overlay the supplied fields on the serialized stored
/// record, then deserialize the whole thing as a fresh input. Fields the
/// patch omits keep their stored values; an unknown enum value or wrong
/// type fails deserialization and reports as a 400.
pub(crate) fn merge_into<E, I>(existing: &E, patch: serde_json::Value) -> Result<I, ApiError>
where
    E: Serialize,
    I: DeserializeOwned,
{
    let mut base = serde_json::to_value(existing).map_err(|e| ApiError::Internal(e.into()))?;
    let serde_json::Value::Object(fields) = patch else {
        return Err(ApiError::BadRequest("Se esperaba un objeto JSON.".into()));
    };
    if let serde_json::Value::Object(base_fields) = &mut base {
        for (key, value) in fields {
            base_fields.insert(key, value);
        }
    }
    serde_json::from_value(base).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vital_core::entities::{Medication, MedicationInput};

    fn stored() -> Medication {
        Medication {
            id: 1,
            nombre: "Paracetamol 500mg".into(),
            laboratorio: "Lab Chile".into(),
            stock: 120,
            precio_unitario: "1290.50".parse().unwrap(),
        }
    }

    #[test]
    fn patch_keeps_omitted_fields() {
        let input: MedicationInput =
            merge_into(&stored(), serde_json::json!({ "stock": 80 })).unwrap();
        assert_eq!(input.stock, 80);
        assert_eq!(input.nombre, "Paracetamol 500mg");
        assert_eq!(input.precio_unitario.to_string(), "1290.50");
    }

    #[test]
    fn patch_rejects_non_object_bodies() {
        let result: Result<MedicationInput, _> = merge_into(&stored(), serde_json::json!([1, 2]));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn patch_with_wrong_type_is_bad_request() {
        let result: Result<MedicationInput, _> =
            merge_into(&stored(), serde_json::json!({ "stock": "muchos" }));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
