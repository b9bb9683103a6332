//! Prescription form: fields and coercion.

use std::collections::HashMap;

use crate::entities::{Prescription, PrescriptionInput};
use crate::errors::FieldErrors;
use crate::validate::require_text;

use super::{FormField, Widget, coerce_choice, coerce_i64, raw};

pub const PRESCRIPTION_FIELDS: [FormField; 6] = [
    FormField::new("tratamiento", "Tratamiento", Widget::Select),
    FormField::new("medicamento", "Medicamento", Widget::Select),
    FormField::new("dosis", "Dosis", Widget::Text).placeholder("Ej: 500mg, 1 comprimido"),
    FormField::new("frecuencia", "Frecuencia", Widget::Select),
    FormField::new("duracion", "Duración", Widget::Text).placeholder("Ej: 7 días, 2 semanas"),
    FormField::new("motivo", "Motivo de la Prescripción", Widget::Textarea)
        .placeholder("Motivo de la prescripción")
        .rows(3),
];

/// # Errors
///
/// Returns the field → message map covering every broken field.
pub fn parse_prescription(
    values: &HashMap<String, String>,
    _existing: Option<&Prescription>,
) -> Result<PrescriptionInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let dosis = raw(values, "dosis");
    let duracion = raw(values, "duracion");
    let motivo = raw(values, "motivo");
    require_text(&mut errors, "dosis", dosis, Some(100));
    require_text(&mut errors, "duracion", duracion, Some(100));
    require_text(&mut errors, "motivo", motivo, Some(200));

    let tratamiento = coerce_i64(&mut errors, values, "tratamiento");
    let medicamento = coerce_i64(&mut errors, values, "medicamento");
    let frecuencia = coerce_choice(&mut errors, values, "frecuencia");

    match (tratamiento, medicamento, frecuencia) {
        (Some(tratamiento), Some(medicamento), Some(frecuencia)) if errors.is_empty() => {
            Ok(PrescriptionInput {
                tratamiento,
                medicamento,
                dosis: dosis.to_string(),
                frecuencia,
                duracion: duracion.to_string(),
                motivo: motivo.to_string(),
            })
        }
        _ => Err(errors),
    }
}
