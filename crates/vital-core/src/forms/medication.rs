//! Medication form: fields and coercion.

use std::collections::HashMap;

use crate::entities::{Medication, MedicationInput};
use crate::errors::FieldErrors;
use crate::validate::{require_non_negative, require_price, require_text};

use super::{FormField, Widget, coerce_decimal, coerce_i64, raw};

pub const MEDICATION_FIELDS: [FormField; 4] = [
    FormField::new("nombre", "Nombre del Medicamento", Widget::Text),
    FormField::new("laboratorio", "Laboratorio", Widget::Text),
    FormField::new("stock", "Stock Disponible", Widget::Number)
        .placeholder("Cantidad en stock"),
    FormField::new("precio_unitario", "Precio Unitario ($)", Widget::Number)
        .placeholder("0.00"),
];

/// # Errors
///
/// Returns the field → message map covering every broken field.
pub fn parse_medication(
    values: &HashMap<String, String>,
    _existing: Option<&Medication>,
) -> Result<MedicationInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let nombre = raw(values, "nombre");
    let laboratorio = raw(values, "laboratorio");
    require_text(&mut errors, "nombre", nombre, Some(100));
    require_text(&mut errors, "laboratorio", laboratorio, Some(100));

    let stock = coerce_i64(&mut errors, values, "stock");
    if let Some(stock) = stock {
        require_non_negative(&mut errors, "stock", stock);
    }
    let precio_unitario = coerce_decimal(&mut errors, values, "precio_unitario");
    if let Some(precio) = precio_unitario {
        require_price(&mut errors, "precio_unitario", precio);
    }

    match (stock, precio_unitario) {
        (Some(stock), Some(precio_unitario)) if errors.is_empty() => Ok(MedicationInput {
            nombre: nombre.to_string(),
            laboratorio: laboratorio.to_string(),
            stock,
            precio_unitario,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::values_from;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn parses_valid_submission() {
        let values = values_from(&[
            ("nombre", "Paracetamol 500mg"),
            ("laboratorio", "Lab Chile"),
            ("stock", "120"),
            ("precio_unitario", "1290.50"),
        ]);
        let input = parse_medication(&values, None).unwrap();
        assert_eq!(input.precio_unitario, Decimal::new(129_050, 2));
    }

    #[test]
    fn negative_price_is_flagged() {
        let values = values_from(&[
            ("nombre", "Paracetamol 500mg"),
            ("laboratorio", "Lab Chile"),
            ("stock", "120"),
            ("precio_unitario", "-10"),
        ]);
        let errors = parse_medication(&values, None).unwrap_err();
        assert!(errors.get("precio_unitario").is_some());
    }
}
