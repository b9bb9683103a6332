//! Specialty form: fields and coercion.

use std::collections::HashMap;

use crate::entities::{Specialty, SpecialtyInput};
use crate::errors::FieldErrors;
use crate::validate::require_text;

use super::{FormField, Widget, raw};

pub const SPECIALTY_FIELDS: [FormField; 2] = [
    FormField::new("nombre", "Nombre de la Especialidad", Widget::Text),
    FormField::new("descripcion", "Descripción", Widget::Textarea)
        .placeholder("Descripción detallada de la especialidad")
        .rows(4),
];

/// # Errors
///
/// Returns the field → message map when any field is blank or overlong.
pub fn parse_specialty(
    values: &HashMap<String, String>,
    _existing: Option<&Specialty>,
) -> Result<SpecialtyInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    let nombre = raw(values, "nombre");
    let descripcion = raw(values, "descripcion");
    require_text(&mut errors, "nombre", nombre, Some(100));
    require_text(&mut errors, "descripcion", descripcion, None);
    errors.into_result()?;
    Ok(SpecialtyInput {
        nombre: nombre.to_string(),
        descripcion: descripcion.to_string(),
    })
}
