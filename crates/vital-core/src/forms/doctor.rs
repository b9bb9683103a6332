//! Doctor form: fields and coercion.
//!
//! `activo` is not on the form; it defaults to true on create and keeps its
//! current value on edit.

use std::collections::HashMap;

use crate::entities::{Doctor, DoctorInput};
use crate::errors::FieldErrors;
use crate::validate::{require_email, require_text};

use super::{FormField, Widget, coerce_i64, raw};

pub const DOCTOR_FIELDS: [FormField; 6] = [
    FormField::new("nombre", "Nombre", Widget::Text),
    FormField::new("apellido", "Apellido", Widget::Text),
    FormField::new("rut", "RUT (sin puntos ni guión)", Widget::Text),
    FormField::new("especialidad", "Especialidad", Widget::Select),
    FormField::new("telefono", "Teléfono", Widget::Text).placeholder("+56 9 1234 5678"),
    FormField::new("correo", "Correo Electrónico", Widget::Email)
        .placeholder("ejemplo@correo.com"),
];

/// # Errors
///
/// Returns the field → message map covering every broken field.
pub fn parse_doctor(
    values: &HashMap<String, String>,
    existing: Option<&Doctor>,
) -> Result<DoctorInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let nombre = raw(values, "nombre");
    let apellido = raw(values, "apellido");
    let rut = raw(values, "rut");
    let correo = raw(values, "correo");
    let telefono = raw(values, "telefono");
    require_text(&mut errors, "nombre", nombre, Some(100));
    require_text(&mut errors, "apellido", apellido, Some(100));
    require_text(&mut errors, "rut", rut, Some(12));
    require_email(&mut errors, "correo", correo);
    require_text(&mut errors, "telefono", telefono, Some(20));

    let especialidad = coerce_i64(&mut errors, values, "especialidad");

    match especialidad {
        Some(especialidad) if errors.is_empty() => Ok(DoctorInput {
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            rut: rut.to_string(),
            correo: correo.to_string(),
            telefono: telefono.to_string(),
            activo: existing.is_none_or(|d| d.activo),
            especialidad,
        }),
        _ => Err(errors),
    }
}
