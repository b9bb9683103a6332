//! Patient form: fields and coercion.
//!
//! `activo` is not on the form; it defaults to true on create and keeps its
//! current value on edit.

use std::collections::HashMap;

use crate::entities::{Patient, PatientInput};
use crate::errors::FieldErrors;
use crate::validate::{require_email, require_text};

use super::{FormField, Widget, coerce_choice, coerce_date, raw};

pub const PATIENT_FIELDS: [FormField; 8] = [
    FormField::new("nombre", "Nombre", Widget::Text),
    FormField::new("apellido", "Apellido", Widget::Text),
    FormField::new("rut", "RUT (sin puntos ni guión)", Widget::Text),
    FormField::new("fecha_nacimiento", "Fecha de Nacimiento", Widget::Date),
    FormField::new("telefono", "Teléfono", Widget::Text).placeholder("+56 9 1234 5678"),
    FormField::new("correo", "Correo Electrónico", Widget::Email)
        .placeholder("ejemplo@correo.com"),
    FormField::new("direccion", "Dirección", Widget::Textarea)
        .placeholder("Dirección completa del paciente")
        .rows(3),
    FormField::new("tipo_sangre", "Tipo de Sangre", Widget::Select),
];

/// # Errors
///
/// Returns the field → message map covering every broken field.
pub fn parse_patient(
    values: &HashMap<String, String>,
    existing: Option<&Patient>,
) -> Result<PatientInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let rut = raw(values, "rut");
    let nombre = raw(values, "nombre");
    let apellido = raw(values, "apellido");
    let correo = raw(values, "correo");
    let telefono = raw(values, "telefono");
    let direccion = raw(values, "direccion");
    require_text(&mut errors, "rut", rut, Some(12));
    require_text(&mut errors, "nombre", nombre, Some(100));
    require_text(&mut errors, "apellido", apellido, Some(100));
    require_email(&mut errors, "correo", correo);
    require_text(&mut errors, "telefono", telefono, Some(20));
    require_text(&mut errors, "direccion", direccion, Some(200));

    let fecha_nacimiento = coerce_date(&mut errors, values, "fecha_nacimiento");
    let tipo_sangre = coerce_choice(&mut errors, values, "tipo_sangre");

    match (fecha_nacimiento, tipo_sangre) {
        (Some(fecha_nacimiento), Some(tipo_sangre)) if errors.is_empty() => Ok(PatientInput {
            rut: rut.to_string(),
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            fecha_nacimiento,
            tipo_sangre,
            correo: correo.to_string(),
            telefono: telefono.to_string(),
            direccion: direccion.to_string(),
            activo: existing.is_none_or(|p| p.activo),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::BloodType;
    use crate::forms::values_from;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn submission() -> HashMap<String, String> {
        values_from(&[
            ("nombre", "Ana"),
            ("apellido", "Rojas"),
            ("rut", "12345678-9"),
            ("fecha_nacimiento", "1990-05-14"),
            ("telefono", "+56 9 1234 5678"),
            ("correo", "ana@correo.cl"),
            ("direccion", "Av. Siempre Viva 742"),
            ("tipo_sangre", "A+"),
        ])
    }

    #[test]
    fn parses_valid_submission_with_active_default() {
        let input = parse_patient(&submission(), None).unwrap();
        assert_eq!(input.tipo_sangre, BloodType::APositive);
        assert!(input.activo);
        assert_eq!(
            input.fecha_nacimiento,
            NaiveDate::from_ymd_opt(1990, 5, 14).unwrap()
        );
    }

    #[test]
    fn edit_preserves_inactive_flag() {
        let existing = Patient {
            id: 3,
            rut: "12345678-9".into(),
            nombre: "Ana".into(),
            apellido: "Rojas".into(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
            tipo_sangre: BloodType::APositive,
            correo: "ana@correo.cl".into(),
            telefono: "+56 9 1234 5678".into(),
            direccion: "Av. Siempre Viva 742".into(),
            activo: false,
        };
        let input = parse_patient(&submission(), Some(&existing)).unwrap();
        assert!(!input.activo);
    }

    #[test]
    fn invalid_blood_type_reports_choice_error() {
        let mut values = submission();
        values.insert("tipo_sangre".into(), "X+".into());
        let errors = parse_patient(&values, None).unwrap_err();
        assert!(errors.get("tipo_sangre").is_some());
    }

    #[test]
    fn all_errors_reported_in_one_pass() {
        let values = values_from(&[("correo", "no-es-correo"), ("fecha_nacimiento", "ayer")]);
        let errors = parse_patient(&values, None).unwrap_err();
        for field in ["rut", "nombre", "apellido", "correo", "fecha_nacimiento", "tipo_sangre"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }
}
