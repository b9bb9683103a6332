//! HTML form layer: widget/label metadata and flat string-map coercion.
//!
//! Each entity exposed through the HTML surface has a field list (what to
//! render, with which widget, label, and placeholder) and a `parse_*`
//! function taking the submitted `name → raw string` map and producing either
//! a validated input or a field → message map covering every broken field in
//! one pass.
//!
//! Fields absent from a form (e.g. `activo` on patients and doctors) keep
//! their default on create and their current value on edit, which is why the
//! `parse_*` functions take the existing record as an argument.

mod consultation;
mod doctor;
mod medication;
mod patient;
mod prescription;
mod specialty;
mod treatment;

pub use consultation::{CONSULTATION_FIELDS, parse_consultation};
pub use doctor::{DOCTOR_FIELDS, parse_doctor};
pub use medication::{MEDICATION_FIELDS, parse_medication};
pub use patient::{PATIENT_FIELDS, parse_patient};
pub use prescription::{PRESCRIPTION_FIELDS, parse_prescription};
pub use specialty::{SPECIALTY_FIELDS, parse_specialty};
pub use treatment::{TREATMENT_FIELDS, parse_treatment};

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::errors::{FieldErrors, InvalidChoice};
use crate::validate::MSG_REQUIRED;

/// How a field is rendered on the HTML surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    Email,
    Date,
    DateTimeLocal,
    Number,
    Textarea,
    /// Options are supplied at render time (enum variants or related
    /// records).
    Select,
}

/// Declarative metadata for one form field.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub placeholder: Option<&'static str>,
    /// Textarea height; `None` for single-line widgets.
    pub rows: Option<u8>,
}

impl FormField {
    const fn new(name: &'static str, label: &'static str, widget: Widget) -> Self {
        Self {
            name,
            label,
            widget,
            placeholder: None,
            rows: None,
        }
    }

    const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    const fn rows(mut self, rows: u8) -> Self {
        self.rows = Some(rows);
        self
    }
}

/// Raw submitted value for a field, empty string when absent.
fn raw<'a>(values: &'a HashMap<String, String>, field: &str) -> &'a str {
    values.get(field).map_or("", String::as_str)
}

fn coerce_date(
    errors: &mut FieldErrors,
    values: &HashMap<String, String>,
    field: &str,
) -> Option<NaiveDate> {
    let s = raw(values, field).trim();
    if s.is_empty() {
        errors.add(field, MSG_REQUIRED);
        return None;
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Ingrese una fecha válida.");
            None
        }
    }
}

/// Accepts the `datetime-local` widget formats, with or without seconds, and
/// the space-separated variant.
fn coerce_datetime(
    errors: &mut FieldErrors,
    values: &HashMap<String, String>,
    field: &str,
) -> Option<NaiveDateTime> {
    let s = raw(values, field).trim();
    if s.is_empty() {
        errors.add(field, MSG_REQUIRED);
        return None;
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    errors.add(field, "Ingrese una fecha y hora válidas.");
    None
}

fn coerce_i64(
    errors: &mut FieldErrors,
    values: &HashMap<String, String>,
    field: &str,
) -> Option<i64> {
    let s = raw(values, field).trim();
    if s.is_empty() {
        errors.add(field, MSG_REQUIRED);
        return None;
    }
    match s.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Ingrese un número entero.");
            None
        }
    }
}

fn coerce_decimal(
    errors: &mut FieldErrors,
    values: &HashMap<String, String>,
    field: &str,
) -> Option<Decimal> {
    let s = raw(values, field).trim();
    if s.is_empty() {
        errors.add(field, MSG_REQUIRED);
        return None;
    }
    match Decimal::from_str(s) {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Ingrese un número.");
            None
        }
    }
}

fn coerce_choice<T>(
    errors: &mut FieldErrors,
    values: &HashMap<String, String>,
    field: &str,
) -> Option<T>
where
    T: FromStr<Err = InvalidChoice>,
{
    let s = raw(values, field).trim();
    if s.is_empty() {
        errors.add(field, MSG_REQUIRED);
        return None;
    }
    match s.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.add(
                field,
                format!("Escoja una opción válida. '{s}' no es una de las opciones disponibles."),
            );
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn values_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
