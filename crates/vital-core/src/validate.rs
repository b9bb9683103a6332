//! Shared field validators.
//!
//! Each helper appends messages to a [`FieldErrors`] map rather than failing
//! fast, so a single pass reports every broken field at once.

use rust_decimal::Decimal;

use crate::errors::FieldErrors;

pub(crate) const MSG_REQUIRED: &str = "Este campo es obligatorio.";
pub(crate) const MSG_EMAIL: &str = "Ingrese una dirección de correo electrónico válida.";
pub(crate) const MSG_MIN_ZERO: &str = "Asegúrese de que este valor sea mayor o igual a 0.";

pub(crate) const fn default_true() -> bool {
    true
}

/// Required non-blank text, optionally bounded in length (counted in chars,
/// as the storage layer declares).
pub(crate) fn require_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    max_len: Option<usize>,
) {
    if value.trim().is_empty() {
        errors.add(field, MSG_REQUIRED);
        return;
    }
    if let Some(max) = max_len {
        let len = value.chars().count();
        if len > max {
            errors.add(
                field,
                format!(
                    "Asegúrese de que este valor tenga como máximo {max} caracteres (tiene {len})."
                ),
            );
        }
    }
}

/// Required text that must look like an email address: one `@`, non-empty
/// local part, domain with at least one dot and no whitespace.
pub(crate) fn require_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, MSG_REQUIRED);
        return;
    }
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !value.chars().any(char::is_whitespace)
    });
    if !valid {
        errors.add(field, MSG_EMAIL);
    }
}

pub(crate) fn require_non_negative(errors: &mut FieldErrors, field: &str, value: i64) {
    if value < 0 {
        errors.add(field, MSG_MIN_ZERO);
    }
}

/// Unit price constraint: non-negative, at most two decimal places, at most
/// ten digits in total (eight integral).
pub(crate) fn require_price(errors: &mut FieldErrors, field: &str, value: Decimal) {
    if value.is_sign_negative() {
        errors.add(field, MSG_MIN_ZERO);
    }
    if value.normalize().scale() > 2 {
        errors.add(field, "Asegúrese de que no haya más de 2 decimales.");
    }
    if value.abs() >= Decimal::from(100_000_000_u64) {
        errors.add(field, "Asegúrese de que no haya más de 10 dígitos en total.");
    }
}
