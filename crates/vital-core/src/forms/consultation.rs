//! Consultation form: fields and coercion.

use std::collections::HashMap;

use crate::entities::{Consultation, ConsultationInput};
use crate::errors::FieldErrors;
use crate::validate::require_text;

use super::{FormField, Widget, coerce_choice, coerce_datetime, coerce_i64, raw};

pub const CONSULTATION_FIELDS: [FormField; 6] = [
    FormField::new("paciente", "Paciente", Widget::Select),
    FormField::new("medico", "Médico", Widget::Select),
    FormField::new("fecha_consulta", "Fecha y Hora de Consulta", Widget::DateTimeLocal),
    FormField::new("motivo", "Motivo de la Consulta", Widget::Textarea)
        .placeholder("Motivo de la consulta")
        .rows(3),
    FormField::new("diagnostico", "Diagnóstico", Widget::Textarea)
        .placeholder("Diagnóstico médico")
        .rows(3),
    FormField::new("estado", "Estado de la Consulta", Widget::Select),
];

/// # Errors
///
/// Returns the field → message map covering every broken field.
pub fn parse_consultation(
    values: &HashMap<String, String>,
    _existing: Option<&Consultation>,
) -> Result<ConsultationInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let motivo = raw(values, "motivo");
    let diagnostico = raw(values, "diagnostico");
    require_text(&mut errors, "motivo", motivo, Some(200));
    require_text(&mut errors, "diagnostico", diagnostico, None);

    let paciente = coerce_i64(&mut errors, values, "paciente");
    let medico = coerce_i64(&mut errors, values, "medico");
    let fecha_consulta = coerce_datetime(&mut errors, values, "fecha_consulta");
    let estado = coerce_choice(&mut errors, values, "estado");

    match (paciente, medico, fecha_consulta, estado) {
        (Some(paciente), Some(medico), Some(fecha_consulta), Some(estado))
            if errors.is_empty() =>
        {
            Ok(ConsultationInput {
                paciente,
                medico,
                fecha_consulta,
                motivo: motivo.to_string(),
                diagnostico: diagnostico.to_string(),
                estado,
            })
        }
        _ => Err(errors),
    }
}
