//! Treatment form: fields and coercion. `observaciones` may be left blank.

use std::collections::HashMap;

use crate::entities::{Treatment, TreatmentInput};
use crate::errors::FieldErrors;
use crate::validate::{require_non_negative, require_text};

use super::{FormField, Widget, coerce_i64, raw};

pub const TREATMENT_FIELDS: [FormField; 4] = [
    FormField::new("consulta", "Consulta Médica", Widget::Select),
    FormField::new("descripcion", "Descripción del Tratamiento", Widget::Textarea)
        .placeholder("Descripción detallada del tratamiento")
        .rows(4),
    FormField::new("duracion_dias", "Duración en Días", Widget::Number),
    FormField::new("observaciones", "Observaciones", Widget::Textarea)
        .placeholder("Observaciones adicionales")
        .rows(3),
];

/// # Errors
///
/// Returns the field → message map covering every broken field.
pub fn parse_treatment(
    values: &HashMap<String, String>,
    _existing: Option<&Treatment>,
) -> Result<TreatmentInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let descripcion = raw(values, "descripcion");
    require_text(&mut errors, "descripcion", descripcion, None);

    let consulta = coerce_i64(&mut errors, values, "consulta");
    let duracion_dias = coerce_i64(&mut errors, values, "duracion_dias");
    if let Some(dias) = duracion_dias {
        require_non_negative(&mut errors, "duracion_dias", dias);
    }

    let observaciones = raw(values, "observaciones").trim();
    let observaciones = (!observaciones.is_empty()).then(|| observaciones.to_string());

    match (consulta, duracion_dias) {
        (Some(consulta), Some(duracion_dias)) if errors.is_empty() => Ok(TreatmentInput {
            consulta,
            descripcion: descripcion.to_string(),
            duracion_dias,
            observaciones,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::values_from;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_observations_become_none() {
        let values = values_from(&[
            ("consulta", "4"),
            ("descripcion", "Reposo"),
            ("duracion_dias", "10"),
            ("observaciones", "   "),
        ]);
        let input = parse_treatment(&values, None).unwrap();
        assert_eq!(input.observaciones, None);
    }

    #[test]
    fn negative_duration_is_flagged() {
        let values = values_from(&[
            ("consulta", "4"),
            ("descripcion", "Reposo"),
            ("duracion_dias", "-1"),
        ]);
        let errors = parse_treatment(&values, None).unwrap_err();
        assert!(errors.get("duracion_dias").is_some());
    }
}
