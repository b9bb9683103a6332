//! `/web/recetas/` handlers.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Prescription;
use vital_core::enums::Frequency;
use vital_core::errors::FieldErrors;
use vital_core::forms::{PRESCRIPTION_FIELDS, parse_prescription};
use vital_db::error::DatabaseError;
use vital_db::filters::{MedicationFilter, PrescriptionFilter, TreatmentFilter};

use super::{NoticeQuery, redirect_with_notice};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "recetas";

async fn select_options(state: &AppState) -> Result<SelectOptions, ApiError> {
    let treatments = state.list_treatments(&TreatmentFilter::default()).await?;
    let medications = state.list_medications(&MedicationFilter::default()).await?;
    Ok(SelectOptions::from([
        (
            "tratamiento",
            treatments
                .iter()
                .map(|t| (t.id.to_string(), t.display_name()))
                .collect(),
        ),
        (
            "medicamento",
            medications
                .iter()
                .map(|m| (m.id.to_string(), m.display_name()))
                .collect(),
        ),
        (
            "frecuencia",
            Frequency::ALL
                .iter()
                .map(|f| (f.as_str().to_string(), f.label().to_string()))
                .collect(),
        ),
    ]))
}

fn form_values(prescription: &Prescription) -> HashMap<String, String> {
    HashMap::from([
        (
            "tratamiento".to_string(),
            prescription.tratamiento.to_string(),
        ),
        (
            "medicamento".to_string(),
            prescription.medicamento.to_string(),
        ),
        ("dosis".to_string(), prescription.dosis.clone()),
        (
            "frecuencia".to_string(),
            prescription.frecuencia.as_str().to_string(),
        ),
        ("duracion".to_string(), prescription.duracion.clone()),
        ("motivo".to_string(), prescription.motivo.clone()),
    ])
}

async fn render_form(
    state: &AppState,
    title: &str,
    action: &str,
    values: &HashMap<String, String>,
    errors: &FieldErrors,
) -> Result<Html<String>, ApiError> {
    let options = select_options(state).await?;
    Ok(render::form_page(
        title,
        action,
        &PRESCRIPTION_FIELDS,
        values,
        &options,
        errors,
    ))
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let prescriptions = state
        .list_prescriptions(&PrescriptionFilter::default())
        .await?;
    let rows: Vec<ListRow> = prescriptions
        .iter()
        .map(|r| ListRow {
            id: r.id,
            cells: vec![
                r.id.to_string(),
                r.tratamiento.to_string(),
                r.medicamento.to_string(),
                r.dosis.clone(),
                r.frecuencia.label().to_string(),
                r.duracion.clone(),
            ],
        })
        .collect();
    Ok(render::list_page(
        "Recetas",
        SEGMENT,
        &["ID", "Tratamiento", "Medicamento", "Dosis", "Frecuencia", "Duración"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_form(
        &state,
        "Nueva Receta",
        "/web/recetas/create/",
        &HashMap::new(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    match parse_prescription(&values, None) {
        Ok(input) => match state.create_prescription(input).await {
            Ok(_) => Ok(redirect_with_notice(SEGMENT, "Receta creada exitosamente.")),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Nueva Receta",
                "/web/recetas/create/",
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(render_form(
            &state,
            "Nueva Receta",
            "/web/recetas/create/",
            &values,
            &errors,
        )
        .await?
        .into_response()),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let prescription = match state.get_prescription(id).await {
        Ok(r) => r,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        &state,
        "Editar Receta",
        &format!("/web/recetas/edit/{id}/"),
        &form_values(&prescription),
        &FieldErrors::new(),
    )
    .await?
    .into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let existing = match state.get_prescription(id).await {
        Ok(r) => r,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let action = format!("/web/recetas/edit/{id}/");
    match parse_prescription(&values, Some(&existing)) {
        Ok(input) => match state.update_prescription(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Receta actualizada exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Editar Receta",
                &action,
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(render_form(&state, "Editar Receta", &action, &values, &errors)
            .await?
            .into_response()),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let prescription = match state.get_prescription(id).await {
        Ok(r) => r,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Receta",
        &format!("/web/recetas/delete/{id}/"),
        &format!("¿Confirma que desea eliminar {}?", prescription.display_name()),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_prescription(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Receta eliminada exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
