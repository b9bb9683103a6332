//! `/web/consultas/` handlers.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Consultation;
use vital_core::enums::ConsultationStatus;
use vital_core::errors::FieldErrors;
use vital_core::forms::{CONSULTATION_FIELDS, parse_consultation};
use vital_db::error::DatabaseError;
use vital_db::filters::{ConsultationFilter, DoctorFilter, PatientFilter};

use super::{NoticeQuery, redirect_with_notice};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "consultas";

async fn select_options(state: &AppState) -> Result<SelectOptions, ApiError> {
    let patients = state.list_patients(&PatientFilter::default()).await?;
    let doctors = state.list_doctors(&DoctorFilter::default()).await?;
    Ok(SelectOptions::from([
        (
            "paciente",
            patients
                .iter()
                .map(|p| (p.id.to_string(), p.display_name()))
                .collect(),
        ),
        (
            "medico",
            doctors
                .iter()
                .map(|d| (d.id.to_string(), d.display_name()))
                .collect(),
        ),
        (
            "estado",
            ConsultationStatus::ALL
                .iter()
                .map(|e| (e.as_str().to_string(), e.label().to_string()))
                .collect(),
        ),
    ]))
}

fn form_values(consultation: &Consultation) -> HashMap<String, String> {
    HashMap::from([
        ("paciente".to_string(), consultation.paciente.to_string()),
        ("medico".to_string(), consultation.medico.to_string()),
        (
            "fecha_consulta".to_string(),
            consultation
                .fecha_consulta
                .format("%Y-%m-%dT%H:%M")
                .to_string(),
        ),
        ("motivo".to_string(), consultation.motivo.clone()),
        ("diagnostico".to_string(), consultation.diagnostico.clone()),
        (
            "estado".to_string(),
            consultation.estado.as_str().to_string(),
        ),
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
        &CONSULTATION_FIELDS,
        values,
        &options,
        errors,
    ))
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let consultations = state
        .list_consultations(&ConsultationFilter::default())
        .await?;
    let rows: Vec<ListRow> = consultations
        .iter()
        .map(|c| ListRow {
            id: c.id,
            cells: vec![
                c.id.to_string(),
                c.fecha_consulta.format("%Y-%m-%d %H:%M").to_string(),
                c.paciente.to_string(),
                c.medico.to_string(),
                c.estado.label().to_string(),
            ],
        })
        .collect();
    Ok(render::list_page(
        "Consultas",
        SEGMENT,
        &["ID", "Fecha", "Paciente", "Médico", "Estado"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_form(
        &state,
        "Nueva Consulta",
        "/web/consultas/create/",
        &HashMap::new(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    match parse_consultation(&values, None) {
        Ok(input) => match state.create_consultation(input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Consulta creada exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Nueva Consulta",
                "/web/consultas/create/",
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(render_form(
            &state,
            "Nueva Consulta",
            "/web/consultas/create/",
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
    let consultation = match state.get_consultation(id).await {
        Ok(c) => c,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        &state,
        "Editar Consulta",
        &format!("/web/consultas/edit/{id}/"),
        &form_values(&consultation),
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
    let existing = match state.get_consultation(id).await {
        Ok(c) => c,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let action = format!("/web/consultas/edit/{id}/");
    match parse_consultation(&values, Some(&existing)) {
        Ok(input) => match state.update_consultation(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Consulta actualizada exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Editar Consulta",
                &action,
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(
            render_form(&state, "Editar Consulta", &action, &values, &errors)
                .await?
                .into_response(),
        ),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let consultation = match state.get_consultation(id).await {
        Ok(c) => c,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Consulta",
        &format!("/web/consultas/delete/{id}/"),
        &format!(
            "¿Confirma que desea eliminar {}? Se eliminarán también sus tratamientos y recetas.",
            consultation.display_name()
        ),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_consultation(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Consulta eliminada exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
