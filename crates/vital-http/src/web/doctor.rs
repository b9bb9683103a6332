//! `/web/medicos/` handlers.
//!
//! The specialty select is populated from the store, so the form renderers
//! here are async where the enum-only forms are not.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Doctor;
use vital_core::errors::FieldErrors;
use vital_core::forms::{DOCTOR_FIELDS, parse_doctor};
use vital_db::error::DatabaseError;
use vital_db::filters::DoctorFilter;

use super::{NoticeQuery, redirect_with_notice, yes_no};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "medicos";

async fn select_options(state: &AppState) -> Result<SelectOptions, ApiError> {
    let specialties = state.list_specialties().await?;
    Ok(SelectOptions::from([(
        "especialidad",
        specialties
            .iter()
            .map(|s| (s.id.to_string(), s.display_name()))
            .collect(),
    )]))
}

fn form_values(doctor: &Doctor) -> HashMap<String, String> {
    HashMap::from([
        ("nombre".to_string(), doctor.nombre.clone()),
        ("apellido".to_string(), doctor.apellido.clone()),
        ("rut".to_string(), doctor.rut.clone()),
        ("correo".to_string(), doctor.correo.clone()),
        ("telefono".to_string(), doctor.telefono.clone()),
        ("especialidad".to_string(), doctor.especialidad.to_string()),
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
        &DOCTOR_FIELDS,
        values,
        &options,
        errors,
    ))
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let doctors = state.list_doctors(&DoctorFilter::default()).await?;
    let rows: Vec<ListRow> = doctors
        .iter()
        .map(|d| ListRow {
            id: d.id,
            cells: vec![
                d.id.to_string(),
                d.rut.clone(),
                d.display_name(),
                d.especialidad.to_string(),
                yes_no(d.activo),
            ],
        })
        .collect();
    Ok(render::list_page(
        "Médicos",
        SEGMENT,
        &["ID", "RUT", "Nombre", "Especialidad", "Activo"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_form(
        &state,
        "Nuevo Médico",
        "/web/medicos/create/",
        &HashMap::new(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    match parse_doctor(&values, None) {
        Ok(input) => match state.create_doctor(input).await {
            Ok(_) => Ok(redirect_with_notice(SEGMENT, "Médico creado exitosamente.")),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Nuevo Médico",
                "/web/medicos/create/",
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(render_form(
            &state,
            "Nuevo Médico",
            "/web/medicos/create/",
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
    let doctor = match state.get_doctor(id).await {
        Ok(d) => d,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        &state,
        "Editar Médico",
        &format!("/web/medicos/edit/{id}/"),
        &form_values(&doctor),
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
    let existing = match state.get_doctor(id).await {
        Ok(d) => d,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let action = format!("/web/medicos/edit/{id}/");
    match parse_doctor(&values, Some(&existing)) {
        Ok(input) => match state.update_doctor(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Médico actualizado exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Editar Médico",
                &action,
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(render_form(&state, "Editar Médico", &action, &values, &errors)
            .await?
            .into_response()),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let doctor = match state.get_doctor(id).await {
        Ok(d) => d,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Médico",
        &format!("/web/medicos/delete/{id}/"),
        &format!(
            "¿Confirma que desea eliminar a {}? Se eliminarán también sus consultas y todo lo asociado.",
            doctor.display_name()
        ),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_doctor(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Médico eliminado exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
