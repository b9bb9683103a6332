//! `/web/pacientes/` handlers.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Patient;
use vital_core::enums::BloodType;
use vital_core::errors::FieldErrors;
use vital_core::forms::{PATIENT_FIELDS, parse_patient};
use vital_db::error::DatabaseError;
use vital_db::filters::PatientFilter;

use super::{NoticeQuery, redirect_with_notice, yes_no};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "pacientes";

fn select_options() -> SelectOptions {
    SelectOptions::from([(
        "tipo_sangre",
        BloodType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect(),
    )])
}

fn form_values(patient: &Patient) -> HashMap<String, String> {
    HashMap::from([
        ("rut".to_string(), patient.rut.clone()),
        ("nombre".to_string(), patient.nombre.clone()),
        ("apellido".to_string(), patient.apellido.clone()),
        (
            "fecha_nacimiento".to_string(),
            patient.fecha_nacimiento.format("%Y-%m-%d").to_string(),
        ),
        (
            "tipo_sangre".to_string(),
            patient.tipo_sangre.as_str().to_string(),
        ),
        ("correo".to_string(), patient.correo.clone()),
        ("telefono".to_string(), patient.telefono.clone()),
        ("direccion".to_string(), patient.direccion.clone()),
    ])
}

fn render_form(
    title: &str,
    action: &str,
    values: &HashMap<String, String>,
    errors: &FieldErrors,
) -> Html<String> {
    render::form_page(title, action, &PATIENT_FIELDS, values, &select_options(), errors)
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let patients = state.list_patients(&PatientFilter::default()).await?;
    let rows: Vec<ListRow> = patients
        .iter()
        .map(|p| ListRow {
            id: p.id,
            cells: vec![
                p.id.to_string(),
                p.rut.clone(),
                p.display_name(),
                p.tipo_sangre.label().to_string(),
                yes_no(p.activo),
            ],
        })
        .collect();
    Ok(render::list_page(
        "Pacientes",
        SEGMENT,
        &["ID", "RUT", "Nombre", "Tipo de Sangre", "Activo"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form() -> Html<String> {
    render_form(
        "Nuevo Paciente",
        "/web/pacientes/create/",
        &HashMap::new(),
        &FieldErrors::new(),
    )
}

pub async fn create_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let redisplay = |errors: &FieldErrors| {
        render_form("Nuevo Paciente", "/web/pacientes/create/", &values, errors).into_response()
    };
    match parse_patient(&values, None) {
        Ok(input) => match state.create_patient(input).await {
            Ok(_) => Ok(redirect_with_notice(SEGMENT, "Paciente creado exitosamente.")),
            Err(DatabaseError::Invalid(errors)) => Ok(redisplay(&errors)),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(redisplay(&errors)),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let patient = match state.get_patient(id).await {
        Ok(p) => p,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        "Editar Paciente",
        &format!("/web/pacientes/edit/{id}/"),
        &form_values(&patient),
        &FieldErrors::new(),
    )
    .into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let existing = match state.get_patient(id).await {
        Ok(p) => p,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let redisplay = |errors: &FieldErrors| {
        render_form(
            "Editar Paciente",
            &format!("/web/pacientes/edit/{id}/"),
            &values,
            errors,
        )
        .into_response()
    };
    match parse_patient(&values, Some(&existing)) {
        Ok(input) => match state.update_patient(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Paciente actualizado exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(redisplay(&errors)),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(redisplay(&errors)),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let patient = match state.get_patient(id).await {
        Ok(p) => p,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Paciente",
        &format!("/web/pacientes/delete/{id}/"),
        &format!(
            "¿Confirma que desea eliminar al paciente {}? Se eliminarán también sus consultas, tratamientos y recetas.",
            patient.display_name()
        ),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_patient(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Paciente eliminado exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
