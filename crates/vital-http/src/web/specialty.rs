//! `/web/especialidades/` handlers.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Specialty;
use vital_core::errors::FieldErrors;
use vital_core::forms::{SPECIALTY_FIELDS, parse_specialty};
use vital_db::error::DatabaseError;

use super::{NoticeQuery, redirect_with_notice};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "especialidades";

fn form_values(specialty: &Specialty) -> HashMap<String, String> {
    HashMap::from([
        ("nombre".to_string(), specialty.nombre.clone()),
        ("descripcion".to_string(), specialty.descripcion.clone()),
    ])
}

fn render_form(
    title: &str,
    action: &str,
    values: &HashMap<String, String>,
    errors: &FieldErrors,
) -> Html<String> {
    render::form_page(
        title,
        action,
        &SPECIALTY_FIELDS,
        values,
        &SelectOptions::new(),
        errors,
    )
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let specialties = state.list_specialties().await?;
    let rows: Vec<ListRow> = specialties
        .iter()
        .map(|s| ListRow {
            id: s.id,
            cells: vec![s.id.to_string(), s.nombre.clone(), s.descripcion.clone()],
        })
        .collect();
    Ok(render::list_page(
        "Especialidades",
        SEGMENT,
        &["ID", "Nombre", "Descripción"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form() -> Html<String> {
    render_form(
        "Nueva Especialidad",
        "/web/especialidades/create/",
        &HashMap::new(),
        &FieldErrors::new(),
    )
}

pub async fn create_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let redisplay = |errors: &FieldErrors| {
        render_form(
            "Nueva Especialidad",
            "/web/especialidades/create/",
            &values,
            errors,
        )
        .into_response()
    };
    match parse_specialty(&values, None) {
        Ok(input) => match state.create_specialty(input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Especialidad creada exitosamente.",
            )),
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
    let specialty = match state.get_specialty(id).await {
        Ok(s) => s,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        "Editar Especialidad",
        &format!("/web/especialidades/edit/{id}/"),
        &form_values(&specialty),
        &FieldErrors::new(),
    )
    .into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let existing = match state.get_specialty(id).await {
        Ok(s) => s,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let redisplay = |errors: &FieldErrors| {
        render_form(
            "Editar Especialidad",
            &format!("/web/especialidades/edit/{id}/"),
            &values,
            errors,
        )
        .into_response()
    };
    match parse_specialty(&values, Some(&existing)) {
        Ok(input) => match state.update_specialty(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Especialidad actualizada exitosamente.",
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
    let specialty = match state.get_specialty(id).await {
        Ok(s) => s,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Especialidad",
        &format!("/web/especialidades/delete/{id}/"),
        &format!(
            "¿Confirma que desea eliminar la especialidad {}? Se eliminarán también sus médicos y las consultas asociadas.",
            specialty.display_name()
        ),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_specialty(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Especialidad eliminada exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
