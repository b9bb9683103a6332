//! `/web/medicamentos/` handlers.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Medication;
use vital_core::errors::FieldErrors;
use vital_core::forms::{MEDICATION_FIELDS, parse_medication};
use vital_db::error::DatabaseError;
use vital_db::filters::MedicationFilter;

use super::{NoticeQuery, redirect_with_notice};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "medicamentos";

fn form_values(medication: &Medication) -> HashMap<String, String> {
    HashMap::from([
        ("nombre".to_string(), medication.nombre.clone()),
        ("laboratorio".to_string(), medication.laboratorio.clone()),
        ("stock".to_string(), medication.stock.to_string()),
        (
            "precio_unitario".to_string(),
            medication.precio_unitario.to_string(),
        ),
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
        &MEDICATION_FIELDS,
        values,
        &SelectOptions::new(),
        errors,
    )
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let medications = state.list_medications(&MedicationFilter::default()).await?;
    let rows: Vec<ListRow> = medications
        .iter()
        .map(|m| ListRow {
            id: m.id,
            cells: vec![
                m.id.to_string(),
                m.nombre.clone(),
                m.laboratorio.clone(),
                m.stock.to_string(),
                format!("${}", m.precio_unitario),
            ],
        })
        .collect();
    Ok(render::list_page(
        "Medicamentos",
        SEGMENT,
        &["ID", "Nombre", "Laboratorio", "Stock", "Precio Unitario"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form() -> Html<String> {
    render_form(
        "Nuevo Medicamento",
        "/web/medicamentos/create/",
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
            "Nuevo Medicamento",
            "/web/medicamentos/create/",
            &values,
            errors,
        )
        .into_response()
    };
    match parse_medication(&values, None) {
        Ok(input) => match state.create_medication(input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Medicamento creado exitosamente.",
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
    let medication = match state.get_medication(id).await {
        Ok(m) => m,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        "Editar Medicamento",
        &format!("/web/medicamentos/edit/{id}/"),
        &form_values(&medication),
        &FieldErrors::new(),
    )
    .into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let existing = match state.get_medication(id).await {
        Ok(m) => m,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let redisplay = |errors: &FieldErrors| {
        render_form(
            "Editar Medicamento",
            &format!("/web/medicamentos/edit/{id}/"),
            &values,
            errors,
        )
        .into_response()
    };
    match parse_medication(&values, Some(&existing)) {
        Ok(input) => match state.update_medication(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Medicamento actualizado exitosamente.",
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
    let medication = match state.get_medication(id).await {
        Ok(m) => m,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Medicamento",
        &format!("/web/medicamentos/delete/{id}/"),
        &format!(
            "¿Confirma que desea eliminar {}? Se eliminarán también las recetas que lo citan.",
            medication.display_name()
        ),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_medication(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Medicamento eliminado exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
