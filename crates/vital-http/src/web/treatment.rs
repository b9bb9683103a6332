//! `/web/tratamientos/` handlers.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use vital_core::entities::Treatment;
use vital_core::errors::FieldErrors;
use vital_core::forms::{TREATMENT_FIELDS, parse_treatment};
use vital_db::error::DatabaseError;
use vital_db::filters::{ConsultationFilter, TreatmentFilter};

use super::{NoticeQuery, redirect_with_notice};
use crate::AppState;
use crate::error::ApiError;
use crate::render::{self, ListRow, SelectOptions};

const SEGMENT: &str = "tratamientos";

async fn select_options(state: &AppState) -> Result<SelectOptions, ApiError> {
    let consultations = state
        .list_consultations(&ConsultationFilter::default())
        .await?;
    Ok(SelectOptions::from([(
        "consulta",
        consultations
            .iter()
            .map(|c| (c.id.to_string(), c.display_name()))
            .collect(),
    )]))
}

fn form_values(treatment: &Treatment) -> HashMap<String, String> {
    HashMap::from([
        ("consulta".to_string(), treatment.consulta.to_string()),
        ("descripcion".to_string(), treatment.descripcion.clone()),
        (
            "duracion_dias".to_string(),
            treatment.duracion_dias.to_string(),
        ),
        (
            "observaciones".to_string(),
            treatment.observaciones.clone().unwrap_or_default(),
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
        &TREATMENT_FIELDS,
        values,
        &options,
        errors,
    ))
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let treatments = state.list_treatments(&TreatmentFilter::default()).await?;
    let rows: Vec<ListRow> = treatments
        .iter()
        .map(|t| ListRow {
            id: t.id,
            cells: vec![
                t.id.to_string(),
                t.consulta.to_string(),
                t.descripcion.clone(),
                format!("{} días", t.duracion_dias),
            ],
        })
        .collect();
    Ok(render::list_page(
        "Tratamientos",
        SEGMENT,
        &["ID", "Consulta", "Descripción", "Duración"],
        &rows,
        query.notice.as_deref(),
    ))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_form(
        &state,
        "Nuevo Tratamiento",
        "/web/tratamientos/create/",
        &HashMap::new(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    match parse_treatment(&values, None) {
        Ok(input) => match state.create_treatment(input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Tratamiento creado exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Nuevo Tratamiento",
                "/web/tratamientos/create/",
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(render_form(
            &state,
            "Nuevo Tratamiento",
            "/web/tratamientos/create/",
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
    let treatment = match state.get_treatment(id).await {
        Ok(t) => t,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render_form(
        &state,
        "Editar Tratamiento",
        &format!("/web/tratamientos/edit/{id}/"),
        &form_values(&treatment),
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
    let existing = match state.get_treatment(id).await {
        Ok(t) => t,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    let action = format!("/web/tratamientos/edit/{id}/");
    match parse_treatment(&values, Some(&existing)) {
        Ok(input) => match state.update_treatment(id, input).await {
            Ok(_) => Ok(redirect_with_notice(
                SEGMENT,
                "Tratamiento actualizado exitosamente.",
            )),
            Err(DatabaseError::Invalid(errors)) => Ok(render_form(
                &state,
                "Editar Tratamiento",
                &action,
                &values,
                &errors,
            )
            .await?
            .into_response()),
            Err(other) => Err(other.into()),
        },
        Err(errors) => Ok(
            render_form(&state, "Editar Tratamiento", &action, &values, &errors)
                .await?
                .into_response(),
        ),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let treatment = match state.get_treatment(id).await {
        Ok(t) => t,
        Err(DatabaseError::NotFound { .. }) => return Ok(render::not_found()),
        Err(other) => return Err(other.into()),
    };
    Ok(render::confirm_page(
        "Eliminar Tratamiento",
        &format!("/web/tratamientos/delete/{id}/"),
        &format!(
            "¿Confirma que desea eliminar {}? Se eliminarán también sus recetas.",
            treatment.display_name()
        ),
    )
    .into_response())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.delete_treatment(id).await {
        Ok(()) => Ok(redirect_with_notice(
            SEGMENT,
            "Tratamiento eliminado exitosamente.",
        )),
        Err(DatabaseError::NotFound { .. }) => Ok(render::not_found()),
        Err(other) => Err(other.into()),
    }
}
