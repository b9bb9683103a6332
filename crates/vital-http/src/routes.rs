//! Route table: seven entity segments, each with a JSON tree and an HTML
//! tree, plus a landing payload at `/`.

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::{AppState, api, render, web};

/// Build the complete application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .merge(api_routes())
        .merge(web_routes())
        .fallback(fallback)
        .with_state(state)
}

/// Landing payload listing the available collections.
async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "especialidades": "/especialidades/",
        "pacientes": "/pacientes/",
        "medicos": "/medicos/",
        "consultas": "/consultas/",
        "tratamientos": "/tratamientos/",
        "medicamentos": "/medicamentos/",
        "recetas": "/recetas/",
        "web": "/web/pacientes/",
    }))
}

/// Unknown paths: HTML 404 under `/web/`, JSON 404 elsewhere.
async fn fallback(uri: Uri) -> Response {
    if uri.path().starts_with("/web/") {
        render::not_found()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "No encontrado." })),
        )
            .into_response()
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/especialidades/",
            get(api::specialty::list).post(api::specialty::create),
        )
        .route(
            "/especialidades/:id/",
            get(api::specialty::retrieve)
                .put(api::specialty::update)
                .patch(api::specialty::patch)
                .delete(api::specialty::destroy),
        )
        .route(
            "/pacientes/",
            get(api::patient::list).post(api::patient::create),
        )
        .route(
            "/pacientes/:id/",
            get(api::patient::retrieve)
                .put(api::patient::update)
                .patch(api::patient::patch)
                .delete(api::patient::destroy),
        )
        .route("/medicos/", get(api::doctor::list).post(api::doctor::create))
        .route(
            "/medicos/:id/",
            get(api::doctor::retrieve)
                .put(api::doctor::update)
                .patch(api::doctor::patch)
                .delete(api::doctor::destroy),
        )
        .route(
            "/consultas/",
            get(api::consultation::list).post(api::consultation::create),
        )
        .route(
            "/consultas/:id/",
            get(api::consultation::retrieve)
                .put(api::consultation::update)
                .patch(api::consultation::patch)
                .delete(api::consultation::destroy),
        )
        .route(
            "/tratamientos/",
            get(api::treatment::list).post(api::treatment::create),
        )
        .route(
            "/tratamientos/:id/",
            get(api::treatment::retrieve)
                .put(api::treatment::update)
                .patch(api::treatment::patch)
                .delete(api::treatment::destroy),
        )
        .route(
            "/medicamentos/",
            get(api::medication::list).post(api::medication::create),
        )
        .route(
            "/medicamentos/:id/",
            get(api::medication::retrieve)
                .put(api::medication::update)
                .patch(api::medication::patch)
                .delete(api::medication::destroy),
        )
        .route(
            "/recetas/",
            get(api::prescription::list).post(api::prescription::create),
        )
        .route(
            "/recetas/:id/",
            get(api::prescription::retrieve)
                .put(api::prescription::update)
                .patch(api::prescription::patch)
                .delete(api::prescription::destroy),
        )
}

fn web_routes() -> Router<AppState> {
    Router::new()
        .route("/web/especialidades/", get(web::specialty::list_page))
        .route(
            "/web/especialidades/create/",
            get(web::specialty::create_form).post(web::specialty::create_submit),
        )
        .route(
            "/web/especialidades/edit/:id/",
            get(web::specialty::edit_form).post(web::specialty::edit_submit),
        )
        .route(
            "/web/especialidades/delete/:id/",
            get(web::specialty::delete_confirm).post(web::specialty::delete_submit),
        )
        .route("/web/pacientes/", get(web::patient::list_page))
        .route(
            "/web/pacientes/create/",
            get(web::patient::create_form).post(web::patient::create_submit),
        )
        .route(
            "/web/pacientes/edit/:id/",
            get(web::patient::edit_form).post(web::patient::edit_submit),
        )
        .route(
            "/web/pacientes/delete/:id/",
            get(web::patient::delete_confirm).post(web::patient::delete_submit),
        )
        .route("/web/medicos/", get(web::doctor::list_page))
        .route(
            "/web/medicos/create/",
            get(web::doctor::create_form).post(web::doctor::create_submit),
        )
        .route(
            "/web/medicos/edit/:id/",
            get(web::doctor::edit_form).post(web::doctor::edit_submit),
        )
        .route(
            "/web/medicos/delete/:id/",
            get(web::doctor::delete_confirm).post(web::doctor::delete_submit),
        )
        .route("/web/consultas/", get(web::consultation::list_page))
        .route(
            "/web/consultas/create/",
            get(web::consultation::create_form).post(web::consultation::create_submit),
        )
        .route(
            "/web/consultas/edit/:id/",
            get(web::consultation::edit_form).post(web::consultation::edit_submit),
        )
        .route(
            "/web/consultas/delete/:id/",
            get(web::consultation::delete_confirm).post(web::consultation::delete_submit),
        )
        .route("/web/tratamientos/", get(web::treatment::list_page))
        .route(
            "/web/tratamientos/create/",
            get(web::treatment::create_form).post(web::treatment::create_submit),
        )
        .route(
            "/web/tratamientos/edit/:id/",
            get(web::treatment::edit_form).post(web::treatment::edit_submit),
        )
        .route(
            "/web/tratamientos/delete/:id/",
            get(web::treatment::delete_confirm).post(web::treatment::delete_submit),
        )
        .route("/web/medicamentos/", get(web::medication::list_page))
        .route(
            "/web/medicamentos/create/",
            get(web::medication::create_form).post(web::medication::create_submit),
        )
        .route(
            "/web/medicamentos/edit/:id/",
            get(web::medication::edit_form).post(web::medication::edit_submit),
        )
        .route(
            "/web/medicamentos/delete/:id/",
            get(web::medication::delete_confirm).post(web::medication::delete_submit),
        )
        .route("/web/recetas/", get(web::prescription::list_page))
        .route(
            "/web/recetas/create/",
            get(web::prescription::create_form).post(web::prescription::create_submit),
        )
        .route(
            "/web/recetas/edit/:id/",
            get(web::prescription::edit_form).post(web::prescription::edit_submit),
        )
        .route(
            "/web/recetas/delete/:id/",
            get(web::prescription::delete_confirm).post(web::prescription::delete_submit),
        )
}
