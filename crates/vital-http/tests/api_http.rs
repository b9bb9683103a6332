//! JSON API tests driven through the full router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use vital_db::ClinicService;

async fn app() -> Router {
    let service = ClinicService::open_local(":memory:").await.unwrap();
    vital_http::router(Arc::new(service))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(v) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, created) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {created}");
    created["id"].as_i64().unwrap()
}

fn patient_body(rut: &str) -> Value {
    json!({
        "rut": rut,
        "nombre": "Ana",
        "apellido": "Rojas",
        "fecha_nacimiento": "1990-05-14",
        "tipo_sangre": "A+",
        "correo": "ana.rojas@correo.cl",
        "telefono": "+56 9 1234 5678",
        "direccion": "Av. Siempre Viva 742"
    })
}

/// Posts the full chain and returns (consulta, tratamiento, medicamento, receta).
async fn seed_chain(app: &Router) -> (i64, i64, i64, i64) {
    let especialidad = create(
        app,
        "/especialidades/",
        json!({ "nombre": "Medicina General", "descripcion": "Atención primaria" }),
    )
    .await;
    let paciente = create(app, "/pacientes/", patient_body("12345678-9")).await;
    let medico = create(
        app,
        "/medicos/",
        json!({
            "nombre": "Carla", "apellido": "Soto", "rut": "11222333-4",
            "correo": "carla.soto@saludvital.cl", "telefono": "+56 9 5555 5555",
            "especialidad": especialidad
        }),
    )
    .await;
    let consulta = create(
        app,
        "/consultas/",
        json!({
            "paciente": paciente, "medico": medico,
            "fecha_consulta": "2024-03-15T10:30:00",
            "motivo": "Fiebre persistente", "diagnostico": "Cuadro viral"
        }),
    )
    .await;
    let tratamiento = create(
        app,
        "/tratamientos/",
        json!({ "consulta": consulta, "descripcion": "Reposo", "duracion_dias": 5 }),
    )
    .await;
    let medicamento = create(
        app,
        "/medicamentos/",
        json!({
            "nombre": "Paracetamol 500mg", "laboratorio": "Lab Chile",
            "stock": 120, "precio_unitario": "1290.50"
        }),
    )
    .await;
    let receta = create(
        app,
        "/recetas/",
        json!({
            "tratamiento": tratamiento, "medicamento": medicamento,
            "dosis": "1 comprimido", "frecuencia": "8H",
            "duracion": "5 días", "motivo": "Fiebre"
        }),
    )
    .await;
    (consulta, tratamiento, medicamento, receta)
}

#[tokio::test]
async fn home_lists_the_collections() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pacientes"], "/pacientes/");
    assert_eq!(body["recetas"], "/recetas/");
}

#[tokio::test]
async fn specialty_crud_cycle() {
    let app = app().await;
    let id = create(
        &app,
        "/especialidades/",
        json!({ "nombre": "Cardiología", "descripcion": "Corazón" }),
    )
    .await;

    let (status, fetched) = send(&app, "GET", &format!("/especialidades/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["nombre"], "Cardiología");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/especialidades/{id}/"),
        Some(json!({ "nombre": "Cardiología Adulto", "descripcion": "Corazón" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nombre"], "Cardiología Adulto");

    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/especialidades/{id}/"),
        Some(json!({ "descripcion": "Corazón y circulación" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["nombre"], "Cardiología Adulto");
    assert_eq!(patched["descripcion"], "Corazón y circulación");

    let (status, _) = send(&app, "DELETE", &format!("/especialidades/{id}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/especialidades/{id}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], format!("Especialidad con id {id} no existe"));
}

#[tokio::test]
async fn invalid_email_returns_field_error_map() {
    let app = app().await;
    let mut body = patient_body("12345678-9");
    body["correo"] = json!("sin-arroba");
    let (status, errors) = send(&app, "POST", "/pacientes/", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        errors["correo"][0],
        "Ingrese una dirección de correo electrónico válida."
    );
}

#[tokio::test]
async fn duplicate_rut_returns_field_error() {
    let app = app().await;
    create(&app, "/pacientes/", patient_body("12345678-9")).await;
    let (status, errors) = send(&app, "POST", "/pacientes/", Some(patient_body("12345678-9"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["rut"][0], "Ya existe Paciente con este Rut.");
}

#[tokio::test]
async fn unknown_estado_is_rejected_at_the_body_boundary() {
    let app = app().await;
    let (_, _, _, _) = seed_chain(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        "/consultas/",
        Some(json!({
            "paciente": 1, "medico": 1,
            "fecha_consulta": "2024-03-15T10:30:00",
            "motivo": "Control", "diagnostico": "OK",
            "estado": "PENDIENTE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("estado"));
}

#[tokio::test]
async fn malformed_json_body_is_reported_as_json() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/especialidades/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{no es json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn deleting_a_consultation_cascades_over_the_api() {
    let app = app().await;
    let (consulta, tratamiento, medicamento, receta) = seed_chain(&app).await;

    let (status, _) = send(&app, "DELETE", &format!("/consultas/{consulta}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/tratamientos/{tratamiento}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/recetas/{receta}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/medicamentos/{medicamento}/"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn patch_changes_only_the_supplied_fields() {
    let app = app().await;
    let (_, _, medicamento, _) = seed_chain(&app).await;

    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/medicamentos/{medicamento}/"),
        Some(json!({ "stock": 80 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["stock"], 80);
    assert_eq!(patched["nombre"], "Paracetamol 500mg");
    assert_eq!(patched["precio_unitario"], "1290.50");
}

#[tokio::test]
async fn list_filters_pass_through_the_query_string() {
    let app = app().await;
    seed_chain(&app).await;
    create(
        &app,
        "/medicamentos/",
        json!({
            "nombre": "Ibuprofeno 400mg", "laboratorio": "Otro Lab",
            "stock": 5, "precio_unitario": "990"
        }),
    )
    .await;

    let (status, listed) = send(&app, "GET", "/medicamentos/?stock_minimo=100", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["nombre"], "Paracetamol 500mg");

    let (status, listed) = send(&app, "GET", "/consultas/?estado=COMPLETADA", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_api_path_is_a_json_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/inventario/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No encontrado.");
}
