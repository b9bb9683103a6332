//! # vital-http
//!
//! HTTP layer for Salud Vital. Every entity is exposed twice: a JSON REST
//! API at `/<entidad>/` and a server-rendered HTML form surface at
//! `/web/<entidad>/`. Both families share the same validation and
//! repository layer; they differ only in how input arrives and how errors
//! are presented (JSON field map vs inline form redisplay).

pub mod api;
pub mod error;
pub mod render;
pub mod routes;
pub mod web;

pub use routes::router;

use std::sync::Arc;

use vital_db::ClinicService;

/// Shared handler state: one service handle for the whole router.
pub type AppState = Arc<ClinicService>;
