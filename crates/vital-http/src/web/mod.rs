//! HTML form family: one handler module per entity.
//!
//! Every module follows the same contract: a list page, a create form
//! (GET shows it, POST validates and either redirects with a notice or
//! re-renders with inline errors), an edit form with the same shape
//! pre-filled, and a delete confirmation. A missing id renders the plain
//! 404 page instead of the JSON detail body.

pub mod consultation;
pub mod doctor;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod specialty;
pub mod treatment;

use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

/// `?notice=` banner shown on list pages after a successful mutation.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Redirect to the entity's list page carrying a success notice.
pub(crate) fn redirect_with_notice(segment: &str, notice: &str) -> Response {
    let query = serde_urlencoded::to_string([("notice", notice)]).unwrap_or_default();
    Redirect::to(&format!("/web/{segment}/?{query}")).into_response()
}

pub(crate) fn yes_no(flag: bool) -> String {
    if flag { "Sí".to_string() } else { "No".to_string() }
}
