//! Minimal HTML rendering for the form surface.
//!
//! No templating engine: pages are small and uniform enough that direct
//! string assembly with systematic escaping is the whole job. Every dynamic
//! value passes through [`escape`] before insertion.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use vital_core::errors::FieldErrors;
use vital_core::forms::{FormField, Widget};

/// Select options per field name: `(value, label)` pairs supplied at render
/// time from enum variants or related records.
pub type SelectOptions = HashMap<&'static str, Vec<(String, String)>>;

/// One table row on a list page.
pub struct ListRow {
    pub id: i64,
    pub cells: Vec<String>,
}

/// HTML-escape a value for element content or attribute position.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | Salud Vital</title>\n</head>\n<body>\n\
         <header><h1>Salud Vital</h1></header>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        escape(title)
    )
}

/// List page: optional notice banner, a create link, and one table row per
/// record with edit and delete links.
#[must_use]
pub fn list_page(
    title: &str,
    segment: &str,
    columns: &[&str],
    rows: &[ListRow],
    notice: Option<&str>,
) -> Html<String> {
    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(&format!("<p class=\"notice\">{}</p>\n", escape(notice)));
    }
    body.push_str(&format!(
        "<h2>{}</h2>\n<p><a href=\"/web/{segment}/create/\">Nuevo registro</a></p>\n",
        escape(title)
    ));
    body.push_str("<table>\n<thead><tr>");
    for column in columns {
        body.push_str(&format!("<th>{}</th>", escape(column)));
    }
    body.push_str("<th>Acciones</th></tr></thead>\n<tbody>\n");
    for row in rows {
        body.push_str("<tr>");
        for cell in &row.cells {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str(&format!(
            "<td><a href=\"/web/{segment}/edit/{id}/\">Editar</a> \
             <a href=\"/web/{segment}/delete/{id}/\">Eliminar</a></td>",
            id = row.id
        ));
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>");
    Html(layout(title, &body))
}

fn widget_input_type(widget: Widget) -> &'static str {
    match widget {
        Widget::Email => "email",
        Widget::Date => "date",
        Widget::DateTimeLocal => "datetime-local",
        Widget::Number => "number",
        Widget::Text | Widget::Textarea | Widget::Select => "text",
    }
}

/// Entry form, used for both create and edit. `values` holds the raw
/// submitted (or pre-filled) strings; `errors` lines each message up under
/// its field.
#[must_use]
pub fn form_page(
    title: &str,
    action: &str,
    fields: &[FormField],
    values: &HashMap<String, String>,
    options: &SelectOptions,
    errors: &FieldErrors,
) -> Html<String> {
    let mut body = format!(
        "<h2>{}</h2>\n<form method=\"post\" action=\"{}\">\n",
        escape(title),
        escape(action)
    );
    for field in fields {
        let value = values.get(field.name).map_or("", String::as_str);
        body.push_str("<div class=\"field\">\n");
        body.push_str(&format!(
            "<label for=\"id_{0}\">{1}</label>\n",
            field.name,
            escape(field.label)
        ));
        match field.widget {
            Widget::Textarea => {
                let rows = field.rows.unwrap_or(3);
                let placeholder = field
                    .placeholder
                    .map_or_else(String::new, |p| format!(" placeholder=\"{}\"", escape(p)));
                body.push_str(&format!(
                    "<textarea id=\"id_{0}\" name=\"{0}\" rows=\"{rows}\"{placeholder}>{1}</textarea>\n",
                    field.name,
                    escape(value)
                ));
            }
            Widget::Select => {
                body.push_str(&format!("<select id=\"id_{0}\" name=\"{0}\">\n", field.name));
                body.push_str("<option value=\"\">---------</option>\n");
                if let Some(choices) = options.get(field.name) {
                    for (option_value, option_label) in choices {
                        let selected = if option_value == value { " selected" } else { "" };
                        body.push_str(&format!(
                            "<option value=\"{}\"{selected}>{}</option>\n",
                            escape(option_value),
                            escape(option_label)
                        ));
                    }
                }
                body.push_str("</select>\n");
            }
            _ => {
                let placeholder = field
                    .placeholder
                    .map_or_else(String::new, |p| format!(" placeholder=\"{}\"", escape(p)));
                body.push_str(&format!(
                    "<input type=\"{2}\" id=\"id_{0}\" name=\"{0}\" value=\"{1}\"{placeholder}>\n",
                    field.name,
                    escape(value),
                    widget_input_type(field.widget)
                ));
            }
        }
        if let Some(messages) = errors.get(field.name) {
            for message in messages {
                body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
            }
        }
        body.push_str("</div>\n");
    }
    body.push_str("<button type=\"submit\">Guardar</button>\n</form>");
    Html(layout(title, &body))
}

/// Delete confirmation page: prompt plus a POST-to-confirm form.
#[must_use]
pub fn confirm_page(title: &str, action: &str, prompt: &str) -> Html<String> {
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<form method=\"post\" action=\"{}\">\n\
         <button type=\"submit\">Eliminar</button>\n</form>",
        escape(title),
        escape(prompt),
        escape(action)
    );
    Html(layout(title, &body))
}

/// Plain 404 page for the HTML surface.
#[must_use]
pub fn not_found() -> Response {
    let body = "<h2>404</h2>\n<p>Página no encontrada.</p>";
    (
        StatusCode::NOT_FOUND,
        Html(layout("Página no encontrada", body)),
    )
        .into_response()
}
