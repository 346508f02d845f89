//! Error responses.
//!
//! JSON errors use the `{status, message}` envelope; HTML errors render the
//! shared error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::views::{render_template, ErrorView};

pub fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "status": status.as_u16(),
            "message": message,
        })),
    )
        .into_response()
}

pub fn html_error(status: StatusCode, message: &str) -> Response {
    let view = ErrorView {
        status: status.as_u16(),
        message: message.to_string(),
    };
    render_template(&view, status)
}
