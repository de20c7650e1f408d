use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

/// Site-wide error body: `{ "error", "message", "home" }`.
///
/// `home` points the front end back to a page that always renders.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
            "home": "/",
        })),
    )
        .into_response()
}

/// 404 for a path no page answers to.
pub fn not_found(path: &str) -> axum::response::Response {
    json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no page at {path}"),
    )
}
