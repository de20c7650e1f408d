use axum::{
    Extension, Json,
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use crate::app::errors;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /profile - identity of the signed-in member.
pub async fn profile(principal: Option<Extension<PrincipalContext>>) -> axum::response::Response {
    let Some(Extension(principal)) = principal else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "no session");
    };

    Json(serde_json::json!({
        "principal_id": principal.principal_id().to_string(),
        "role": principal.role().as_str(),
    }))
    .into_response()
}

pub async fn not_found(uri: Uri) -> axum::response::Response {
    errors::not_found(uri.path())
}
