//! Login landing page and logout.
//!
//! Credential checking and token issuance belong to the external identity
//! service; this side only carries the callback through and clears the cookie.

use axum::{
    Json,
    extract::Query,
    http::header,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::middleware::AUTH_COOKIE_NAME;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Only same-site absolute paths may be used as a post-login destination.
fn safe_callback(raw: Option<&str>) -> &str {
    match raw {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.contains('\\') => url,
        _ => "/",
    }
}

/// GET /login - login page with the destination to return to.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Json<Value> {
    Json(json!({
        "page": "login",
        "callback_url": safe_callback(query.callback_url.as_deref()),
    }))
}

/// POST /logout - drop the session cookie and go home.
pub async fn logout() -> impl IntoResponse {
    let cleared = format!("{AUTH_COOKIE_NAME}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax");
    ([(header::SET_COOKIE, cleared)], Redirect::to("/"))
}
