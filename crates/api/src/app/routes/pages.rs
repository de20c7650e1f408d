//! Page endpoints.
//!
//! Rendering lives in the front end; these handlers only answer with the page
//! identity and, on guarded pages, who is viewing it.

use axum::{Extension, Json, extract::Path};
use serde_json::{Value, json};

use crate::context::PrincipalContext;

fn page(name: &str, viewer: Option<&PrincipalContext>) -> Json<Value> {
    Json(json!({
        "page": name,
        "viewer": viewer.map(|p| json!({
            "principal_id": p.principal_id().to_string(),
            "role": p.role().as_str(),
        })),
    }))
}

pub async fn home() -> Json<Value> {
    page("home", None)
}

pub async fn forum() -> Json<Value> {
    page("forum", None)
}

pub async fn articles() -> Json<Value> {
    page("articles", None)
}

pub async fn tournaments() -> Json<Value> {
    page("tournaments", None)
}

pub async fn new_topic(principal: Option<Extension<PrincipalContext>>) -> Json<Value> {
    page("forum.new_topic", principal.as_deref())
}

pub async fn create_article(principal: Option<Extension<PrincipalContext>>) -> Json<Value> {
    page("articles.create", principal.as_deref())
}

pub async fn edit_article(
    Path(id): Path<String>,
    principal: Option<Extension<PrincipalContext>>,
) -> Json<Value> {
    let Json(mut body) = page("articles.edit", principal.as_deref());
    body["article_id"] = json!(id);
    Json(body)
}

pub async fn create_tournament(principal: Option<Extension<PrincipalContext>>) -> Json<Value> {
    page("tournaments.create", principal.as_deref())
}

pub async fn manage_tournament(
    Path(id): Path<String>,
    principal: Option<Extension<PrincipalContext>>,
) -> Json<Value> {
    let Json(mut body) = page("tournaments.manage", principal.as_deref());
    body["tournament_id"] = json!(id);
    Json(body)
}

pub async fn admin(principal: Option<Extension<PrincipalContext>>) -> Json<Value> {
    page("admin", principal.as_deref())
}

/// GET /admin/*rest - any admin sub-page.
pub async fn admin_section(
    Path(rest): Path<String>,
    principal: Option<Extension<PrincipalContext>>,
) -> Json<Value> {
    let Json(mut body) = page("admin", principal.as_deref());
    body["section"] = json!(rest);
    Json(body)
}
