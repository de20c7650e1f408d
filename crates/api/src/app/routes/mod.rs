use axum::{
    Router,
    routing::{get, post},
};

pub mod pages;
pub mod session;
pub mod system;

/// Router for every page of the site.
///
/// Guarding is path-based and applied as a layer in `app::build_app_with_guard`,
/// so public and protected pages live side by side here.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/", get(pages::home))
        .route("/login", get(session::login_page))
        .route("/logout", post(session::logout))
        .route("/profile", get(system::profile))
        .route("/forum", get(pages::forum))
        .route("/forum/new-topic", get(pages::new_topic))
        .route("/articles", get(pages::articles))
        .route("/articles/create", get(pages::create_article))
        .route("/articles/edit/:id", get(pages::edit_article))
        .route("/tournaments", get(pages::tournaments))
        .route("/tournaments/create", get(pages::create_tournament))
        .route("/tournaments/manage/:id", get(pages::manage_tournament))
        .route("/admin", get(pages::admin))
        .route("/admin/*rest", get(pages::admin_section))
}
