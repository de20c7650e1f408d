//! HTTP application wiring (Axum router + guard wiring).
//!
//! - `routes/`: page handlers (one file per site area)
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;

use c500_auth::{Guard, GuardConfig, Hs256JwtVerifier, RouteConfigError};

use crate::config::ApiConfig;
use crate::middleware;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Result<Router, RouteConfigError> {
    let verifier = Arc::new(Hs256JwtVerifier::new(config.jwt_secret.as_bytes()));
    let guard = Guard::new(GuardConfig::commander500()?, verifier);
    Ok(build_app_with_guard(guard))
}

/// Build the router around an already assembled guard.
pub fn build_app_with_guard(guard: Guard) -> Router {
    let guard_state = middleware::GuardState { guard };

    // Fallback is registered before the layer so unknown paths under a
    // protected prefix are still guarded.
    routes::router()
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
                guard_state,
                middleware::guard_middleware,
            )),
        )
}
