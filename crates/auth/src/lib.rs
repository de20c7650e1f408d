//! `c500-auth` — session verification and route guarding for the Commander 500 site.
//!
//! This crate is intentionally decoupled from HTTP: it knows about paths,
//! tokens and roles, and leaves cookies and responses to the API layer.

pub mod claims;
pub mod guard;
pub mod roles;
pub mod routes;
pub mod verifier;

pub use claims::{PrincipalId, SessionClaims, TokenVerificationError, validate_claims};
pub use guard::{Guard, GuardDecision};
pub use roles::Role;
pub use routes::{
    GuardConfig, GuardPaths, Matcher, ProtectedRoutes, RoleRestriction, RoleRestrictions,
    RouteConfigError, path_matches,
};
pub use verifier::{Hs256JwtVerifier, TokenVerifier};
