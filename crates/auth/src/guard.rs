//! Route guard decision procedure (transport-agnostic).
//!
//! Every failure collapses into one of two redirects: missing and rejected
//! tokens both go to login, an accepted token with the wrong role goes to the
//! fallback page. The reason for a rejection is never part of the decision.

use std::sync::Arc;

use crate::{GuardConfig, GuardPaths, SessionClaims, TokenVerifier};

/// Outcome of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through. Claims are present when the path was protected.
    Allow { claims: Option<SessionClaims> },

    /// Missing or invalid session; `callback` is the originally requested path.
    RedirectToLogin { callback: String },

    /// Valid session whose role is not accepted for the path.
    RedirectToFallback,
}

impl GuardDecision {
    /// Redirect target for this decision, `None` when allowed.
    pub fn location(&self, paths: &GuardPaths) -> Option<String> {
        match self {
            GuardDecision::Allow { .. } => None,
            GuardDecision::RedirectToLogin { callback } => Some(format!(
                "{}?{}={}",
                paths.login,
                paths.callback_param,
                urlencoding::encode(callback)
            )),
            GuardDecision::RedirectToFallback => Some(paths.fallback.clone()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GuardDecision::Allow { .. } => "allow",
            GuardDecision::RedirectToLogin { .. } => "redirect_to_login",
            GuardDecision::RedirectToFallback => "redirect_to_fallback",
        }
    }
}

/// Route guard: immutable tables plus an injected token verifier.
#[derive(Clone)]
pub struct Guard {
    config: Arc<GuardConfig>,
    verifier: Arc<dyn TokenVerifier>,
}

impl Guard {
    pub fn new(config: GuardConfig, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            config: Arc::new(config),
            verifier,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Whether the request matcher routes `path` through the guard at all.
    pub fn engages(&self, path: &str) -> bool {
        self.config.matcher().matches(path)
    }

    /// Decide the fate of a request for `path` carrying an optional session token.
    pub async fn evaluate(&self, path: &str, token: Option<&str>) -> GuardDecision {
        if !self.config.protected().is_protected(path) {
            return GuardDecision::Allow { claims: None };
        }

        let login = || GuardDecision::RedirectToLogin {
            callback: path.to_string(),
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            tracing::debug!(path, "no session token on protected route");
            return login();
        };

        let claims = match self.verifier.verify(token).await {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(path, error = %e, "session token rejected");
                return login();
            }
        };

        match self.config.restrictions().restriction_for(path) {
            Some(restriction) if !restriction.accepts(&claims.role) => {
                tracing::debug!(
                    path,
                    role = %claims.role,
                    restriction = restriction.prefix(),
                    "role not accepted for route"
                );
                GuardDecision::RedirectToFallback
            }
            _ => GuardDecision::Allow {
                claims: Some(claims),
            },
        }
    }
}

impl core::fmt::Debug for Guard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Guard").field("config", &self.config).finish_non_exhaustive()
    }
}
