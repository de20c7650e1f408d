//! Route guard middleware: cookie extraction and decision-to-response mapping.

use axum::{
    extract::State,
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use c500_auth::{Guard, GuardDecision};

use crate::context::PrincipalContext;

/// Cookie carrying the session token.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Clone)]
pub struct GuardState {
    pub guard: Guard,
}

pub async fn guard_middleware(
    State(state): State<GuardState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if !state.guard.engages(&path) {
        return next.run(req).await;
    }

    let token = extract_cookie(req.headers(), AUTH_COOKIE_NAME);
    let decision = state.guard.evaluate(&path, token.as_deref()).await;
    tracing::debug!(path = %path, decision = decision.kind(), "route guard");

    match decision {
        GuardDecision::Allow { claims } => {
            if let Some(claims) = claims {
                req.extensions_mut().insert(PrincipalContext::from(claims));
            }
            next.run(req).await
        }
        rejected => {
            let paths = state.guard.config().paths();
            let location = rejected
                .location(paths)
                .unwrap_or_else(|| paths.fallback.clone());
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Value of the named cookie across all `Cookie` headers, if non-empty.
///
/// Headers are scanned as bytes: other cookies may carry non-ASCII values,
/// and only the requested value has to be valid UTF-8.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .flat_map(|value| value.as_bytes().split(|b| *b == b';'))
        .filter_map(|pair| {
            let eq = pair.iter().position(|b| *b == b'=')?;
            Some((&pair[..eq], &pair[eq + 1..]))
        })
        .find(|(key, _)| key.trim_ascii() == name.as_bytes())
        .and_then(|(_, value)| std::str::from_utf8(value.trim_ascii()).ok())
        .map(|value| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for c in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(c).unwrap());
        }
        headers
    }

    #[test]
    fn finds_cookie_among_others() {
        let h = headers(&["theme=dark; auth_token=abc.def.ghi; lang=en"]);
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn non_ascii_neighbour_does_not_hide_token() {
        let mut h = HeaderMap::new();
        h.append(
            header::COOKIE,
            HeaderValue::from_bytes("name=Jos\u{e9}; auth_token=tok".as_bytes()).unwrap(),
        );
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME).as_deref(), Some("tok"));
    }

    #[test]
    fn finds_cookie_in_second_header() {
        let h = headers(&["theme=dark", "auth_token=tok"]);
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME).as_deref(), Some("tok"));
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert_eq!(extract_cookie(&headers(&[]), AUTH_COOKIE_NAME), None);
        assert_eq!(extract_cookie(&headers(&["auth_token="]), AUTH_COOKIE_NAME), None);
        assert_eq!(extract_cookie(&headers(&["xauth_token=tok"]), AUTH_COOKIE_NAME), None);
    }

    #[test]
    fn strips_quotes() {
        let h = headers(&["auth_token=\"tok\""]);
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME).as_deref(), Some("tok"));
    }
}
