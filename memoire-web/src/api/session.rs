//! Session gate
//!
//! A boolean cookie set after a correct shared-password submission (or a
//! valid secret query parameter). The dashboard API is always behind the
//! gate; when the deployment is flagged private, everything else is too.
//! This is a config-driven redirect for wedding guests, not a security
//! boundary.

use crate::error::Error;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Session cookie name
pub const SESSION_COOKIE: &str = "wedding_authenticated";
/// Cookie lifetime: 7 days
const SESSION_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    password: String,
}

/// POST /api/session - exchange the shared password for a session cookie
///
/// An empty configured password rejects every login (fail closed, matching
/// an unconfigured deployment).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    if state.site.password.is_empty() || req.password != state.site.password {
        return Error::Unauthorized.into_response();
    }

    info!("Session opened via password");
    let cookie = format!(
        "{}=true; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE, SESSION_MAX_AGE_SECS
    );
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "status": "ok" })),
    )
        .into_response()
}

/// DELETE /api/session - clear the session cookie
pub async fn logout() -> Response {
    let cookie = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "status": "ok" })),
    )
        .into_response()
}

/// Route guard middleware
///
/// - `/api/dashboard/*` always requires a session;
/// - with the private-site flag set, every other path requires one too,
///   except the health endpoint, the session endpoint itself, and the auth
///   page;
/// - a request carrying the configured `?secret=` token passes;
/// - rejected API paths get 401 JSON, rejected page paths a redirect to
///   `/auth?redirect=<path>`.
pub async fn session_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let exempt = path == "/health" || path == "/api/session" || path.starts_with("/auth");
    let dashboard = path.starts_with("/api/dashboard");
    let protected = dashboard || (state.site.private_site && !exempt);

    if !protected {
        return next.run(request).await;
    }

    if has_session_cookie(request.headers()) || has_valid_secret(&state, request.uri().query()) {
        return next.run(request).await;
    }

    if path.starts_with("/api") {
        Error::Unauthorized.into_response()
    } else {
        Redirect::to(&format!("/auth?redirect={}", path)).into_response()
    }
}

/// True when the session cookie is present and set
fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|pair| pair.trim() == format!("{}=true", SESSION_COOKIE))
}

/// True when the query string carries the configured secret token
fn has_valid_secret(state: &AppState, query: Option<&str>) -> bool {
    if state.site.secret_token.is_empty() {
        return false;
    }
    let Some(query) = query else {
        return false;
    };
    query
        .split('&')
        .filter_map(|param| param.strip_prefix("secret="))
        .any(|value| value == state.site.secret_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_session_cookie(&headers));

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; wedding_authenticated=true"),
        );
        assert!(has_session_cookie(&headers));

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("wedding_authenticated=false"),
        );
        assert!(!has_session_cookie(&headers));
    }
}
