//! The alternate gate mode: HTTP Basic Auth checked on every request to a
//! gated route, no cookie round-trip. Same Session Gate semantics, different
//! transport for the credential.

use crate::gate::constant_time_eq;
use crate::server::AppState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;

pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if credentials_match(&state, request.headers()) {
        next.run(request).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"scorecard\"")],
            Json(json!({
                "error": { "code": "unauthorized", "message": "authentication required" }
            })),
        )
            .into_response()
    }
}

fn credentials_match(state: &AppState, headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(text) = String::from_utf8(decoded) else {
        return false;
    };
    let Some((username, password)) = text.split_once(':') else {
        return false;
    };
    constant_time_eq(username.as_bytes(), state.config.username.as_bytes())
        && constant_time_eq(password.as_bytes(), state.config.password.as_bytes())
}
