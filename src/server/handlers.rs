use crate::config::GateMode;
use crate::error::ScorecardError;
use crate::gate::{cookie, AuthResult, REJECTED_MESSAGE};
use crate::render::html;
use crate::server::AppState;
use crate::view::{select_view, ViewKind};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

#[derive(Deserialize)]
pub(super) struct LoginForm {
    #[serde(default)]
    password: String,
}

/// `GET /` — pick the view from the gate's current state, every request.
pub(super) async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let authenticated = request_authenticated(&state, &headers);
    match select_view(authenticated) {
        ViewKind::LoginPrompt => page(StatusCode::OK, html::login_page(None)),
        ViewKind::Scorecard => {
            let company = params
                .get("company")
                .map(String::as_str)
                .unwrap_or_else(|| state.renderer.default_company());
            let rows = match state.renderer.rows_for(company) {
                Ok(rows) => rows,
                Err(err) => return page_error(&err),
            };
            let series = match state.renderer.chart_series_for(company) {
                Ok(series) => series,
                Err(err) => return page_error(&err),
            };
            let detail = match params.get("category") {
                Some(category) => match state.renderer.detail_for(company, category) {
                    Ok(detail) => Some(detail),
                    Err(err) => return page_error(&err),
                },
                None => None,
            };
            page(
                StatusCode::OK,
                html::scorecard_page(
                    company,
                    state.renderer.companies(),
                    &rows,
                    &series,
                    detail.as_ref(),
                ),
            )
        }
    }
}

/// `POST /login` — run the gate check; success sets the session cookie.
pub(super) async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    if state.config.gate_mode == GateMode::BasicAuth {
        return Redirect::to("/").into_response();
    }
    let session_id = cookie::session_id_from_headers(&headers, &state.config.secret_key)
        .unwrap_or_else(cookie::new_session_id);
    match state.gate.check(&session_id, &form.password) {
        AuthResult::Authenticated => {
            let signed = cookie::sign(&session_id, &state.config.secret_key);
            (
                [(
                    header::SET_COOKIE,
                    cookie::set_cookie_value(&signed, state.config.session_ttl_secs),
                )],
                Redirect::to("/"),
            )
                .into_response()
        }
        AuthResult::Rejected => page(
            StatusCode::UNAUTHORIZED,
            html::login_page(Some(REJECTED_MESSAGE)),
        ),
    }
}

/// `GET /logout` — clear the session, drop the cookie, and send the client
/// back to the gate view uncached.
pub(super) async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    if let Some(session_id) =
        cookie::session_id_from_headers(&headers, &state.config.secret_key)
    {
        state.gate.logout(&session_id);
    }
    (
        [
            (header::CACHE_CONTROL, "no-store".to_string()),
            (header::SET_COOKIE, cookie::clear_cookie_value()),
        ],
        Redirect::to("/"),
    )
        .into_response()
}

pub(super) async fn companies_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    if !request_authenticated(&state, &headers) {
        return unauthorized();
    }
    let names: Vec<&str> = state
        .renderer
        .companies()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    Json(json!({ "companies": names })).into_response()
}

pub(super) async fn scores_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(company): Path<String>,
) -> Response {
    if !request_authenticated(&state, &headers) {
        return unauthorized();
    }
    match state.renderer.rows_for(&company) {
        Ok(rows) => Json(json!({ "company": company, "rows": rows })).into_response(),
        Err(err) => api_error(&err),
    }
}

pub(super) async fn chart_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(company): Path<String>,
) -> Response {
    if !request_authenticated(&state, &headers) {
        return unauthorized();
    }
    match state.renderer.chart_series_for(&company) {
        Ok(series) => Json(series).into_response(),
        Err(err) => api_error(&err),
    }
}

pub(super) async fn detail_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((company, category)): Path<(String, String)>,
) -> Response {
    if !request_authenticated(&state, &headers) {
        return unauthorized();
    }
    match state.renderer.detail_for(&company, &category) {
        Ok(detail) => Json(detail).into_response(),
        Err(err) => api_error(&err),
    }
}

pub(super) async fn healthz_handler() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

/// Gate read for one request. Basic-auth mode is enforced by middleware
/// before any handler runs; full-page mode reads the session cookie.
fn request_authenticated(state: &AppState, headers: &HeaderMap) -> bool {
    match state.config.gate_mode {
        GateMode::BasicAuth => true,
        GateMode::FullPage => {
            cookie::session_id_from_headers(headers, &state.config.secret_key)
                .map(|id| state.gate.is_authenticated(&id))
                .unwrap_or(false)
        }
    }
}

/// HTML responses are never cacheable: a scorecard page must not survive
/// logout in the client's cache.
fn page(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, "no-store")],
        Html(body),
    )
        .into_response()
}

fn page_error(err: &ScorecardError) -> Response {
    page(StatusCode::NOT_FOUND, html::not_found_page(&friendly(err)))
}

fn api_error(err: &ScorecardError) -> Response {
    let (status, code) = match err {
        ScorecardError::UnknownCompany(_) => (StatusCode::NOT_FOUND, "unknown_company"),
        ScorecardError::UnknownCategory(_) => (StatusCode::NOT_FOUND, "unknown_category"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    (
        status,
        Json(json!({ "error": { "code": code, "message": friendly(err) } })),
    )
        .into_response()
}

fn friendly(err: &ScorecardError) -> String {
    match err {
        ScorecardError::UnknownCompany(name) => {
            format!("Company '{name}' is not in the scorecard.")
        }
        ScorecardError::UnknownCategory(name) => {
            format!("Category '{name}' is not in the scorecard.")
        }
        other => other.to_string(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "code": "unauthorized", "message": "authentication required" } })),
    )
        .into_response()
}
