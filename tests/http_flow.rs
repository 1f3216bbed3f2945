// End-to-end gate and renderer behavior through the router, one request at
// a time via tower's oneshot. Router clones share the same session store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use scorecard::config::{AppConfig, AppEnv, GateMode};
use scorecard::server::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

const PASSWORD: &str = "letmein";

fn test_config(gate_mode: GateMode) -> AppConfig {
    AppConfig {
        port: 0,
        password: PASSWORD.to_string(),
        username: "admin".to_string(),
        secret_key: "test-signing-key".to_string(),
        env: AppEnv::Development,
        session_ttl_secs: 60,
        gate_mode,
    }
}

fn app(gate_mode: GateMode) -> Router {
    let state = AppState::new(test_config(gate_mode)).expect("state should build");
    build_router(state)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should read")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).expect("body should be json")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request should build")
}

fn post_login(password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("password={password}")))
        .expect("request should build")
}

/// Log in against the given router and return the session cookie pair.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_login(PASSWORD))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .expect("cookie should be ascii");
    set_cookie
        .split(';')
        .next()
        .expect("cookie has a value")
        .to_string()
}

#[tokio::test]
async fn fresh_client_gets_the_login_prompt() {
    let app = app(GateMode::FullPage);
    let response = app.oneshot(get("/")).await.expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Enter Password"));
    assert!(!body.contains("Databricks"));
}

#[tokio::test]
async fn wrong_password_rerenders_login_with_message() {
    let app = app(GateMode::FullPage);
    let response = app
        .clone()
        .oneshot(post_login("guess"))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_string(response).await;
    assert!(body.contains("Incorrect Password"));

    // The gate state did not move: the page is still the login prompt.
    let response = app.oneshot(get("/")).await.expect("request should run");
    assert!(body_string(response).await.contains("Enter Password"));
}

#[tokio::test]
async fn login_then_scorecard_then_logout_then_login_prompt() {
    let app = app(GateMode::FullPage);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    let body = body_string(response).await;
    assert!(body.contains("Databricks"));
    assert!(body.contains("1.35"));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );

    // The old cookie no longer opens the scorecard.
    let response = app
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .expect("request should run");
    assert!(body_string(response).await.contains("Enter Password"));
}

#[tokio::test]
async fn company_selection_and_category_detail_render() {
    let app = app(GateMode::FullPage);
    let cookie = login(&app).await;
    let response = app
        .oneshot(get_with_cookie(
            "/?company=Snowflake&category=Headcount%20Efficiency",
            &cookie,
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Snowflake Leadership Scores"));
    assert!(body.contains("Weight Applied: 15%"));
    assert!(body.contains("Score Assigned: 9"));
}

#[tokio::test]
async fn unknown_company_on_the_page_is_a_friendly_404() {
    let app = app(GateMode::FullPage);
    let cookie = login(&app).await;
    let response = app
        .oneshot(get_with_cookie("/?company=Unknown%20Co", &cookie))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response).await;
    assert!(body.contains("is not in the scorecard"));
}

#[tokio::test]
async fn tampered_cookie_reads_as_no_session() {
    let app = app(GateMode::FullPage);
    let cookie = login(&app).await;
    let tampered = format!("{cookie}ff");
    let response = app
        .oneshot(get_with_cookie("/", &tampered))
        .await
        .expect("request should run");
    assert!(body_string(response).await.contains("Enter Password"));
}

#[tokio::test]
async fn api_requires_authentication() {
    let app = app(GateMode::FullPage);
    let response = app
        .oneshot(get("/api/companies"))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn api_serves_companies_rows_chart_and_detail() {
    let app = app(GateMode::FullPage);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/api/companies", &cookie))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["companies"],
        serde_json::json!(["Databricks", "Snowflake", "Palantir"])
    );

    let response = app
        .clone()
        .oneshot(get_with_cookie("/api/scores/Databricks", &cookie))
        .await
        .expect("request should run");
    let body = body_json(response).await;
    let rows = body["rows"].as_array().expect("rows should be an array");
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["category"], "CEO Tenure & Impact");
    assert_eq!(rows[0]["score"], 9);
    assert_eq!(rows[0]["weight"], 0.15);
    assert_eq!(rows[0]["weighted_score"], 1.35);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/api/chart/Databricks", &cookie))
        .await
        .expect("request should run");
    let body = body_json(response).await;
    let labels = body["category_labels"]
        .as_array()
        .expect("labels should be an array");
    let values = body["score_values"]
        .as_array()
        .expect("values should be an array");
    assert_eq!(labels.len(), 10);
    assert_eq!(values.len(), 10);
    assert_eq!(labels[0], "CEO Tenure & Impact");
    assert_eq!(values[0], 9);

    let response = app
        .oneshot(get_with_cookie(
            "/api/detail/Snowflake/Headcount%20Efficiency",
            &cookie,
        ))
        .await
        .expect("request should run");
    let body = body_json(response).await;
    assert_eq!(body["score"], 9);
    assert_eq!(body["weight_percent"], 15.0);
    assert!(!body["description"]
        .as_str()
        .expect("description should be a string")
        .is_empty());
}

#[tokio::test]
async fn api_unknown_keys_are_structured_errors() {
    let app = app(GateMode::FullPage);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/api/scores/Unknown%20Co", &cookie))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "unknown_company");

    let response = app
        .oneshot(get_with_cookie("/api/detail/Snowflake/Vibes", &cookie))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "unknown_category");
}

#[tokio::test]
async fn healthz_is_ungated() {
    let app = app(GateMode::FullPage);
    let response = app.oneshot(get("/healthz")).await.expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn basic_auth_mode_challenges_without_credentials() {
    let app = app(GateMode::BasicAuth);
    let response = app.oneshot(get("/")).await.expect("request should run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn basic_auth_mode_serves_the_scorecard_directly() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let app = app(GateMode::BasicAuth);
    let credentials = STANDARD.encode(format!("admin:{PASSWORD}"));
    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Basic {credentials}"))
        .body(Body::empty())
        .expect("request should build");
    let response = app.clone().oneshot(request).await.expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Databricks"));

    // Wrong password is still challenged.
    let bad = STANDARD.encode("admin:guess");
    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Basic {bad}"))
        .body(Body::empty())
        .expect("request should build");
    let response = app.clone().oneshot(request).await.expect("request should run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Liveness stays open in this mode too.
    let response = app.oneshot(get("/healthz")).await.expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
}
