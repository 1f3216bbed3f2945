pub mod basic_auth;
mod handlers;

use crate::config::{AppConfig, GateMode};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::gate::session::MemorySessionStore;
use crate::gate::SessionGate;
use crate::render::Renderer;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Everything a request needs, built once at startup and passed explicitly:
/// immutable configuration, the Session Gate, and the Renderer over the
/// immutable dataset. No ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gate: Arc<SessionGate>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<AppState> {
        let dataset = Dataset::built_in()?;
        dataset.validate()?;
        let gate = SessionGate::new(
            Arc::new(MemorySessionStore::new()),
            config.password.clone(),
            config.session_ttl_secs,
        );
        Ok(AppState {
            config: Arc::new(config),
            gate: Arc::new(gate),
            renderer: Arc::new(Renderer::new(Arc::new(dataset))),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut gated = Router::new()
        .route("/", get(handlers::index_handler))
        .route("/login", post(handlers::login_handler))
        .route("/logout", get(handlers::logout_handler))
        .route("/api/companies", get(handlers::companies_handler))
        .route("/api/scores/:company", get(handlers::scores_handler))
        .route("/api/chart/:company", get(handlers::chart_handler))
        .route(
            "/api/detail/:company/:category",
            get(handlers::detail_handler),
        );

    if state.config.gate_mode == GateMode::BasicAuth {
        gated = gated.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            basic_auth::require_basic_auth,
        ));
    }

    // Liveness stays outside the gate.
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .merge(gated)
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, mode = ?state.config.gate_mode, "scorecard listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
