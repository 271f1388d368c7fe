//! # souk-api — HTTP Surface for the Souk Arbitration Backend
//!
//! Axum application exposing the dispute workflow to the admin console:
//!
//! - dispute intake, review moves, triage, messaging, notes, resolution
//!   ([`routes::disputes`])
//! - dashboard summary statistics ([`routes::reports`])
//! - structured error mapping ([`error`]), shared state ([`state`]), and
//!   the persist-or-rollback boundary to the marketplace backend
//!   ([`persistence`])
//!
//! The binary (`main.rs`) wires in the background SLA sweep from
//! `souk-automation`: started at process init, stopped on shutdown.

pub mod error;
pub mod persistence;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with tracing and CORS layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::disputes::router())
        .merge(routes::reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({"status": "ok"}))
}
