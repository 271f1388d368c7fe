//! # souk-api — Binary Entry Point
//!
//! Starts the Axum HTTP server and the background SLA sweep.
//! Binds to a configurable port (default 8080).

use souk_api::state::{AppConfig, AppState};
use souk_automation::{SweepEngine, SweepTask};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let sweep_interval_secs: u64 = std::env::var("SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60);
    let config = AppConfig {
        port,
        sweep_interval_secs,
    };

    // Attempt to create the marketplace backend client from environment.
    let backend = match souk_backend_client::BackendApiConfig::from_env() {
        Ok(backend_config) => {
            tracing::info!("marketplace backend client configured");
            match souk_backend_client::BackendClient::new(backend_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::error!("failed to create backend client: {e}");
                    return Err(e.into());
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                "marketplace backend not configured: {e}. Running local-only; \
                 dispute state will not survive restarts."
            );
            None
        }
    };

    let state = AppState::with_config(config, backend);

    // Hydrate the in-memory store from the backend (if connected).
    if let Err(e) = state.hydrate_from_backend().await {
        tracing::error!("backend hydration failed: {e}");
        return Err(e.into());
    }

    // Start the background SLA sweep.
    let engine = SweepEngine::new(
        (*state.sla).clone(),
        (*state.auto_actions).clone(),
        state.system_identity.clone(),
    );
    let sweep = SweepTask::spawn(
        engine,
        state.disputes.clone(),
        std::time::Duration::from_secs(sweep_interval_secs),
    );

    let app = souk_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("souk arbitration API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    // Stop the sweep after the server drains.
    sweep.shutdown().await;

    Ok(())
}
