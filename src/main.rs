// =============================================================================
// Strategy Lab Backend — Main Entry Point
// =============================================================================
//
// Thin REST service for the charting dashboard: an in-memory strategy list,
// synthetic chart data, and server-side indicator computation. Everything is
// recomputed per request; the process holds no durable state.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod catalog;
mod engine;
mod error;
mod indicators;
mod market_data;
mod runtime_config;
mod strategy_store;
mod types;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;

/// Swap the port part of `bind_addr` when the `PORT` env var is set.
fn apply_port_override(bind_addr: &str, port: &str) -> String {
    match bind_addr.rsplit_once(':') {
        Some((host, _)) => format!("{host}:{port}"),
        None => format!("{bind_addr}:{port}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Strategy Lab Backend — starting up");

    let mut config = RuntimeConfig::load("strategy_lab.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Hosting platforms hand out the port via `PORT`; it wins over the
    // configured bind address.
    if let Ok(port) = std::env::var("PORT") {
        config.bind_addr = apply_port_override(&config.bind_addr, &port);
    }

    info!(
        bind_addr = %config.bind_addr,
        symbols = ?config.symbols,
        "configuration resolved"
    );

    // ── 2. Build shared state & router ───────────────────────────────────
    let state = Arc::new(AppState::new(config));
    let app = api::rest::router(state.clone());

    // ── 3. Serve until shutdown ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&state.runtime_config.bind_addr).await?;
    info!(addr = %state.runtime_config.bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await?;

    info!("Strategy Lab Backend shut down complete.");
    Ok(())
}
