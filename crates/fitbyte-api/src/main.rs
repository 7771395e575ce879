//! # fitbyte-api: Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from the environment;
//! see [`AppConfig::from_env`].

use anyhow::Context;
use fitbyte_api::middleware::metrics::install_recorder;
use fitbyte_api::state::{AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("reading configuration")?;

    // Initialize structured tracing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let port = config.port;
    let metrics_enabled = config.metrics_enabled;

    let mut state = AppState::with_config(config).map_err(|e| {
        tracing::error!("Schema loading failed: {e}");
        e
    })?;

    if metrics_enabled {
        let handle = install_recorder().context("installing Prometheus recorder")?;
        state = state.with_metrics(handle);
    }

    tracing::info!(schemas = ?state.registry.names(), "schema registry ready");

    let app = fitbyte_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("FitByte API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
