//! # nightlightd, the nightlight daemon
//!
//! Composition root that wires the light controller to its devices and
//! serves the HTTP API.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` logging
//! - Select the relay and ambient sensor, falling back to virtual devices
//! - Start the [`LightController`](nightlight_app::controller::LightController)
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT), stopping the controller loop
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod builder;
mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use nightlight_adapter_http_axum::router;
use nightlight_adapter_http_axum::state::AppState;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter)
                .context("invalid logging filter directive")?,
        )
        .init();

    let controller = Arc::new(builder::build(&config).context("failed to build controller")?);
    let app = router::build(AppState::new(Arc::clone(&controller)));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(address = %bind_addr, "nightlightd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    if let Err(err) = controller.shutdown().await {
        tracing::warn!(error = %err, "light controller did not stop cleanly");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping");
}
