//! blogsmith HTTP server.
//!
//! Relays blog-writing requests from a front-end to Gemini, OpenAI or a
//! local Ollama daemon, keeping credentials and prompt templates server-side.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use crate::config::ServerConfig;
use crate::error::ServerError;
use std::sync::Arc;
use tracing::info;

/// Loads configuration, probes the environment and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the listener cannot bind,
/// or the server stops with an I/O error.
pub async fn run() -> blogsmith_core::Result<(), ServerError> {
    let config = ServerConfig::from_env().map_err(ServerError::from)?;
    info!(bind_addr = %config.bind_addr, "Loaded configuration");

    let state = Arc::new(state::build_state(&config).await?);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: config.bind_addr.clone(),
            details: e.to_string(),
        })?;

    info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve {
            details: e.to_string(),
        })?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
    }
}
