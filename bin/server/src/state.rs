//! Shared application state.

use crate::config::ServerConfig;
use crate::error::ServerError;
use blogsmith_ai::{
    FallbackChain, LlmBackend, ProviderConfig, StatusReporter, backend_for, probe_local_daemon,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything a handler needs. Built once at start-up and never mutated.
pub struct AppState {
    /// Research chain: Gemini, then OpenAI, then optionally the local daemon.
    pub chain: FallbackChain,
    /// Used directly by the Gemini self-test.
    pub gemini: Arc<dyn LlmBackend>,
    pub gemini_config: ProviderConfig,
    /// Local daemon behind `/ai-blog`.
    pub local: Arc<dyn LlmBackend>,
    pub status: StatusReporter,
}

impl AppState {
    /// Wires backends from `config`, reusing one HTTP client.
    #[must_use]
    pub fn new(
        config: &ServerConfig,
        client: reqwest::Client,
        internet_available: bool,
        local_daemon_running: bool,
    ) -> Self {
        let gemini_config = config.gemini();
        let gemini = backend_for(gemini_config.clone(), client.clone());
        let openai = backend_for(config.openai(), client.clone());
        let local = backend_for(config.ollama(), client);

        let mut backends = vec![Arc::clone(&gemini), openai];
        if config.providers.ollama.include_in_fallback {
            backends.push(Arc::clone(&local));
        }
        let chain = FallbackChain::new(backends);
        info!(providers = ?chain, "Configured fallback chain");

        Self {
            chain,
            gemini,
            gemini_config,
            local,
            status: StatusReporter::new(
                config.remote_providers(),
                internet_available,
                local_daemon_running,
            ),
        }
    }

    #[must_use]
    pub fn internet_available(&self) -> bool {
        self.status.internet_available()
    }
}

/// Runs the start-up probes and builds the state.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built. Probe failures are
/// recorded in the status, not returned.
pub async fn build_state(config: &ServerConfig) -> blogsmith_core::Result<AppState, ServerError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| ServerError::HttpClient {
            details: e.to_string(),
        })?;

    let internet_available = config.connectivity_probe().check(&client).await;
    let local_daemon_running = probe_local_daemon(
        &client,
        &config.providers.ollama.base_url,
        Duration::from_secs(config.connectivity.timeout_secs),
    )
    .await;

    let state = AppState::new(config, client, internet_available, local_daemon_running);
    let status = state.status.current_status();
    info!(
        internet_available,
        local_daemon_running,
        available_providers = ?status.available_providers(),
        system_ready = status.system_ready(),
        "Start-up probes finished"
    );
    if !status.system_ready() {
        tracing::warn!("No AI API keys configured; research requests will be rejected");
    }

    Ok(state)
}
