//! Connectivity probes and the provider status snapshot.
//!
//! Probes run once at start-up; everything after that is derived from the
//! snapshot without further network I/O.

use crate::backend::{LlmProvider, OLLAMA_MODEL, ProviderConfig};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

pub const DEFAULT_TCP_TARGETS: [&str; 2] = ["8.8.8.8:53", "1.1.1.1:53"];
pub const DEFAULT_HTTP_FALLBACK: &str = "https://httpbin.org/status/200";
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks whether the outside world is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityProbe {
    /// `host:port` pairs tried with a plain TCP connect, in order.
    pub tcp_targets: Vec<String>,
    /// URL fetched if every TCP target fails.
    pub http_fallback: Option<String>,
    /// Bound on each individual attempt.
    pub timeout: Duration,
}

impl Default for ConnectivityProbe {
    fn default() -> Self {
        Self {
            tcp_targets: DEFAULT_TCP_TARGETS.iter().map(ToString::to_string).collect(),
            http_fallback: Some(DEFAULT_HTTP_FALLBACK.to_string()),
            timeout: PROBE_TIMEOUT,
        }
    }
}

impl ConnectivityProbe {
    /// Returns `true` as soon as one target answers.
    pub async fn check(&self, client: &reqwest::Client) -> bool {
        for target in &self.tcp_targets {
            match tokio::time::timeout(self.timeout, TcpStream::connect(target.as_str())).await {
                Ok(Ok(_)) => {
                    info!(%target, "Internet connectivity confirmed");
                    return true;
                }
                Ok(Err(e)) => debug!(%target, error = %e, "Connectivity target refused"),
                Err(_) => debug!(%target, "Connectivity target timed out"),
            }
        }

        if let Some(url) = &self.http_fallback {
            match client.get(url).timeout(self.timeout).send().await {
                Ok(response) if response.status().is_success() => {
                    info!(%url, "Internet connectivity confirmed over HTTP");
                    return true;
                }
                Ok(response) => {
                    debug!(%url, status = response.status().as_u16(), "HTTP probe failed");
                }
                Err(e) => debug!(%url, error = %e, "HTTP probe failed"),
            }
        }

        warn!("No internet connectivity detected");
        false
    }
}

/// Checks whether a local Ollama daemon answers at `base_url`.
///
/// Logs the advertised models and whether the default model is installed.
pub async fn probe_local_daemon(client: &reqwest::Client, base_url: &str, timeout: Duration) -> bool {
    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));
    let response = match client.get(&url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(%url, error = %e, "Local model daemon is not reachable");
            return false;
        }
    };

    if !response.status().is_success() {
        warn!(%url, status = response.status().as_u16(), "Local model daemon is unhealthy");
        return false;
    }

    let models: Vec<String> = match response.json::<JsonValue>().await {
        Ok(payload) => payload
            .get("models")
            .and_then(JsonValue::as_array)
            .map(|models| {
                models
                    .iter()
                    .filter_map(|model| model.get("name").and_then(JsonValue::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default(),
        Err(e) => {
            debug!(error = %e, "Could not decode model list");
            Vec::new()
        }
    };

    let default_installed = models.iter().any(|name| name.starts_with(OLLAMA_MODEL));
    info!(?models, default_installed, "Local model daemon is running");
    if !default_installed {
        warn!(model = OLLAMA_MODEL, "Default local model is not installed");
    }
    true
}

/// Status of one provider at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub provider: LlmProvider,
    /// A non-empty credential is present.
    pub configured: bool,
    /// Configured and connectivity was available.
    pub enabled: bool,
    /// Truncated key for display.
    pub key_preview: Option<String>,
}

/// Point-in-time view of the relay's providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    pub internet_available: bool,
    pub local_daemon_running: bool,
    /// One entry per remote provider, in priority order.
    pub providers: Vec<ProviderStatus>,
}

impl SystemStatus {
    /// Builds a snapshot from provider configs and probe results.
    #[must_use]
    pub fn snapshot(
        configs: &[ProviderConfig],
        internet_available: bool,
        local_daemon_running: bool,
    ) -> Self {
        let providers = configs
            .iter()
            .map(|config| ProviderStatus {
                provider: config.provider,
                configured: config.credential().is_some(),
                enabled: config.is_enabled(internet_available),
                key_preview: config.key_preview(),
            })
            .collect();

        Self {
            internet_available,
            local_daemon_running,
            providers,
        }
    }

    /// Ids of enabled providers in priority order.
    #[must_use]
    pub fn available_providers(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|status| status.enabled)
            .map(|status| status.provider.id())
            .collect()
    }

    #[must_use]
    pub fn provider(&self, provider: LlmProvider) -> Option<&ProviderStatus> {
        self.providers.iter().find(|status| status.provider == provider)
    }

    #[must_use]
    pub fn is_configured(&self, provider: LlmProvider) -> bool {
        self.provider(provider).is_some_and(|status| status.configured)
    }

    #[must_use]
    pub fn key_preview(&self, provider: LlmProvider) -> Option<String> {
        self.provider(provider)
            .and_then(|status| status.key_preview.clone())
    }

    /// At least one remote provider has a credential.
    #[must_use]
    pub fn system_ready(&self) -> bool {
        self.providers.iter().any(|status| status.configured)
    }
}

/// Serves status reads from the start-up probe results.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    configs: Vec<ProviderConfig>,
    internet_available: bool,
    local_daemon_running: bool,
}

impl StatusReporter {
    #[must_use]
    pub fn new(
        configs: Vec<ProviderConfig>,
        internet_available: bool,
        local_daemon_running: bool,
    ) -> Self {
        Self {
            configs,
            internet_available,
            local_daemon_running,
        }
    }

    #[must_use]
    pub fn internet_available(&self) -> bool {
        self.internet_available
    }

    #[must_use]
    pub fn current_status(&self) -> SystemStatus {
        SystemStatus::snapshot(
            &self.configs,
            self.internet_available,
            self.local_daemon_running,
        )
    }

    /// Snapshot with connectivity taken as confirmed, for use once a hosted
    /// provider has answered.
    ///
    /// `enabled` still reflects configuration only: a provider that failed
    /// earlier in the same chain run is listed as available if it has a key.
    #[must_use]
    pub fn confirmed_online_status(&self) -> SystemStatus {
        SystemStatus::snapshot(&self.configs, true, self.local_daemon_running)
    }
}
