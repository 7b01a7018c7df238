//! Centralized server configuration.
//!
//! Loaded via the `config` crate from an optional `blogsmith.toml` and then
//! environment variables, which win. Nested keys use `__` as the separator,
//! e.g. `PROVIDERS__OPENAI__MODEL`. The top-level `GEMINI_API_KEY` and
//! `OPENAI_API_KEY` variables map straight onto the credential fields.

use blogsmith_ai::ProviderConfig;
use blogsmith_ai::backend::OLLAMA_BASE_URL;
use blogsmith_ai::status::{ConnectivityProbe, DEFAULT_HTTP_FALLBACK, DEFAULT_TCP_TARGETS};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "blogsmith";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Gemini API key. Empty counts as missing.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// OpenAI API key. Empty counts as missing.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub connectivity: ConnectivityConfig,
}

/// Per-provider overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: RemoteProviderSettings,
    #[serde(default)]
    pub openai: RemoteProviderSettings,
    #[serde(default)]
    pub ollama: LocalProviderSettings,
}

/// Overrides for a hosted provider. Unset fields keep the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteProviderSettings {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RemoteProviderSettings {
    fn apply(&self, mut provider: ProviderConfig) -> ProviderConfig {
        if let Some(endpoint) = &self.endpoint {
            provider = provider.with_endpoint(endpoint.clone());
        }
        if let Some(model) = &self.model {
            provider = provider.with_model(model.clone());
        }
        if let Some(secs) = self.timeout_secs {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }
        provider
    }
}

/// Settings for the local Ollama daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalProviderSettings {
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Appends the daemon to the research fallback chain after the hosted
    /// providers.
    #[serde(default)]
    pub include_in_fallback: bool,
}

impl Default for LocalProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: None,
            timeout_secs: None,
            include_in_fallback: false,
        }
    }
}

/// Start-up connectivity probe settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectivityConfig {
    #[serde(default = "default_tcp_targets")]
    pub tcp_targets: Vec<String>,

    /// Set to an empty string to disable the HTTP fallback.
    #[serde(default = "default_http_fallback")]
    pub http_fallback: String,

    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            tcp_targets: default_tcp_targets(),
            http_fallback: default_http_fallback(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            gemini_api_key: None,
            openai_api_key: None,
            providers: ProvidersConfig::default(),
            connectivity: ConnectivityConfig::default(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_ollama_base_url() -> String {
    OLLAMA_BASE_URL.to_string()
}

fn default_tcp_targets() -> Vec<String> {
    DEFAULT_TCP_TARGETS.iter().map(ToString::to_string).collect()
}

fn default_http_fallback() -> String {
    DEFAULT_HTTP_FALLBACK.to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

impl ServerConfig {
    /// Loads configuration from `blogsmith.toml` (if present) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(environment())
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    #[must_use]
    pub fn gemini(&self) -> ProviderConfig {
        self.providers
            .gemini
            .apply(ProviderConfig::gemini(self.gemini_api_key.clone()))
    }

    #[must_use]
    pub fn openai(&self) -> ProviderConfig {
        self.providers
            .openai
            .apply(ProviderConfig::openai(self.openai_api_key.clone()))
    }

    #[must_use]
    pub fn ollama(&self) -> ProviderConfig {
        let settings = &self.providers.ollama;
        let mut provider = ProviderConfig::ollama(&settings.base_url);
        if let Some(model) = &settings.model {
            provider = provider.with_model(model.clone());
        }
        if let Some(secs) = settings.timeout_secs {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }
        provider
    }

    /// Hosted providers in fallback priority order.
    #[must_use]
    pub fn remote_providers(&self) -> Vec<ProviderConfig> {
        vec![self.gemini(), self.openai()]
    }

    #[must_use]
    pub fn connectivity_probe(&self) -> ConnectivityProbe {
        let settings = &self.connectivity;
        ConnectivityProbe {
            tcp_targets: settings.tcp_targets.clone(),
            http_fallback: Some(settings.http_fallback.clone()).filter(|url| !url.is_empty()),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

fn environment() -> Environment {
    Environment::default()
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("connectivity.tcp_targets")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> ServerConfig {
        let vars = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        ServerConfig::load(environment().source(Some(vars))).expect("config should load")
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]);

        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert!(!config.gemini().has_credential());
        assert!(!config.openai().has_credential());
        assert_eq!(config.ollama().endpoint, "http://localhost:11435/api/generate");
        assert!(!config.providers.ollama.include_in_fallback);
        assert_eq!(
            config.connectivity_probe(),
            ConnectivityProbe::default()
        );
    }

    #[test]
    fn top_level_key_variables_are_read() {
        let config = load(&[
            ("GEMINI_API_KEY", "AIza-from-env"),
            ("OPENAI_API_KEY", "sk-from-env"),
        ]);

        assert_eq!(config.gemini().credential(), Some("AIza-from-env"));
        assert_eq!(config.openai().credential(), Some("sk-from-env"));
    }

    #[test]
    fn nested_overrides_keep_other_defaults() {
        let config = load(&[
            ("PROVIDERS__OPENAI__MODEL", "gpt-4o-mini"),
            ("PROVIDERS__GEMINI__TIMEOUT_SECS", "10"),
            ("PROVIDERS__OLLAMA__INCLUDE_IN_FALLBACK", "true"),
        ]);

        let openai = config.openai();
        assert_eq!(openai.model, "gpt-4o-mini");
        assert_eq!(openai.endpoint, blogsmith_ai::backend::OPENAI_ENDPOINT);

        let gemini = config.gemini();
        assert_eq!(gemini.timeout, Duration::from_secs(10));
        assert_eq!(gemini.model, blogsmith_ai::backend::GEMINI_MODEL);

        assert!(config.providers.ollama.include_in_fallback);
    }

    #[test]
    fn empty_http_fallback_disables_it() {
        let config = load(&[("CONNECTIVITY__HTTP_FALLBACK", "")]);
        assert_eq!(config.connectivity_probe().http_fallback, None);
    }

    #[test]
    fn tcp_targets_split_on_commas() {
        let config = load(&[("CONNECTIVITY__TCP_TARGETS", "10.0.0.1:53,10.0.0.2:53")]);
        assert_eq!(
            config.connectivity.tcp_targets,
            vec!["10.0.0.1:53".to_string(), "10.0.0.2:53".to_string()]
        );
    }

    #[test]
    fn remote_providers_are_gemini_then_openai() {
        let providers: Vec<_> = load(&[])
            .remote_providers()
            .into_iter()
            .map(|provider| provider.provider)
            .collect();
        assert_eq!(
            providers,
            vec![
                blogsmith_ai::LlmProvider::Gemini,
                blogsmith_ai::LlmProvider::OpenAi
            ]
        );
    }
}
