//! Error types for the AI crate.
//!
//! - `LlmError`: what went wrong during a single provider call
//! - `ProviderFailure`: an `LlmError` tagged with the provider that raised it
//! - `GenerationError`: why a whole fallback chain produced no content

use crate::backend::LlmProvider;
use std::fmt;

/// Errors from a single LLM backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The provider answered with a non-success HTTP status.
    ApiStatus { status: u16, body: String },
    /// The provider answered 2xx but the expected content field was absent or empty.
    UnexpectedResponse { payload: String },
    /// The request could not be sent or the connection failed.
    RequestFailed { reason: String },
    /// No response within the configured timeout.
    Timeout { after_secs: u64 },
    /// The response body was not valid JSON.
    ResponseParseFailed { reason: String },
    /// The provider needs a credential and none is configured.
    MissingCredential,
}

/// Coarse classification of an [`LlmError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing or unusable provider configuration.
    Configuration,
    /// Non-success HTTP status.
    Status,
    /// Well-formed JSON without the expected content.
    UnexpectedResponse,
    /// Connection, timeout or body decoding problem.
    Transport,
}

impl LlmError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingCredential => FailureKind::Configuration,
            Self::ApiStatus { .. } => FailureKind::Status,
            Self::UnexpectedResponse { .. } => FailureKind::UnexpectedResponse,
            Self::RequestFailed { .. } | Self::Timeout { .. } | Self::ResponseParseFailed { .. } => {
                FailureKind::Transport
            }
        }
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiStatus { status, body } => {
                write!(f, "API error (status {status}): {body}")
            }
            Self::UnexpectedResponse { payload } => {
                write!(f, "returned unexpected response format: {payload}")
            }
            Self::RequestFailed { reason } => write!(f, "request failed: {reason}"),
            Self::Timeout { after_secs } => write!(f, "request timed out after {after_secs}s"),
            Self::ResponseParseFailed { reason } => {
                write!(f, "returned a response that is not valid JSON: {reason}")
            }
            Self::MissingCredential => write!(f, "API key is not configured"),
        }
    }
}

impl std::error::Error for LlmError {}

/// A failed attempt against one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: LlmProvider,
    pub error: LlmError,
}

impl ProviderFailure {
    #[must_use]
    pub fn new(provider: LlmProvider, error: LlmError) -> Self {
        Self { provider, error }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.provider.display_name(), self.error)
    }
}

impl std::error::Error for ProviderFailure {}

/// Why a fallback chain returned no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No provider in the chain has a credential; nothing was attempted.
    NoProvidersConfigured,
    /// Every attempted provider failed, in attempt order.
    AllProvidersFailed { failures: Vec<ProviderFailure> },
}

impl GenerationError {
    /// Per-provider messages in attempt order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::NoProvidersConfigured => vec!["no providers configured".to_string()],
            Self::AllProvidersFailed { failures } => {
                failures.iter().map(ToString::to_string).collect()
            }
        }
    }

    /// The messages joined with `"; "`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.messages().join("; ")
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProvidersConfigured => write!(f, "no providers configured"),
            Self::AllProvidersFailed { .. } => {
                write!(f, "all providers failed: {}", self.summary())
            }
        }
    }
}

impl std::error::Error for GenerationError {}
