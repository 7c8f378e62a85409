//! Provider selection
//!
//! One backend shape is chosen per run from the configured provider name.
//! [`Provider`] is the tagged variant the merge layer talks to.

use crate::{AnthropicProvider, LlmError, OpenAiProvider};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use termbase_domain::traits::LlmProvider as LlmProviderTrait;

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Completion budget requested from either backend
pub const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Supported backend shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Chat-completions shape
    OpenAi,
    /// Messages shape
    Anthropic,
}

impl ProviderKind {
    /// Configuration name of the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Parse a configured provider name
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] for unsupported names.
    pub fn parse(s: &str) -> Result<Self, LlmError> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(LlmError::Configuration(format!(
                "Unsupported AI provider: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings shared by both backend shapes
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Secret credential
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Base URL without the endpoint path
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Create settings with the default timeout
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join the base URL and an endpoint path
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::blocking::Client, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Configuration("API key not configured".to_string()));
        }

        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))
    }
}

/// Send a prepared request and decode a successful JSON body
pub(crate) fn send_json<T: DeserializeOwned>(
    request: reqwest::blocking::RequestBuilder,
) -> Result<T, LlmError> {
    let response = request
        .send()
        .map_err(|e| LlmError::Communication(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(LlmError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// The configured backend for a run
pub enum Provider {
    /// `POST {base_url}/chat/completions`
    OpenAi(OpenAiProvider),
    /// `POST {base_url}/v1/messages`
    Anthropic(AnthropicProvider),
}

impl Provider {
    /// Build the provider for `kind`
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] if the API key is empty or the HTTP
    /// client cannot be constructed.
    pub fn from_settings(kind: ProviderKind, settings: ProviderSettings) -> Result<Self, LlmError> {
        Ok(match kind {
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiProvider::new(settings)?),
            ProviderKind::Anthropic => Provider::Anthropic(AnthropicProvider::new(settings)?),
        })
    }

    /// Which shape this provider speaks
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::OpenAi(_) => ProviderKind::OpenAi,
            Provider::Anthropic(_) => ProviderKind::Anthropic,
        }
    }

    /// Model identifier in use
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAi(p) => p.model(),
            Provider::Anthropic(p) => p.model(),
        }
    }
}

impl LlmProviderTrait for Provider {
    type Error = LlmError;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::OpenAi(p) => p.generate(prompt),
            Provider::Anthropic(p) => p.generate(prompt),
        }
    }

    fn estimate_cost(&self, prompt: &str, response: &str) -> f64 {
        match self {
            Provider::OpenAi(p) => p.estimate_cost(prompt, response),
            Provider::Anthropic(p) => p.estimate_cost(prompt, response),
        }
    }
}
