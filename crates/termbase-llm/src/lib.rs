//! Termbase LLM Provider Layer
//!
//! Pluggable text-generation backends for service-assisted merges.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `termbase-domain`. Exactly one backend shape is used per run, selected
//! from configuration through the tagged [`Provider`] variant.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: `POST {base_url}/chat/completions`, bearer auth
//! - `AnthropicProvider`: `POST {base_url}/v1/messages`, API-key and version headers
//!
//! Calls are blocking and never retried: a failed call is reported to the
//! caller, which falls back to a rule-based merge.
//!
//! # Examples
//!
//! ```
//! use termbase_llm::MockProvider;
//! use termbase_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod openai;
pub mod pricing;
pub mod provider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use termbase_domain::traits::LlmProvider as LlmProviderTrait;
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;
pub use pricing::TokenRates;
pub use provider::{Provider, ProviderKind, ProviderSettings};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure, including timeouts
    #[error("Communication error: {0}")]
    Communication(String),

    /// Backend answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body as returned
        body: String,
    },

    /// Response body could not be decoded or lacked the completion text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing credentials or unsupported provider
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<Result<String, String>>,
    call_count: usize,
}

/// Mock LLM provider for deterministic testing
///
/// Returns queued responses first, then the default response, without making
/// any network calls. Clones share state, so a test can keep a handle to
/// inspect the call count after handing the provider to a consumer.
///
/// # Examples
///
/// ```
/// use termbase_llm::MockProvider;
/// use termbase_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("fallback");
/// provider.push_response("first");
/// provider.push_error("backend down");
///
/// assert_eq!(provider.generate("a").unwrap(), "first");
/// assert!(provider.generate("b").is_err());
/// assert_eq!(provider.generate("c").unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Result<String, String>,
    cost_per_call: f64,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Ok(response.into()),
            cost_per_call: 0.0,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_response: Err(message.into()),
            ..Self::new("")
        }
    }

    /// Report a fixed cost for every successful call
    pub fn with_cost_per_call(mut self, cost: f64) -> Self {
        self.cost_per_call = cost;
        self
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().queued.push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, message: impl Into<String>) {
        self.state().queued.push_back(Err(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.call_count += 1;

        let next = state
            .queued
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());
        next.map_err(LlmError::Other)
    }

    fn estimate_cost(&self, _prompt: &str, _response: &str) -> f64 {
        self.cost_per_call
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_queued_responses() {
        let provider = MockProvider::default();
        provider.push_response("world");
        provider.push_response("bar");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_mock_provider_failing() {
        let provider = MockProvider::failing("backend down");

        let result = provider.generate("prompt");
        assert!(matches!(result, Err(LlmError::Other(ref m)) if m == "backend down"));
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_cost() {
        let provider = MockProvider::new("ok").with_cost_per_call(0.25);
        assert_eq!(provider.estimate_cost("p", "r"), 0.25);
        assert_eq!(MockProvider::default().estimate_cost("p", "r"), 0.0);
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
