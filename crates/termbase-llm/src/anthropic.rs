//! Anthropic Provider Implementation
//!
//! Messages request shape:
//!
//! ```text
//! POST {base_url}/v1/messages
//! x-api-key: <api_key>
//! anthropic-version: 2023-06-01
//! {"model", "max_tokens", "messages": [{"role": "user", "content"}]}
//! ```
//!
//! The completion text is read from `content[0].text`.

use crate::openai::ChatMessage;
use crate::pricing::{anthropic_rates, TokenRates};
use crate::provider::{send_json, ProviderSettings, MAX_COMPLETION_TOKENS};
use crate::LlmError;
use serde::{Deserialize, Serialize};
use termbase_domain::traits::LlmProvider as LlmProviderTrait;
use tracing::debug;

/// Default Anthropic API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default Anthropic model
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// API version header value
pub const API_VERSION: &str = "2023-06-01";

/// Anthropic messages provider
pub struct AnthropicProvider {
    settings: ProviderSettings,
    client: reqwest::blocking::Client,
    rates: TokenRates,
}

/// Request body for the messages API
#[derive(Serialize, Debug)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

/// Response from the messages API
#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] if the API key is empty.
    pub fn new(settings: ProviderSettings) -> Result<Self, LlmError> {
        let client = settings.build_client()?;
        let rates = anthropic_rates(&settings.model);

        Ok(Self {
            settings,
            client,
            rates,
        })
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

impl LlmProviderTrait for AnthropicProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "anthropic"
    }

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = self.settings.endpoint("/v1/messages");
        debug!("POST {} (model {})", url, self.settings.model);

        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: MAX_COMPLETION_TOKENS,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let request = self
            .client
            .post(&url)
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(request)?;

        response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                LlmError::InvalidResponse("Response contained no text content".to_string())
            })
    }

    fn estimate_cost(&self, prompt: &str, response: &str) -> f64 {
        self.rates.cost(prompt, response)
    }
}
