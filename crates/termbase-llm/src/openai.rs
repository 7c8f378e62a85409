//! OpenAI Provider Implementation
//!
//! Chat-completions request shape:
//!
//! ```text
//! POST {base_url}/chat/completions
//! Authorization: Bearer <api_key>
//! {"model", "messages": [{"role": "user", "content"}], "max_tokens", "temperature"}
//! ```
//!
//! The completion text is read from `choices[0].message.content`.

use crate::pricing::{openai_rates, TokenRates};
use crate::provider::{send_json, ProviderSettings, MAX_COMPLETION_TOKENS};
use crate::LlmError;
use serde::{Deserialize, Serialize};
use termbase_domain::traits::LlmProvider as LlmProviderTrait;
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI model
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Sampling temperature for merges; low to keep output close to the inputs
const TEMPERATURE: f64 = 0.1;

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    settings: ProviderSettings,
    client: reqwest::blocking::Client,
    rates: TokenRates,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct ChatMessage {
    pub(crate) role: String,
    pub(crate) content: String,
}

/// Request body for the chat-completions API
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] if the API key is empty.
    pub fn new(settings: ProviderSettings) -> Result<Self, LlmError> {
        let client = settings.build_client()?;
        let rates = openai_rates(&settings.model);

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

    fn request_body<'a>(&'a self, prompt: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "openai"
    }

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = self.settings.endpoint("/chat/completions");
        debug!("POST {} (model {})", url, self.settings.model);

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(prompt));

        let response: ChatCompletionResponse = send_json(request)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
    }

    fn estimate_cost(&self, prompt: &str, response: &str) -> f64 {
        self.rates.cost(prompt, response)
    }
}
