//! Rough cost estimation for provider calls
//!
//! Tokens are approximated from word counts (`words × 1.3`); a word is a
//! maximal run of letters, apostrophes and hyphens. Rates are per 1K tokens.

/// Approximate tokens per word
pub const TOKENS_PER_WORD: f64 = 1.3;

/// Input/output prices per 1K tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenRates {
    /// USD per 1K prompt tokens
    pub input_per_1k: f64,
    /// USD per 1K completion tokens
    pub output_per_1k: f64,
}

impl TokenRates {
    /// Create a rate pair
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    /// Estimated cost of one prompt/response exchange
    pub fn cost(&self, prompt: &str, response: &str) -> f64 {
        estimate_tokens(prompt) * self.input_per_1k / 1000.0
            + estimate_tokens(response) * self.output_per_1k / 1000.0
    }
}

const GPT_4: TokenRates = TokenRates::new(0.03, 0.06);
const GPT_35_TURBO: TokenRates = TokenRates::new(0.001, 0.002);
const ANTHROPIC_DEFAULT: TokenRates = TokenRates::new(0.015, 0.075);

/// Rates for an OpenAI model; unknown models are priced as `gpt-4`
pub fn openai_rates(model: &str) -> TokenRates {
    match model {
        "gpt-3.5-turbo" => GPT_35_TURBO,
        _ => GPT_4,
    }
}

/// Rates for an Anthropic model (one published rate for every model)
pub fn anthropic_rates(_model: &str) -> TokenRates {
    ANTHROPIC_DEFAULT
}

/// Approximate token count of a text
pub fn estimate_tokens(text: &str) -> f64 {
    word_count(text) as f64 * TOKENS_PER_WORD
}

/// Count words as runs of letters, apostrophes and hyphens
pub fn word_count(text: &str) -> usize {
    text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '-'))
        .filter(|word| !word.is_empty())
        .count()
}
