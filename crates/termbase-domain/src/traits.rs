//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for text-generation backends used by service-assisted merges
///
/// Implemented by the infrastructure layer (termbase-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Short provider name used in logs (e.g. "openai")
    fn name(&self) -> &str;

    /// Generate a completion for a single user prompt
    ///
    /// One call is one billable request; implementations must not retry.
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Estimated monetary cost of a prompt/response exchange
    fn estimate_cost(&self, _prompt: &str, _response: &str) -> f64 {
        0.0
    }
}
