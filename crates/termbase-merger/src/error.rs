//! Error types for the merge layer

use thiserror::Error;

/// Errors from a single service-assisted merge
///
/// These never abort a run: the orchestrator converts every one of them into a
/// rule-based fallback for the affected group.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    /// Transport failure, timeout or non-success status from the backend
    #[error("LLM error: {0}")]
    Llm(String),

    /// Backend answered, but the text did not hold a usable merged record
    #[error("Invalid merge response: {0}")]
    Response(String),
}

impl From<serde_json::Error> for MergeError {
    fn from(e: serde_json::Error) -> Self {
        MergeError::Response(format!("JSON parse error: {}", e))
    }
}
