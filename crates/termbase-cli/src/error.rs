//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input or output failure
    #[error(transparent)]
    Io(#[from] termbase_io::IoError),

    /// Clustering setup failure
    #[error("Matcher error: {0}")]
    Matcher(#[from] termbase_matcher::MatcherError),

    /// Provider setup failure
    #[error("Provider error: {0}")]
    Llm(#[from] termbase_llm::LlmError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    File(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
