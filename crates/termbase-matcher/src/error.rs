//! Matcher error types

use thiserror::Error;

/// Errors that can occur while configuring the matcher
#[derive(Error, Debug, PartialEq)]
pub enum MatcherError {
    /// Similarity threshold outside `[0, 1]`
    #[error("Invalid similarity threshold: {0} (expected a value between 0 and 1)")]
    InvalidThreshold(f64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
