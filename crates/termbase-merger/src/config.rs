//! Configuration for the merge layer

use std::time::Duration;

/// Default maximum number of backend calls per run
pub const DEFAULT_MAX_AI_CALLS: usize = 100;

/// Default delay between successive backend calls (milliseconds)
pub const DEFAULT_RATE_LIMIT_MS: u64 = 100;

/// Configuration for the merge layer
#[derive(Debug, Clone, PartialEq)]
pub struct MergerConfig {
    /// Use the text-generation backend for duplicate groups
    pub enable_ai: bool,

    /// Maximum backend calls per run; calls that fail without a response do not count
    pub max_ai_calls: usize,

    /// Fixed delay between successive backend calls (milliseconds)
    pub rate_limit_ms: u64,
}

impl MergerConfig {
    /// Get the inter-call delay as a Duration
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enable_ai && self.max_ai_calls == 0 {
            return Err("max_ai_calls must be greater than 0 when AI merging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            enable_ai: true,
            max_ai_calls: DEFAULT_MAX_AI_CALLS,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
        }
    }
}
