//! Matcher configuration

use crate::MatcherError;
use serde::{Deserialize, Serialize};

/// Default similarity threshold
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// How members join a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterPolicy {
    /// Candidates are compared against the seed only (not transitively closed)
    #[default]
    Seed,
    /// Candidates are compared against every member already in the group
    Transitive,
}

/// Configuration for duplicate detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum field similarity (0.0-1.0) for two records to be grouped
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,

    /// Grouping policy
    #[serde(default)]
    pub policy: ClusterPolicy,
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            policy: ClusterPolicy::Seed,
        }
    }
}

impl MatcherConfig {
    /// Create a configuration with the given threshold and the seed policy
    pub fn with_threshold(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), MatcherError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(MatcherError::InvalidThreshold(self.similarity_threshold));
        }
        Ok(())
    }
}
