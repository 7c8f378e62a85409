//! Run statistics

use serde::Serialize;
use termbase_domain::Group;

/// Counters collected during one consolidation run
///
/// Mutated only by the pipeline thread; read-only once the run completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStatistics {
    /// Records accepted by the ingestor
    pub records_read: usize,

    /// Groups of exactly two records
    pub duplicate_pairs: usize,

    /// Groups of more than two records
    pub near_duplicate_groups: usize,

    /// Groups merged by the backend
    pub ai_merged: usize,

    /// Groups that fell back to the rule-based merge after a backend failure
    pub fallback_merges: usize,

    /// Duplicate groups dropped because the call budget ran out
    pub skipped_groups: usize,

    /// Records written to the output
    pub final_unique: usize,

    /// Backend calls that returned a response
    pub api_calls: usize,

    /// Estimated backend cost in USD
    pub estimated_cost: f64,
}

impl RunStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count pairs and larger groups
    pub fn record_groups(&mut self, groups: &[Group]) {
        for group in groups {
            match group.len() {
                2 => self.duplicate_pairs += 1,
                n if n > 2 => self.near_duplicate_groups += 1,
                _ => {}
            }
        }
    }

    /// Record one answered backend call and its estimated cost
    pub fn record_call(&mut self, cost: f64) {
        self.api_calls += 1;
        self.estimated_cost += cost;
    }

    /// Percentage of input records removed, 0 when nothing was read
    pub fn size_reduction(&self) -> f64 {
        if self.records_read == 0 {
            return 0.0;
        }
        let removed = self.records_read.saturating_sub(self.final_unique);
        removed as f64 / self.records_read as f64 * 100.0
    }

    /// Generate a summary report
    pub fn summary(&self, include_ai: bool) -> String {
        let mut lines = vec![
            "Consolidation Summary".to_string(),
            "=====================".to_string(),
            format!("Records read: {}", self.records_read),
            format!("Duplicate pairs: {}", self.duplicate_pairs),
            format!("Near-duplicate groups: {}", self.near_duplicate_groups),
        ];

        if include_ai {
            lines.push(format!("AI-merged records: {}", self.ai_merged));
            lines.push(format!("Fallback merges: {}", self.fallback_merges));
            lines.push(format!("Skipped (budget): {}", self.skipped_groups));
        }

        lines.push(format!("Final unique records: {}", self.final_unique));
        lines.push(format!("Size reduction: {:.1}%", self.size_reduction()));

        if include_ai {
            lines.push(format!("API calls: {}", self.api_calls));
            lines.push(format!("Estimated cost: ${:.4}", self.estimated_cost));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_groups() {
        let groups = vec![
            Group::from_indices(vec![0]),
            Group::from_indices(vec![1, 2]),
            Group::from_indices(vec![3, 4, 5]),
            Group::from_indices(vec![6, 7]),
        ];

        let mut stats = RunStatistics::new();
        stats.record_groups(&groups);

        assert_eq!(stats.duplicate_pairs, 2);
        assert_eq!(stats.near_duplicate_groups, 1);
    }

    #[test]
    fn test_size_reduction() {
        let mut stats = RunStatistics::new();
        assert_eq!(stats.size_reduction(), 0.0);

        stats.records_read = 8;
        stats.final_unique = 6;
        assert_eq!(stats.size_reduction(), 25.0);
    }

    #[test]
    fn test_record_call_accumulates() {
        let mut stats = RunStatistics::new();
        stats.record_call(0.5);
        stats.record_call(0.25);
        assert_eq!(stats.api_calls, 2);
        assert_eq!(stats.estimated_cost, 0.75);
    }

    #[test]
    fn test_summary() {
        let stats = RunStatistics {
            records_read: 3,
            final_unique: 2,
            estimated_cost: 0.01234,
            api_calls: 1,
            ..RunStatistics::default()
        };

        let summary = stats.summary(true);
        assert!(summary.contains("Records read: 3"));
        assert!(summary.contains("Size reduction: 33.3%"));
        assert!(summary.contains("Estimated cost: $0.0123"));

        let summary = stats.summary(false);
        assert!(!summary.contains("API calls"));
    }

    #[test]
    fn test_serializes_to_json() {
        let stats = RunStatistics {
            records_read: 2,
            ..RunStatistics::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["records_read"], 2);
        assert_eq!(json["api_calls"], 0);
    }
}
