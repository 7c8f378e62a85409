//! Per-run state passed through the pipeline stages

use crate::stats::RunStatistics;
use std::fmt;
use tracing::warn;

/// A notable, recoverable occurrence during a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// A service-assisted merge failed and the group was merged by rule
    MergeFallback {
        /// Seed index of the affected group
        group_seed: usize,
        /// Error reported by the merge
        reason: String,
    },

    /// The call budget ran out; remaining duplicate groups were not emitted
    BudgetExhausted {
        /// Configured call budget
        limit: usize,
        /// Duplicate groups left unprocessed
        skipped_groups: usize,
    },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::MergeFallback { group_seed, reason } => write!(
                f,
                "AI merge failed for group {}, using basic merge: {}",
                group_seed, reason
            ),
            RunEvent::BudgetExhausted {
                limit,
                skipped_groups,
            } => write!(
                f,
                "Reached max AI calls limit ({}); {} duplicate groups not merged",
                limit, skipped_groups
            ),
        }
    }
}

/// Statistics and warnings for one run
///
/// Created at run start, passed by reference through each stage and
/// read once the run has finished.
#[derive(Debug, Default)]
pub struct RunContext {
    /// Counters
    pub stats: RunStatistics,
    events: Vec<RunEvent>,
}

impl RunContext {
    /// Create a fresh context
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a warning event and keep it for the report
    pub fn warn(&mut self, event: RunEvent) {
        warn!("{}", event);
        self.events.push(event);
    }

    /// Warnings recorded so far, in order
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Number of warnings recorded
    pub fn warning_count(&self) -> usize {
        self.events.len()
    }
}
