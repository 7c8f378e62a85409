//! Merge strategy selection

use crate::config::MergerConfig;
use crate::context::RunContext;
use crate::orchestrator::ServiceOrchestrator;
use crate::rule_based::RuleBasedMerger;
use std::fmt::Display;
use termbase_domain::traits::LlmProvider;
use termbase_domain::{ColumnNames, ConsolidatedRecord, Group, RecordSet};
use tracing::info;

/// How duplicate groups are collapsed for a run
///
/// Chosen once at run start. The service-assisted variant falls back to the
/// rule-based merge per group on any failure.
pub enum MergeStrategy<L> {
    /// Deterministic merge, no external calls
    RuleBased(RuleBasedMerger),
    /// Merge through the configured backend
    ServiceAssisted(ServiceOrchestrator<L>),
}

impl<L> MergeStrategy<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Rule-based strategy for the configured columns
    pub fn rule_based(columns: ColumnNames) -> Self {
        MergeStrategy::RuleBased(RuleBasedMerger::new(columns))
    }

    /// Service-assisted strategy over `provider`
    pub fn service_assisted(provider: L, columns: ColumnNames, config: MergerConfig) -> Self {
        MergeStrategy::ServiceAssisted(ServiceOrchestrator::new(provider, columns, config))
    }

    /// Whether this strategy contacts a backend
    pub fn is_service_assisted(&self) -> bool {
        matches!(self, MergeStrategy::ServiceAssisted(_))
    }

    /// Collapse every group into consolidated records
    pub fn consolidate(
        &mut self,
        records: &RecordSet,
        groups: &[Group],
        ctx: &mut RunContext,
    ) -> Vec<ConsolidatedRecord> {
        match self {
            MergeStrategy::RuleBased(merger) => {
                info!("Using basic consolidation (AI disabled)");
                groups
                    .iter()
                    .map(|group| merger.merge(&group.records(records)))
                    .collect()
            }
            MergeStrategy::ServiceAssisted(orchestrator) => {
                orchestrator.consolidate(records, groups, ctx)
            }
        }
    }
}
