//! Service Orchestrator
//!
//! Governs service-assisted merges for a run: the call budget, a fixed delay
//! between successive calls, cost accounting, and per-group fallback to the
//! rule-based merge. Calls are strictly sequential and never retried.

use crate::config::MergerConfig;
use crate::context::{RunContext, RunEvent};
use crate::error::MergeError;
use crate::parser::parse_merge_response;
use crate::prompt::MergePromptBuilder;
use crate::rule_based::RuleBasedMerger;
use crate::stats::RunStatistics;
use std::fmt::Display;
use std::thread;
use std::time::{Duration, Instant};
use termbase_domain::traits::LlmProvider;
use termbase_domain::{ColumnNames, ConsolidatedRecord, Group, Record, RecordSet};
use tracing::{debug, info};

/// Enforces a minimum interval between successive calls
#[derive(Debug)]
struct RateLimiter {
    interval: Duration,
    last_call: Option<Instant>,
}

impl RateLimiter {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: None,
        }
    }

    /// Block until the interval since the previous call has elapsed
    fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_call = Some(Instant::now());
    }
}

/// Runs service-assisted merges under a call budget
pub struct ServiceOrchestrator<L> {
    provider: L,
    config: MergerConfig,
    fallback: RuleBasedMerger,
    limiter: RateLimiter,
}

impl<L> ServiceOrchestrator<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create an orchestrator around one provider
    pub fn new(provider: L, columns: ColumnNames, config: MergerConfig) -> Self {
        let limiter = RateLimiter::new(config.rate_limit());
        Self {
            provider,
            config,
            fallback: RuleBasedMerger::new(columns),
            limiter,
        }
    }

    /// The provider in use
    pub fn provider(&self) -> &L {
        &self.provider
    }

    /// Configured columns
    pub fn columns(&self) -> &ColumnNames {
        self.fallback.columns()
    }

    /// Merge one group through the backend
    ///
    /// Only calls that produced a response count against `stats` and accrue
    /// cost, including responses that fail to parse. Transport and status
    /// failures leave the budget untouched.
    pub fn merge_group(
        &mut self,
        records: &[&Record],
        stats: &mut RunStatistics,
    ) -> Result<ConsolidatedRecord, MergeError> {
        let prompt = MergePromptBuilder::new(self.fallback.columns(), records).build();
        debug!("Prompt length: {} chars", prompt.len());

        self.limiter.wait();
        let result = self.provider.generate(&prompt);

        let response = result.map_err(|e| MergeError::Llm(e.to_string()))?;
        stats.record_call(self.provider.estimate_cost(&prompt, &response));

        debug!("LLM response length: {} chars", response.len());
        parse_merge_response(&response, self.fallback.columns(), records.len())
    }

    /// Consolidate every group of a run
    ///
    /// Duplicate groups are merged in group order until the budget runs out;
    /// groups left at that point are not emitted. Singleton groups follow,
    /// passed through unchanged.
    pub fn consolidate(
        &mut self,
        records: &RecordSet,
        groups: &[Group],
        ctx: &mut RunContext,
    ) -> Vec<ConsolidatedRecord> {
        info!("Using AI ({}) to consolidate duplicate groups", self.provider.name());

        let duplicates: Vec<&Group> = groups.iter().filter(|g| g.len() > 1).collect();
        let total = duplicates.len();
        info!("Processing {} duplicate groups with AI", total);

        let mut consolidated = Vec::with_capacity(groups.len());

        for (position, group) in duplicates.iter().enumerate() {
            if ctx.stats.api_calls >= self.config.max_ai_calls {
                let skipped_groups = total - position;
                ctx.stats.skipped_groups = skipped_groups;
                ctx.warn(RunEvent::BudgetExhausted {
                    limit: self.config.max_ai_calls,
                    skipped_groups,
                });
                break;
            }

            let members = group.records(records);
            match self.merge_group(&members, &mut ctx.stats) {
                Ok(record) => {
                    consolidated.push(record);
                    ctx.stats.ai_merged += 1;
                }
                Err(e) => {
                    ctx.warn(RunEvent::MergeFallback {
                        group_seed: group.seed(),
                        reason: e.to_string(),
                    });
                    consolidated.push(self.fallback.merge(&members));
                    ctx.stats.fallback_merges += 1;
                }
            }

            debug!(
                "AI progress: {:.1}% ({}/{})",
                (position + 1) as f64 / total as f64 * 100.0,
                position + 1,
                total
            );
        }

        for group in groups.iter().filter(|g| g.is_singleton()) {
            let seed = &records[group.seed()];
            consolidated.push(ConsolidatedRecord::passthrough(seed));
        }

        consolidated
    }
}
