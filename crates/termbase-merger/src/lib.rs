//! Termbase Merger
//!
//! Collapses each duplicate group into one consolidated record.
//!
//! # Overview
//!
//! Two strategies are available, chosen once per run:
//!
//! - **Rule-based**: longest term, distinct definitions joined with `" | "`,
//!   distinct URLs joined with `"; "`. Deterministic and offline.
//! - **Service-assisted**: each duplicate group is sent to a text-generation
//!   backend which returns one JSON object. Any failure falls back to the
//!   rule-based merge for that group only.
//!
//! # Architecture
//!
//! ```text
//! Groups → MergeStrategy ─┬─ RuleBasedMerger ───────────────────────→ Records
//!                         └─ ServiceOrchestrator → LLM → parser ─┬──→ Records
//!                                                  (on failure) └─ RuleBasedMerger
//! ```
//!
//! The orchestrator enforces a per-run call budget and a fixed delay between
//! calls, and accumulates call counts and estimated cost into the
//! [`RunContext`].
//!
//! # Example Usage
//!
//! ```
//! use termbase_domain::{ColumnNames, Group, Record, RecordSet};
//! use termbase_llm::MockProvider;
//! use termbase_merger::{MergeStrategy, MergerConfig, RunContext};
//!
//! let records: RecordSet = vec![
//!     Record::new("a.csv", [("term", "HTTP"), ("definition", "Hypertext Transfer Protocol")]),
//!     Record::new("b.csv", [("term", "http"), ("definition", "A network protocol")]),
//! ]
//! .into_iter()
//! .collect();
//! let groups = vec![Group::from_indices(vec![0, 1])];
//!
//! let llm = MockProvider::new("not json");
//! let config = MergerConfig { rate_limit_ms: 0, ..MergerConfig::default() };
//! let mut strategy = MergeStrategy::service_assisted(llm, ColumnNames::default(), config);
//!
//! let mut ctx = RunContext::new();
//! let output = strategy.consolidate(&records, &groups, &mut ctx);
//!
//! // The backend answer was unusable, so the group was merged by rule
//! assert_eq!(output.len(), 1);
//! assert_eq!(output[0].field("definition"), "Hypertext Transfer Protocol | A network protocol");
//! assert_eq!(ctx.stats.fallback_merges, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod orchestrator;
mod parser;
mod prompt;
mod rule_based;
mod stats;
mod strategy;


pub use config::{MergerConfig, DEFAULT_MAX_AI_CALLS, DEFAULT_RATE_LIMIT_MS};
pub use context::{RunContext, RunEvent};
pub use error::MergeError;
pub use orchestrator::ServiceOrchestrator;
pub use parser::parse_merge_response;
pub use prompt::MergePromptBuilder;
pub use rule_based::{RuleBasedMerger, DEFINITION_SEPARATOR, URL_SEPARATOR};
pub use stats::RunStatistics;
pub use strategy::MergeStrategy;
