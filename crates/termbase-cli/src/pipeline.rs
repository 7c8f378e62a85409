//! The consolidation pipeline: ingest, group, merge, write.

use crate::config::AppConfig;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use termbase_domain::traits::LlmProvider;
use termbase_io::{Ingestor, OutputWriter};
use termbase_llm::Provider;
use termbase_matcher::ClusterBuilder;
use termbase_merger::{MergeStrategy, RunContext, RunStatistics};
use tracing::info;

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Final counters
    pub stats: RunStatistics,

    /// Warnings raised during the run, in order
    pub warnings: Vec<String>,

    /// Where the consolidated file was written
    pub output_file: PathBuf,

    /// Whether a backend was used for duplicate groups
    pub service_assisted: bool,
}

/// Run the pipeline with the strategy selected by `config`.
///
/// The configuration is validated and the backend client built before any
/// input is read.
pub fn run_pipeline(config: &AppConfig) -> Result<RunOutcome> {
    config.validate()?;

    if config.enable_ai {
        let (kind, settings) = config.provider_settings()?;
        let provider = Provider::from_settings(kind, settings)?;
        info!("Using {} ({}) for consolidation", kind, provider.model());

        let strategy =
            MergeStrategy::service_assisted(provider, config.columns(), config.merger_config());
        run_with_strategy(config, strategy)
    } else {
        run_with_strategy(config, MergeStrategy::<Provider>::rule_based(config.columns()))
    }
}

/// Run the pipeline with an explicit merge strategy.
pub fn run_with_strategy<L>(config: &AppConfig, mut strategy: MergeStrategy<L>) -> Result<RunOutcome>
where
    L: LlmProvider,
    L::Error: Display,
{
    let columns = config.columns();
    let builder = ClusterBuilder::new(config.matcher_config(), columns.clone())?;

    info!("Starting consolidation of {}", config.input_directory.display());
    let records = Ingestor::new(columns.clone()).ingest_directory(&config.input_directory)?;

    let mut ctx = RunContext::new();
    ctx.stats.records_read = records.len();

    info!(
        "Finding duplicates (threshold {}, {:?} grouping)",
        config.similarity_threshold, config.cluster_policy
    );
    let groups = builder.build(&records);
    ctx.stats.record_groups(&groups);
    info!(
        "Found {} duplicate pairs and {} near-duplicate groups",
        ctx.stats.duplicate_pairs, ctx.stats.near_duplicate_groups
    );

    let service_assisted = strategy.is_service_assisted();
    let mut consolidated = strategy.consolidate(&records, &groups, &mut ctx);
    ctx.stats.final_unique = consolidated.len();

    OutputWriter::new(columns.term.clone()).write(&mut consolidated, &config.output_file)?;

    for line in ctx.stats.summary(service_assisted).lines() {
        info!("{}", line);
    }

    Ok(RunOutcome {
        warnings: ctx.events().iter().map(ToString::to_string).collect(),
        stats: ctx.stats,
        output_file: config.output_file.clone(),
        service_assisted,
    })
}
