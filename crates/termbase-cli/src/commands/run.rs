//! Run command implementation.

use crate::cli::{GlobalArgs, RunArgs};
use crate::config::AppConfig;
use crate::error::Result;
use crate::logging;
use crate::output::{write_json_report, Formatter};
use crate::pipeline::{run_pipeline, RunOutcome};
use tracing::error;

/// Resolve configuration for a run: file, then environment, then flags.
pub fn resolve_config(args: &RunArgs, global: &GlobalArgs) -> Result<AppConfig> {
    let mut config = AppConfig::load(global.config.as_deref())?;
    config.apply_process_env()?;
    config.apply_args(args);

    if let Some(level) = &global.log_level {
        config.log_level = level.clone();
    }
    if let Some(path) = &global.log_file {
        config.log_file = path.clone();
    }

    Ok(config)
}

/// Execute the run command.
pub fn execute_run(args: RunArgs, global: &GlobalArgs, formatter: &Formatter) -> Result<RunOutcome> {
    let config = resolve_config(&args, global)?;
    logging::init(&config.log_level, Some(&config.log_file), !global.no_color)?;

    let outcome = run_pipeline(&config).inspect_err(|e| error!("Consolidation failed: {}", e))?;

    println!("{}", formatter.format_report(&outcome));
    if let Some(warnings) = formatter.format_warnings(&outcome) {
        println!("{}", warnings);
    }

    if let Some(path) = &args.report {
        write_json_report(&outcome, path)?;
        println!("{}", formatter.info(&format!("Report written to {}", path.display())));
    }

    println!(
        "{}",
        formatter.success(&format!(
            "Consolidated {} records into {} ({})",
            outcome.stats.records_read,
            outcome.stats.final_unique,
            outcome.output_file.display()
        ))
    );

    Ok(outcome)
}
