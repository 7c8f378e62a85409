//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Termbase - Consolidate CSV knowledge bases into one deduplicated file.
#[derive(Debug, Parser)]
#[command(name = "termbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options accepted before or after any command.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Run log file (appended to)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consolidate the input directory (default)
    Run(RunArgs),

    /// Write a sample configuration file
    Init(InitArgs),
}

/// Arguments for the run command.
#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Directory holding the input CSV files
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Similarity threshold (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Maximum backend calls for this run
    #[arg(long)]
    pub max_ai_calls: Option<usize>,

    /// Merge backend (openai, anthropic)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Use rule-based merging only
    #[arg(long)]
    pub no_ai: bool,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Close duplicate groups transitively instead of seed-only matching
    #[arg(long)]
    pub transitive: bool,
}

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the sample configuration
    #[arg(short, long, default_value = "termbase.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}
