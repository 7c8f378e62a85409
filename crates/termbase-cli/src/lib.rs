//! Termbase CLI library.
//!
//! Configuration resolution, logging setup, the consolidation pipeline and
//! report formatting behind the `termbase` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command, GlobalArgs};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{run_pipeline, run_with_strategy, RunOutcome};
