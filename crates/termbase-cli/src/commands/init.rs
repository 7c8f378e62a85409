//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::SAMPLE_CONFIG;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;

/// Execute the init command.
pub fn execute_init(args: InitArgs, formatter: &Formatter) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::NotPermitted(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    if let Some(parent) = args.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.path, SAMPLE_CONFIG)?;

    println!(
        "{}",
        formatter.success(&format!("Wrote sample configuration to {}", args.path.display()))
    );
    println!(
        "{}",
        formatter.info("Replace the placeholder API keys or set enable_ai = false")
    );

    Ok(())
}
