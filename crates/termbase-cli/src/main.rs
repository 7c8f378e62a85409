//! Termbase CLI - Consolidate CSV knowledge bases into one deduplicated file.

use clap::Parser;
use termbase_cli::cli::RunArgs;
use termbase_cli::commands;
use termbase_cli::{Cli, Command, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> termbase_cli::Result<()> {
    let cli = Cli::parse();
    let formatter = Formatter::new(!cli.global.no_color);

    match cli.command {
        Some(Command::Init(args)) => commands::execute_init(args, &formatter),
        Some(Command::Run(args)) => commands::execute_run(args, &cli.global, &formatter).map(|_| ()),
        None => commands::execute_run(RunArgs::default(), &cli.global, &formatter).map(|_| ()),
    }
}
