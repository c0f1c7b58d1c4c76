use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use operon_core::OperonError;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then OPERON_LOG, then the -v count
    let log_level = std::env::var("OPERON_LOG").unwrap_or_else(|_| default_log_level(cli.verbose).to_string());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<OperonError>() {
            Some(OperonError::Configuration(_)) => 2,
            Some(OperonError::Io(_)) => 3,
            Some(OperonError::Parse(_)) => 4,
            Some(OperonError::InvalidFileName { .. }) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract(args) => crate::cli::commands::extract::run(args, cli.threads),
        Commands::Select(args) => crate::cli::commands::select::run(args),
    }
}
