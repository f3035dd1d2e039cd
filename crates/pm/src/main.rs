//! pm CLI - track local project folders
//!
//! This is the main entry point for the pm command-line interface.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> ExitCode {
    // Parse CLI args; usage mistakes are reported but never fail the process
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e),
    };

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let Some(command) = cli.command else {
        cli::print_help();
        return ExitCode::SUCCESS;
    };

    match commands::run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn handle_parse_error(err: clap::Error) -> ExitCode {
    if err.kind() == ErrorKind::InvalidSubcommand {
        output::error(&format!("Unknown command: {}", invalid_subcommand(&err)));
        cli::print_help();
    } else if let Err(e) = err.print() {
        tracing::warn!("Failed to print usage: {}", e);
    }
    ExitCode::SUCCESS
}

fn invalid_subcommand(err: &clap::Error) -> String {
    use clap::error::{ContextKind, ContextValue};

    match err.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(s)) => s.clone(),
        _ => "?".to_string(),
    }
}

/// Print an error and pick the exit code
///
/// Registry misses and duplicates are user errors and exit 0. Anything that
/// leaves the backing store unreachable exits 1.
fn report_error(err: &anyhow::Error) -> ExitCode {
    output::error(&format!("{:#}", err));

    let fatal = if let Some(e) = err.downcast_ref::<pm_registry::Error>() {
        e.is_fatal()
    } else if let Some(e) = err.downcast_ref::<pm_core::Error>() {
        !e.is_config_error()
    } else {
        true
    };

    if fatal {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Command output goes through `output`; logs are for diagnosis
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
