//! CLI command implementations

mod list;
mod new;
mod open;
mod remove;
mod rsync;

use anyhow::Result;

use crate::cli::{self, Commands};

/// Dispatch one command
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::New(args) => new::run(args),
        Commands::Rsync(args) => rsync::run(args),
        Commands::Remove(args) => remove::run(args),
        Commands::List => list::run(),
        Commands::Help => {
            cli::print_help();
            Ok(())
        }
        Commands::Open(args) => open::run(args),
    }
}
