//! CLI argument parsing with clap

use clap::{Args, CommandFactory, Parser, Subcommand};

/// pm - keep track of local project folders
#[derive(Parser, Debug)]
#[command(name = "pm")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project and add it to the list
    #[command(visible_alias = "n")]
    New(NewArgs),

    /// Rsync a project, or every project, to RSYNC_DEST
    #[command(visible_alias = "r")]
    Rsync(RsyncArgs),

    /// Remove a project from the list
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// List all projects
    #[command(visible_alias = "ls")]
    List,

    /// Show this help message
    #[command(visible_alias = "h")]
    Help,

    /// Open a project in EDITOR (lists projects when no name is given)
    #[command(visible_alias = "o")]
    Open(OpenArgs),
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Folder name, created in the current directory
    pub name: String,

    /// Short description shown by `pm list`
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct RsyncArgs {
    /// Project name or full tracked path (default: all projects)
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Project name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Project name
    pub name: Option<String>,
}

/// Print the top-level usage to stdout
pub fn print_help() {
    let mut cmd = Cli::command();
    if let Err(e) = cmd.print_help() {
        tracing::warn!("Failed to print help: {}", e);
    }
    println!();
}
