//! `pm open` command handler

use anyhow::Result;
use pm_registry::CommandOpener;

use crate::cli::OpenArgs;
use crate::output;
use crate::utils::{load_config, open_registry};

/// Open a project directory in EDITOR or the platform opener
pub(super) fn run(args: OpenArgs) -> Result<()> {
    let Some(name) = args.name else {
        return super::list::run();
    };

    let registry = open_registry()?;
    let opener = CommandOpener::from_config(&load_config()?)?;

    let path = registry.open_project(&name, &opener)?;
    output::info(&format!("Opened {} with {}", path, opener.program()));
    Ok(())
}
