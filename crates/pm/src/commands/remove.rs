//! `pm remove` command handler

use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::output;
use crate::utils::open_registry;

/// Stop tracking a project; its directory is kept
pub(super) fn run(args: RemoveArgs) -> Result<()> {
    let registry = open_registry()?;
    registry.remove(&args.name)?;

    output::success(&format!("Project '{}' removed successfully.", args.name));
    Ok(())
}
