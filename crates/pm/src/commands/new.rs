//! `pm new` command handler

use anyhow::Result;

use crate::cli::NewArgs;
use crate::output;
use crate::utils::open_registry;

/// Create a project directory and start tracking it
pub(super) fn run(args: NewArgs) -> Result<()> {
    let registry = open_registry()?;
    registry.create(&args.name, args.description.as_deref())?;

    output::success(&format!(
        "Project '{}' created at {}",
        args.name,
        registry.resolve_path(&args.name)
    ));
    Ok(())
}
