//! `pm rsync` command handler

use anyhow::Result;
use pm_registry::RsyncSyncer;

use crate::cli::RsyncArgs;
use crate::output;
use crate::utils::{load_config, open_registry};

/// Rsync one or all tracked projects to RSYNC_DEST
pub(super) fn run(args: RsyncArgs) -> Result<()> {
    let config = load_config()?;
    let destination = config.require_rsync_dest()?;
    let registry = open_registry()?;

    let outcomes = registry.sync_all(
        &RsyncSyncer::new(),
        destination,
        args.name.as_deref(),
        |path| output::info(&format!("Syncing {}", path)),
    )?;

    let failed: Vec<_> = outcomes
        .iter()
        .filter(|o| !o.status.is_success())
        .collect();
    for outcome in &failed {
        output::warning(&format!(
            "rsync did not complete for {} ({:?})",
            outcome.path, outcome.status
        ));
    }

    let synced = outcomes.len() - failed.len();
    if synced > 0 {
        output::success(&format!("Synced {} project(s) to {}", synced, destination));
    } else if outcomes.is_empty() {
        output::info("No projects to sync");
    }
    Ok(())
}
