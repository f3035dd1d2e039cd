//! Syncing project directories with rsync

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// rsync flags: archive, compress, human-readable, honour each project's .gitignore
pub const RSYNC_ARGS: &[&str] = &["-azh", "--filter=:- .gitignore"];

/// How one sync ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Completed,
    /// Non-zero exit; `None` when killed by a signal
    Failed(Option<i32>),
}

impl SyncStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Copies a project directory to a destination
pub trait Syncer {
    /// Name shown in logs and errors
    fn name(&self) -> &str;

    /// Run one sync, blocking until it finishes
    fn sync(&self, source: &Utf8Path, destination: &str) -> Result<SyncStatus>;
}

/// Result of syncing one path-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub path: Utf8PathBuf,
    pub status: SyncStatus,
}

/// The system `rsync` binary
#[derive(Debug, Clone)]
pub struct RsyncSyncer {
    program: String,
}

impl Default for RsyncSyncer {
    fn default() -> Self {
        Self {
            program: "rsync".to_string(),
        }
    }
}

impl RsyncSyncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific rsync binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Full argument list for one sync
    pub fn args(source: &Utf8Path, destination: &str) -> Vec<String> {
        RSYNC_ARGS
            .iter()
            .map(|s| s.to_string())
            .chain([source.to_string(), destination.to_string()])
            .collect()
    }
}

impl Syncer for RsyncSyncer {
    fn name(&self) -> &str {
        &self.program
    }

    fn sync(&self, source: &Utf8Path, destination: &str) -> Result<SyncStatus> {
        let program = which::which(&self.program)
            .map_err(|e| Error::launch_failed(&self.program, e.to_string()))?;

        let args = Self::args(source, destination);
        tracing::debug!("Running {} {}", program.display(), args.join(" "));

        let output = duct::cmd(&program, &args)
            .unchecked()
            .run()
            .map_err(|e| Error::launch_failed(&self.program, e.to_string()))?;

        if output.status.success() {
            Ok(SyncStatus::Completed)
        } else {
            Ok(SyncStatus::Failed(output.status.code()))
        }
    }
}
