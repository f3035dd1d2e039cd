//! State directory layout
//!
//! Everything pm persists lives in one directory:
//!
//! ```text
//! ~/.config/pm/
//! ├── config         KEY=value settings (EDITOR, RSYNC_DEST)
//! ├── projects       path list, one absolute path per line
//! ├── projects.dat   project records
//! └── .lock          advisory lock for read-modify-write
//! ```
//!
//! `PM_HOME` replaces the whole directory, which is what the tests use.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "PM_HOME";

/// State directory relative to the home directory
const DEFAULT_STATE_DIR: &str = ".config/pm";

const CONFIG_FILE: &str = "config";
const PROJECT_LIST_FILE: &str = "projects";
const RECORD_FILE: &str = "projects.dat";
const LOCK_FILE: &str = ".lock";

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that a
/// shell-level override of HOME is honoured the same way scripts see it.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or(Error::HomeDirNotFound)
}

/// Convert a std path into a UTF-8 path
pub fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| Error::non_utf8_path(p.to_string_lossy()))
}

/// The directory holding pm's config and registry files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDir {
    root: Utf8PathBuf,
}

impl StateDir {
    /// Use an explicit directory
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve from `$PM_HOME`, falling back to `~/.config/pm`
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = std::env::var_os(STATE_DIR_ENV) {
            if !dir.is_empty() {
                let root = to_utf8(PathBuf::from(dir))?;
                tracing::debug!("Using state directory from {}: {}", STATE_DIR_ENV, root);
                return Ok(Self::new(root));
            }
        }

        let home = to_utf8(get_home_dir()?)?;
        Ok(Self::new(home.join(DEFAULT_STATE_DIR)))
    }

    /// Create the directory if it does not exist yet
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn config_file(&self) -> Utf8PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn project_list_file(&self) -> Utf8PathBuf {
        self.root.join(PROJECT_LIST_FILE)
    }

    pub fn record_file(&self) -> Utf8PathBuf {
        self.root.join(RECORD_FILE)
    }

    pub fn lock_file(&self) -> Utf8PathBuf {
        self.root.join(LOCK_FILE)
    }
}
