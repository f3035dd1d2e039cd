//! The project registry
//!
//! Every operation is a one-shot scan of the backing files followed by an
//! optional append or rewrite. Mutations run under [`RegistryLock`].

use crate::error::{Error, Result};
use crate::lock::RegistryLock;
use crate::opener::Opener;
use crate::path_list::PathList;
use crate::record::{ProjectPathEntry, ProjectRecord, MAX_FIELD_BYTES};
use crate::record_file::{RecordFile, Records};
use crate::sync::{SyncOutcome, Syncer};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{SubsecRound, Utc};
use pm_core::StateDir;
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, info, warn};

/// Locations of the registry's backing files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPaths {
    pub project_list: Utf8PathBuf,
    pub records: Utf8PathBuf,
    pub lock: Utf8PathBuf,
}

impl RegistryPaths {
    pub fn from_state_dir(state: &StateDir) -> Self {
        Self {
            project_list: state.project_list_file(),
            records: state.record_file(),
            lock: state.lock_file(),
        }
    }
}

/// Tracked projects, rooted at a workspace directory
///
/// New projects are created under `root`, and names resolve to
/// `root/<name>`. The CLI uses the current working directory.
#[derive(Debug, Clone)]
pub struct Registry {
    root: Utf8PathBuf,
    lock_path: Utf8PathBuf,
    path_list: PathList,
    records: RecordFile,
}

impl Registry {
    /// Open the registry, creating empty backing files on first use
    pub fn open(paths: RegistryPaths, root: impl Into<Utf8PathBuf>) -> Result<Self> {
        for file in [&paths.project_list, &paths.records, &paths.lock] {
            if let Some(parent) = file.parent().filter(|p| !p.as_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| Error::storage(parent.as_str(), e))?;
            }
        }

        let registry = Self {
            root: root.into(),
            lock_path: paths.lock,
            path_list: PathList::new(paths.project_list),
            records: RecordFile::new(paths.records),
        };

        // Touch both files so a permissions problem surfaces here
        registry.path_list.entries()?;
        registry.records.iter()?;

        Ok(registry)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn project_list_path(&self) -> &Utf8Path {
        self.path_list.path()
    }

    pub fn record_path(&self) -> &Utf8Path {
        self.records.path()
    }

    fn lock(&self) -> Result<RegistryLock> {
        RegistryLock::acquire(&self.lock_path)
    }

    /// Directory of project `name`
    pub fn resolve_path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Start tracking `name`, creating its directory under the root
    pub fn create(&self, name: &str, description: Option<&str>) -> Result<ProjectRecord> {
        validate_name(name)?;
        let _lock = self.lock()?;

        if let Some(entry) = self.path_list.find_name(name)? {
            return Err(Error::project_exists(name, entry.path().as_str()));
        }
        let project_dir = self.resolve_path(name);
        if self.records.find(name)?.is_some() {
            return Err(Error::project_exists(name, project_dir.as_str()));
        }

        match fs::create_dir(&project_dir) {
            Ok(()) => info!("Created directory {}", project_dir),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && project_dir.is_dir() => {
                debug!("Directory {} already exists", project_dir);
            }
            Err(e) => return Err(Error::storage(project_dir.as_str(), e)),
        }

        let record = ProjectRecord::now(name, description.unwrap_or_default());
        self.path_list.append(&project_dir)?;
        self.records.append(&record)?;

        info!("Registered project {} at {}", name, project_dir);
        Ok(record)
    }

    /// Stop tracking `name`
    ///
    /// Drops the first record with that name and every path-list line
    /// ending in it, including lines left behind without a record. The
    /// project directory itself is left alone. Returns the dropped record,
    /// if there was one.
    pub fn remove(&self, name: &str) -> Result<Option<ProjectRecord>> {
        let _lock = self.lock()?;

        let mut records = self.records.load_all()?;
        let removed = records
            .iter()
            .position(|r| r.name == name)
            .map(|index| records.remove(index));
        if removed.is_some() {
            self.records.rewrite(&records)?;
        }

        let dropped = self.path_list.remove_name(name)?;
        match (&removed, dropped) {
            (None, 0) => return Err(Error::project_not_found(name)),
            (None, _) => warn!("Project {} had a path-list entry but no record", name),
            (Some(_), 0) => warn!("Project {} had a record but no path-list entry", name),
            _ => {}
        }

        info!("Removed project {}", name);
        Ok(removed)
    }

    /// Records in on-disk order, read lazily from a fresh handle
    pub fn list(&self) -> Result<Records> {
        self.records.iter()
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<ProjectRecord>> {
        self.records.find(name)
    }

    pub fn path_entries(&self) -> Result<Vec<ProjectPathEntry>> {
        self.path_list.entries()
    }

    /// Sync tracked paths to `destination`
    ///
    /// With a selector only entries whose full path or project name equals
    /// it are synced; otherwise every entry is. `on_start` is called before
    /// each sync. Projects whose sync succeeded get a fresh
    /// `last_sync_time`. A syncer error stops the run after the projects
    /// already synced have been stamped.
    pub fn sync_all<F>(
        &self,
        syncer: &dyn Syncer,
        destination: &str,
        selector: Option<&str>,
        mut on_start: F,
    ) -> Result<Vec<SyncOutcome>>
    where
        F: FnMut(&Utf8Path),
    {
        let selected: Vec<_> = self
            .path_list
            .entries()?
            .into_iter()
            .filter(|entry| selector.map_or(true, |s| entry.matches(s)))
            .collect();

        if let Some(selector) = selector {
            if selected.is_empty() {
                return Err(Error::project_not_found(selector));
            }
        }

        let mut outcomes = Vec::with_capacity(selected.len());
        let mut aborted = None;
        for entry in selected {
            on_start(entry.path());
            let status = match syncer.sync(entry.path(), destination) {
                Ok(status) => status,
                Err(e) => {
                    aborted = Some(e);
                    break;
                }
            };
            if !status.is_success() {
                warn!("{} failed for {}: {:?}", syncer.name(), entry.path(), status);
            }
            outcomes.push(SyncOutcome {
                path: entry.path().to_owned(),
                status,
            });
        }

        let synced: Vec<&str> = outcomes
            .iter()
            .filter(|o| o.status.is_success())
            .filter_map(|o| o.path.file_name())
            .collect();
        if !synced.is_empty() {
            self.touch(&synced)?;
        }

        match aborted {
            Some(e) => Err(e),
            None => Ok(outcomes),
        }
    }

    /// Set `last_sync_time` to now for the named projects
    fn touch(&self, names: &[&str]) -> Result<()> {
        let _lock = self.lock()?;

        let mut records = self.records.load_all()?;
        let now = Utc::now().trunc_subsecs(0);
        let mut changed = 0;
        for record in records.iter_mut() {
            if names.contains(&record.name.as_str()) {
                record.last_sync_time = now;
                changed += 1;
            }
        }

        if changed > 0 {
            self.records.rewrite(&records)?;
            debug!("Updated sync time of {} record(s)", changed);
        }
        Ok(())
    }

    /// Launch `opener` on the directory of project `name`
    pub fn open_project(&self, name: &str, opener: &dyn Opener) -> Result<Utf8PathBuf> {
        if self.find_by_name(name)?.is_none() {
            return Err(Error::project_not_found(name));
        }

        let path = self.resolve_path(name);
        opener.open(&path)?;
        Ok(path)
    }
}

/// A project name becomes a directory name and a path segment
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name refers to a directory, not a project"
    } else if name.contains('/') || name.contains('\\') {
        "name contains a path separator"
    } else if name.chars().any(char::is_control) {
        "name contains control characters"
    } else if name.trim() != name {
        "name has leading or trailing whitespace"
    } else if name.len() > MAX_FIELD_BYTES {
        "name is too long"
    } else {
        return Ok(());
    };

    Err(Error::invalid_project_name(name, reason))
}
