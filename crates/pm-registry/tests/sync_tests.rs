//! Integration tests for sync selection and opening projects

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{TimeZone, Utc};
use pm_registry::{
    Error, Opener, ProjectRecord, Registry, RegistryPaths, Result, SyncStatus, Syncer,
};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

/// Records every sync instead of running rsync
#[derive(Default)]
struct RecordingSyncer {
    calls: RefCell<Vec<(Utf8PathBuf, String)>>,
    fail_for: Option<&'static str>,
}

impl Syncer for RecordingSyncer {
    fn name(&self) -> &str {
        "recording"
    }

    fn sync(&self, source: &Utf8Path, destination: &str) -> Result<SyncStatus> {
        self.calls
            .borrow_mut()
            .push((source.to_owned(), destination.to_string()));
        if self.fail_for == source.file_name() {
            Ok(SyncStatus::Failed(Some(23)))
        } else {
            Ok(SyncStatus::Completed)
        }
    }
}

/// Syncs until it reaches `broken`, then cannot run at all
struct BrokenSyncer {
    calls: RefCell<Vec<Utf8PathBuf>>,
    broken: &'static str,
}

impl Syncer for BrokenSyncer {
    fn name(&self) -> &str {
        "broken"
    }

    fn sync(&self, source: &Utf8Path, _destination: &str) -> Result<SyncStatus> {
        self.calls.borrow_mut().push(source.to_owned());
        if source.file_name() == Some(self.broken) {
            Err(Error::launch_failed("broken", "gone"))
        } else {
            Ok(SyncStatus::Completed)
        }
    }
}

#[derive(Default)]
struct RecordingOpener {
    opened: RefCell<Vec<Utf8PathBuf>>,
}

impl Opener for RecordingOpener {
    fn open(&self, path: &Utf8Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_owned());
        Ok(())
    }
}

fn create_test_registry() -> (Registry, TempDir) {
    let temp = TempDir::new().unwrap();
    let base = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    let root = base.join("work");
    fs::create_dir_all(&root).unwrap();

    let paths = RegistryPaths {
        project_list: base.join("state/projects"),
        records: base.join("state/projects.dat"),
        lock: base.join("state/.lock"),
    };
    (Registry::open(paths, root).unwrap(), temp)
}

/// Registry with three projects whose records carry an old timestamp
fn create_populated_registry() -> (Registry, TempDir) {
    let (registry, temp) = create_test_registry();
    let old = Utc.timestamp_opt(1_000_000, 0).unwrap();

    for name in ["alpha", "beta", "gamma"] {
        registry.create(name, None).unwrap();
    }
    let records: Vec<ProjectRecord> = ["alpha", "beta", "gamma"]
        .iter()
        .map(|n| ProjectRecord::new(n, "", old))
        .collect();
    pm_registry::record_file::RecordFile::new(registry.record_path())
        .rewrite(&records)
        .unwrap();

    (registry, temp)
}

fn sync_time(registry: &Registry, name: &str) -> i64 {
    registry
        .find_by_name(name)
        .unwrap()
        .unwrap()
        .last_sync_time
        .timestamp()
}

#[test]
fn test_sync_all_visits_every_line_in_order() {
    let (registry, _temp) = create_populated_registry();
    let syncer = RecordingSyncer::default();
    let mut announced = Vec::new();

    let outcomes = registry
        .sync_all(&syncer, "nas:/backup", None, |p| announced.push(p.to_owned()))
        .unwrap();

    let calls = syncer.calls.borrow();
    assert_eq!(calls.len(), 3);
    let synced: Vec<_> = calls.iter().map(|(p, _)| p.file_name().unwrap()).collect();
    assert_eq!(synced, vec!["alpha", "beta", "gamma"]);
    assert!(calls.iter().all(|(_, dest)| dest == "nas:/backup"));
    assert_eq!(announced, calls.iter().map(|(p, _)| p.clone()).collect::<Vec<_>>());
    assert_eq!(outcomes.len(), 3);
}

#[test]
fn test_sync_selects_exact_full_path() {
    let (registry, _temp) = create_populated_registry();
    let syncer = RecordingSyncer::default();
    let beta = registry.resolve_path("beta");

    registry
        .sync_all(&syncer, "/backup", Some(beta.as_str()), |_| {})
        .unwrap();

    let calls = syncer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, beta);
}

#[test]
fn test_sync_selects_by_project_name() {
    let (registry, _temp) = create_populated_registry();
    let syncer = RecordingSyncer::default();

    registry.sync_all(&syncer, "/backup", Some("gamma"), |_| {}).unwrap();

    let calls = syncer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, registry.resolve_path("gamma"));
}

#[test]
fn test_sync_unknown_selector_is_not_found() {
    let (registry, _temp) = create_populated_registry();
    let syncer = RecordingSyncer::default();

    let err = registry
        .sync_all(&syncer, "/backup", Some("ghost"), |_| {})
        .unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound { .. }));
    assert!(syncer.calls.borrow().is_empty());
}

#[test]
fn test_sync_empty_registry_does_nothing() {
    let (registry, _temp) = create_test_registry();
    let syncer = RecordingSyncer::default();

    let outcomes = registry.sync_all(&syncer, "/backup", None, |_| {}).unwrap();
    assert!(outcomes.is_empty());
}

#[test]
fn test_successful_sync_updates_timestamp() {
    let (registry, _temp) = create_populated_registry();
    let syncer = RecordingSyncer {
        fail_for: Some("beta"),
        ..Default::default()
    };
    let before = Utc::now().timestamp();

    let outcomes = registry.sync_all(&syncer, "/backup", None, |_| {}).unwrap();

    assert_eq!(outcomes[1].status, SyncStatus::Failed(Some(23)));
    assert!(sync_time(&registry, "alpha") >= before - 1);
    assert_eq!(sync_time(&registry, "beta"), 1_000_000);
    assert!(sync_time(&registry, "gamma") >= before - 1);
}

#[test]
fn test_syncer_error_keeps_completed_timestamps() {
    let (registry, _temp) = create_populated_registry();
    let syncer = BrokenSyncer {
        calls: RefCell::new(Vec::new()),
        broken: "beta",
    };
    let before = Utc::now().timestamp();

    let err = registry
        .sync_all(&syncer, "/backup", None, |_| {})
        .unwrap_err();

    assert!(matches!(err, Error::LaunchFailed { .. }));
    assert_eq!(syncer.calls.borrow().len(), 2);
    assert!(sync_time(&registry, "alpha") >= before - 1);
    assert_eq!(sync_time(&registry, "beta"), 1_000_000);
    assert_eq!(sync_time(&registry, "gamma"), 1_000_000);
}

#[test]
fn test_sync_does_not_reorder_records() {
    let (registry, _temp) = create_populated_registry();
    registry
        .sync_all(&RecordingSyncer::default(), "/backup", Some("gamma"), |_| {})
        .unwrap();

    let names: Vec<_> = registry.list().unwrap().map(|r| r.unwrap().name).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn test_open_project_resolves_under_root() {
    let (registry, _temp) = create_populated_registry();
    let opener = RecordingOpener::default();

    let path = registry.open_project("beta", &opener).unwrap();
    assert_eq!(path, registry.root().join("beta"));
    assert_eq!(*opener.opened.borrow(), vec![path]);
}

#[test]
fn test_open_unknown_project_is_not_found() {
    let (registry, _temp) = create_populated_registry();
    let opener = RecordingOpener::default();

    let err = registry.open_project("ghost", &opener).unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound { .. }));
    assert!(opener.opened.borrow().is_empty());
}
