//! Project records and path-list entries

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Largest name or description stored in a record, in bytes
pub const MAX_FIELD_BYTES: usize = 127;

/// Display format for sync timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata kept for one project
///
/// Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique project name, also the directory name
    pub name: String,

    /// Last time the project was created or synced, whole seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_sync_time: DateTime<Utc>,

    /// Free-form description, may be empty
    pub description: String,
}

impl ProjectRecord {
    /// Build a record, clamping both strings to [`MAX_FIELD_BYTES`]
    pub fn new(
        name: impl AsRef<str>,
        description: impl AsRef<str>,
        last_sync_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name: truncate_field(name.as_ref()),
            last_sync_time: last_sync_time.trunc_subsecs(0),
            description: truncate_field(description.as_ref()),
        }
    }

    /// A record stamped with the current time
    pub fn now(name: impl AsRef<str>, description: impl AsRef<str>) -> Self {
        Self::new(name, description, Utc::now())
    }

    /// `YYYY-MM-DD HH:MM:SS` in the local time zone
    pub fn formatted_timestamp(&self) -> String {
        self.last_sync_time
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}

/// Cut `value` to at most [`MAX_FIELD_BYTES`] without splitting a character
pub fn truncate_field(value: &str) -> String {
    if value.len() <= MAX_FIELD_BYTES {
        return value.to_string();
    }

    let mut end = MAX_FIELD_BYTES;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

/// One line of the path list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPathEntry {
    path: Utf8PathBuf,
}

impl ProjectPathEntry {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The final path segment, which is the project name
    pub fn name(&self) -> Option<&str> {
        self.path.file_name()
    }

    /// Whether `selector` names this entry, by full path or by project name
    pub fn matches(&self, selector: &str) -> bool {
        self.path.as_str() == selector || self.name() == Some(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_field_keeps_short_values() {
        assert_eq!(truncate_field("alpha"), "alpha");
        assert_eq!(truncate_field(""), "");
    }

    #[test]
    fn test_truncate_field_respects_char_boundaries() {
        let long = "é".repeat(100); // 200 bytes
        let cut = truncate_field(&long);
        assert!(cut.len() <= MAX_FIELD_BYTES);
        assert_eq!(cut.len(), 126);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_new_drops_subseconds() {
        let at = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        let record = ProjectRecord::new("alpha", "", at);
        assert_eq!(record.last_sync_time.timestamp(), 1_700_000_000);
        assert_eq!(record.last_sync_time.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_formatted_timestamp_shape() {
        let record = ProjectRecord::now("alpha", "d1");
        let formatted = record.formatted_timestamp();
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
        assert_eq!(&formatted[13..14], ":");
    }

    #[test]
    fn test_path_entry_matching() {
        let entry = ProjectPathEntry::new("/home/me/work/alpha");
        assert_eq!(entry.name(), Some("alpha"));
        assert!(entry.matches("alpha"));
        assert!(entry.matches("/home/me/work/alpha"));
        assert!(!entry.matches("work/alpha"));
        assert!(!entry.matches("Alpha"));
    }
}
