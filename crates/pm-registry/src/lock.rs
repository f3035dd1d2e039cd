//! Advisory lock around read-modify-write sequences

use crate::error::{Error, Result};
use camino::Utf8Path;
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};

/// Exclusive lock on the registry, released on drop
#[derive(Debug)]
pub struct RegistryLock {
    _file: File,
}

impl RegistryLock {
    /// Block until the lock file at `path` is exclusively ours
    pub fn acquire(path: &Utf8Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|e| Error::storage(path.as_str(), e))?;

        file.lock_exclusive()
            .map_err(|e| Error::storage(path.as_str(), e))?;
        tracing::trace!("Acquired registry lock {}", path);

        Ok(Self { _file: file })
    }
}
