//! The plain-text path list
//!
//! One absolute project path per line, in insertion order.

use crate::atomic::write_atomically;
use crate::error::{Error, Result};
use crate::record::ProjectPathEntry;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};

#[derive(Debug, Clone)]
pub struct PathList {
    path: Utf8PathBuf,
}

impl PathList {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&self.path)
            .map_err(|e| Error::storage(self.path.as_str(), e))
    }

    /// All entries, creating an empty list on first access
    pub fn entries(&self) -> Result<Vec<ProjectPathEntry>> {
        let reader = BufReader::new(self.open()?);
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|e| Error::storage(self.path.as_str(), e))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            entries.push(ProjectPathEntry::new(line));
        }

        Ok(entries)
    }

    /// First entry whose project name is `name`
    pub fn find_name(&self, name: &str) -> Result<Option<ProjectPathEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|entry| entry.name() == Some(name)))
    }

    /// Add `project_path` as a new line, even if the file lacks a final newline
    pub fn append(&self, project_path: &Utf8Path) -> Result<()> {
        let storage = |e| Error::storage(self.path.as_str(), e);
        let mut file = self.open()?;

        let len = file.metadata().map_err(storage)?.len();
        let mut line = String::new();
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1)).map_err(storage)?;
            file.read_exact(&mut last).map_err(storage)?;
            if last[0] != b'\n' {
                line.push('\n');
            }
        }
        line.push_str(project_path.as_str());
        line.push('\n');

        file.write_all(line.as_bytes()).map_err(storage)
    }

    /// Drop every entry named `name`, returning how many were removed
    pub fn remove_name(&self, name: &str) -> Result<usize> {
        let entries = self.entries()?;
        let before = entries.len();
        let kept: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.name() != Some(name))
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            write_atomically(&self.path, |w| {
                for entry in &kept {
                    writeln!(w, "{}", entry.path())?;
                }
                Ok(())
            })?;
        }

        Ok(removed)
    }
}
