//! The binary record file

use crate::atomic::write_atomically;
use crate::codec::{self, DecodeError, RecordReader};
use crate::error::{Error, Result};
use crate::record::ProjectRecord;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};

#[derive(Debug, Clone)]
pub struct RecordFile {
    path: Utf8PathBuf,
}

impl RecordFile {
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
            .map_err(|e| self.storage(e))
    }

    fn storage(&self, e: std::io::Error) -> Error {
        Error::storage(self.path.as_str(), e)
    }

    /// Lazily decode the file from the start
    pub fn iter(&self) -> Result<Records> {
        Ok(Records {
            inner: RecordReader::new(BufReader::new(self.open()?)),
            path: self.path.clone(),
        })
    }

    pub fn load_all(&self) -> Result<Vec<ProjectRecord>> {
        self.iter()?.collect()
    }

    pub fn find(&self, name: &str) -> Result<Option<ProjectRecord>> {
        for record in self.iter()? {
            let record = record?;
            if record.name == name {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    pub fn append(&self, record: &ProjectRecord) -> Result<()> {
        let file = self.open()?;
        let is_empty = file.metadata().map_err(|e| self.storage(e))?.len() == 0;

        let mut writer = BufWriter::new(file);
        if is_empty {
            codec::write_header(&mut writer).map_err(|e| self.storage(e))?;
        }
        codec::write_record(&mut writer, record).map_err(|e| self.storage(e))?;
        writer.flush().map_err(|e| self.storage(e))
    }

    /// Replace the whole file with `records`
    pub fn rewrite(&self, records: &[ProjectRecord]) -> Result<()> {
        write_atomically(&self.path, |w| {
            codec::write_header(w)?;
            for record in records {
                codec::write_record(w, record)?;
            }
            Ok(())
        })
    }
}

/// Iterator over the records of one file, re-opened per call to [`RecordFile::iter`]
pub struct Records {
    inner: RecordReader<BufReader<File>>,
    path: Utf8PathBuf,
}

impl Iterator for Records {
    type Item = Result<ProjectRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| {
            item.map_err(|e| match e {
                DecodeError::Io(io) => Error::storage(self.path.as_str(), io),
                other => Error::corrupt_record_file(self.path.as_str(), other.to_string()),
            })
        })
    }
}
