//! Binary encoding of the record file
//!
//! ```text
//! header   "PMDB" | version: u8
//! record   name_len: u64 BE | name: UTF-8
//!          last_sync: i64 BE unix seconds
//!          desc_len: u64 BE | description: UTF-8
//! ```
//!
//! Records are [`ProjectRecord`] serialized with bincode using big-endian,
//! fixed-width integers. A zero-length file is an empty registry. The
//! header is written together with the first record.

use crate::record::{ProjectRecord, MAX_FIELD_BYTES};
use bincode::Options;
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

/// File magic
pub const MAGIC: &[u8; 4] = b"PMDB";

/// Current format version
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1;

/// Upper bound on the bytes one record may occupy while decoding
const RECORD_LIMIT: u64 = 4 * 1024;

/// Why a record file failed to decode
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("read failed: {0}")]
    Io(#[source] io::Error),

    #[error("missing PMDB header")]
    BadMagic,

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("truncated record")]
    Truncated,

    #[error("field of {0} bytes exceeds {max}", max = MAX_FIELD_BYTES)]
    FieldTooLong(usize),

    #[error("malformed record: {0}")]
    Malformed(#[source] bincode::Error),
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(e)
        }
    }
}

impl From<bincode::Error> for DecodeError {
    fn from(e: bincode::Error) -> Self {
        match *e {
            bincode::ErrorKind::Io(io) => io.into(),
            other => Self::Malformed(Box::new(other)),
        }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
        .with_limit(RECORD_LIMIT)
}

fn oversized_field(record: &ProjectRecord) -> Option<usize> {
    [&record.name, &record.description]
        .into_iter()
        .map(String::len)
        .find(|len| *len > MAX_FIELD_BYTES)
}

/// Write the file header
pub fn write_header<W: Write + ?Sized>(writer: &mut W) -> io::Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&[FORMAT_VERSION])
}

/// Write one record
pub fn write_record<W: Write + ?Sized>(writer: &mut W, record: &ProjectRecord) -> io::Result<()> {
    if let Some(len) = oversized_field(record) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            DecodeError::FieldTooLong(len),
        ));
    }

    options()
        .serialize_into(writer, record)
        .map_err(|e| match *e {
            bincode::ErrorKind::Io(io) => io,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        })
}

/// Streaming decoder over a record file
///
/// Yields records one at a time and stops after the first error.
pub struct RecordReader<R> {
    inner: R,
    header_read: bool,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            header_read: false,
            done: false,
        }
    }

    fn at_end(&mut self) -> Result<bool, DecodeError> {
        Ok(self.inner.fill_buf()?.is_empty())
    }

    /// Returns false for an empty input
    fn read_header(&mut self) -> Result<bool, DecodeError> {
        if self.at_end()? {
            return Ok(false);
        }

        let mut header = [0u8; HEADER_LEN];
        self.inner.read_exact(&mut header)?;

        if &header[..MAGIC.len()] != MAGIC {
            return Err(DecodeError::BadMagic);
        }
        let version = header[MAGIC.len()];
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        Ok(true)
    }

    /// Returns None at a clean end of input
    fn read_record(&mut self) -> Result<Option<ProjectRecord>, DecodeError> {
        if self.at_end()? {
            return Ok(None);
        }

        let record: ProjectRecord = options().deserialize_from(&mut self.inner)?;
        if let Some(len) = oversized_field(&record) {
            return Err(DecodeError::FieldTooLong(len));
        }
        Ok(Some(record))
    }

    fn next_record(&mut self) -> Result<Option<ProjectRecord>, DecodeError> {
        if !self.header_read {
            self.header_read = true;
            if !self.read_header()? {
                return Ok(None);
            }
        }
        self.read_record()
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<ProjectRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
