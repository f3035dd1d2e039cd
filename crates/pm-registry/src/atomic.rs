//! Replace-via-rename writes

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::io::{BufWriter, Write};
use tempfile::NamedTempFile;

/// Rewrite `path` through a temporary sibling file
///
/// The temp file lives in the same directory so the final rename stays on
/// one filesystem. Readers see either the old or the new contents.
pub(crate) fn write_atomically<F>(path: &Utf8Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let storage = |e| Error::storage(path.as_str(), e);

    let temp = NamedTempFile::new_in(dir).map_err(storage)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer).map_err(storage)?;
        writer.flush().map_err(storage)?;
    }
    temp.as_file().sync_all().map_err(storage)?;

    temp.persist(path).map_err(|e| storage(e.error))?;
    tracing::trace!("Rewrote {}", path);
    Ok(())
}
