//! Single-archive extraction step.

use crate::error::ExpandError;
use crate::safety::validate_entry_path;
use crate::types::ExpandStats;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::warn;
use zip::result::ZipError;
use zip::ZipArchive;

/// Extract one archive into the target directory.
///
/// Every entry maps 1:1 from its archive-internal path to a filesystem path
/// under `target`: directory entries create directories, file entries create
/// files, overwriting any existing file at that path. Entries whose internal
/// path fails validation (absolute, escaping via "..", non-UTF-8) are logged
/// and skipped; the remaining entries still extract.
///
/// The archive handle is scoped to this call and released when it returns,
/// error or not.
///
/// # Errors
///
/// Returns `ExpandError::Corrupted` if the archive cannot be parsed or an
/// entry's compressed stream is malformed, and `ExpandError::Io` for any
/// other I/O failure while writing output.
pub fn extract_archive(
    archive_path: &Path,
    target: &Path,
    stats: &mut ExpandStats,
) -> Result<(), ExpandError> {
    let file = File::open(archive_path)?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| map_zip_error(e, archive_path))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| map_zip_error(e, archive_path))?;

        let entry_name = entry.name().to_string();
        let relative = match validate_entry_path(Path::new(&entry_name)) {
            Ok(p) => p,
            Err(err) => {
                warn!(
                    archive = %archive_path.display(),
                    entry = %entry_name,
                    "skipping unsafe entry: {err}"
                );
                continue;
            }
        };

        let out_path = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out_file = File::create(&out_path)?;
        let written = io::copy(&mut entry, &mut out_file).map_err(|e| {
            // A truncated or garbled compressed stream surfaces as a read
            // error from the entry, not a ZipError.
            match e.kind() {
                io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                    ExpandError::Corrupted {
                        path: archive_path.to_path_buf(),
                        reason: e.to_string(),
                    }
                }
                _ => ExpandError::Io(e),
            }
        })?;

        stats.files_extracted += 1;
        stats.bytes_written += written;
    }

    Ok(())
}

/// Classify a `ZipError`: parse-level failures mean the archive itself is
/// bad, plain I/O failures keep their own error kind.
fn map_zip_error(error: ZipError, archive_path: &Path) -> ExpandError {
    match error {
        ZipError::Io(e) => ExpandError::Io(e),
        other => ExpandError::Corrupted {
            path: archive_path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
