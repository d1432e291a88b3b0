//! The nested-expansion traversal.
//!
//! One configurable work-queue drain replaces recursion over the directory
//! tree: each successfully extracted archive has its extraction target
//! re-scanned, and any newly surfaced archives join the queue. A processed
//! set guarantees every archive reference is extracted at most once.

use crate::discover::find_archives;
use crate::error::ExpandError;
use crate::extract::extract_archive;
use crate::types::{ExpandOptions, ExpandReport, ExpandStats, ExtractionLayout};
use std::collections::{HashSet, VecDeque};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Expand a root archive into an output directory, then keep extracting
/// nested archives until none remain.
///
/// `output_dir` defaults to a sibling directory named after the root archive
/// minus its suffix.
pub fn expand_archive(
    root_archive: &Path,
    output_dir: Option<&Path>,
    options: &ExpandOptions,
) -> Result<ExpandReport, ExpandError> {
    let start_time = Instant::now();

    if !root_archive.exists() {
        return Err(ExpandError::NotFound(root_archive.to_path_buf()));
    }

    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_output_dir(root_archive),
    };

    fs::create_dir_all(&output_dir).map_err(|source| ExpandError::DirectoryCreation {
        path: output_dir.clone(),
        source,
    })?;

    let mut stats = ExpandStats::default();
    let mut queue = VecDeque::new();
    let mut processed = HashSet::new();

    match extract_archive(root_archive, &output_dir, &mut stats) {
        Ok(()) => {
            stats.archives_extracted += 1;
            processed.insert(root_archive.to_path_buf());
            info!(
                archive = %root_archive.display(),
                dest = %output_dir.display(),
                "extracted"
            );
            if options.delete_archives {
                fs::remove_file(root_archive)?;
            }
            queue.extend(find_archives(&output_dir)?);
        }
        Err(ExpandError::Corrupted { path, reason }) => {
            warn!(archive = %path.display(), "skipping corrupt archive: {reason}");
            stats.archives_skipped += 1;
        }
        Err(e) => return Err(e),
    }

    drain_queue(queue, processed, options, &mut stats)?;

    stats.duration = start_time.elapsed();
    Ok(ExpandReport { output_dir, stats })
}

/// Expand every archive already present under an existing directory,
/// in place within that tree.
///
/// Running this over a tree that contains no archives is a no-op reporting
/// zero archives processed.
pub fn expand_directory(
    dir: &Path,
    options: &ExpandOptions,
) -> Result<ExpandReport, ExpandError> {
    let start_time = Instant::now();

    if !dir.is_dir() {
        return Err(ExpandError::NotFound(dir.to_path_buf()));
    }

    let mut stats = ExpandStats::default();
    let queue: VecDeque<PathBuf> = find_archives(dir)?.into();

    drain_queue(queue, HashSet::new(), options, &mut stats)?;

    stats.duration = start_time.elapsed();
    Ok(ExpandReport {
        output_dir: dir.to_path_buf(),
        stats,
    })
}

/// Drain the work queue until no unprocessed archives remain.
///
/// Discovery after each extraction is scoped to the directory that archive
/// was extracted into. Corrupt archives are logged, left on disk, and marked
/// processed so overlapping re-scans cannot pick them up again.
fn drain_queue(
    mut queue: VecDeque<PathBuf>,
    mut processed: HashSet<PathBuf>,
    options: &ExpandOptions,
    stats: &mut ExpandStats,
) -> Result<(), ExpandError> {
    while let Some(archive) = queue.pop_front() {
        if processed.contains(&archive) || !archive.exists() {
            continue;
        }

        let target = extraction_target(&archive, options.layout);
        fs::create_dir_all(&target).map_err(|source| ExpandError::DirectoryCreation {
            path: target.clone(),
            source,
        })?;

        match extract_archive(&archive, &target, stats) {
            Ok(()) => {
                processed.insert(archive.clone());
                stats.archives_extracted += 1;
                info!(
                    archive = %archive.display(),
                    dest = %target.display(),
                    "extracted"
                );
                if options.delete_archives {
                    fs::remove_file(&archive)?;
                }
                for found in find_archives(&target)? {
                    if !processed.contains(&found) {
                        queue.push_back(found);
                    }
                }
            }
            Err(ExpandError::Corrupted { path, reason }) => {
                warn!(archive = %path.display(), "skipping corrupt archive: {reason}");
                processed.insert(archive);
                stats.archives_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Where an archive's contents land, per the configured layout.
fn extraction_target(archive: &Path, layout: ExtractionLayout) -> PathBuf {
    let parent = archive.parent().unwrap_or_else(|| Path::new("."));
    match layout {
        ExtractionLayout::Subdir => {
            parent.join(archive.file_stem().unwrap_or_else(|| OsStr::new("expanded")))
        }
        ExtractionLayout::InPlace => parent.to_path_buf(),
    }
}

/// Sibling directory named after the archive minus its suffix.
fn default_output_dir(archive: &Path) -> PathBuf {
    extraction_target(archive, ExtractionLayout::Subdir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("/data/bundle.zip")),
            Path::new("/data/bundle")
        );
        assert_eq!(
            default_output_dir(Path::new("bundle.zip")),
            Path::new("bundle")
        );
    }

    #[test]
    fn test_extraction_target_subdir() {
        assert_eq!(
            extraction_target(Path::new("/out/a/inner.zip"), ExtractionLayout::Subdir),
            Path::new("/out/a/inner")
        );
    }

    #[test]
    fn test_extraction_target_in_place() {
        assert_eq!(
            extraction_target(Path::new("/out/a/inner.zip"), ExtractionLayout::InPlace),
            Path::new("/out/a")
        );
    }
}
