//! Archive discovery over a directory tree.

use crate::error::ExpandError;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns true if the path carries the archive suffix, matched
/// case-insensitively.
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Recursively collect archive files under `dir`, in deterministic
/// name order.
///
/// # Errors
///
/// Walk failures (unreadable directories, permission errors) surface as
/// `ExpandError::Io`.
pub fn find_archives(dir: &Path) -> Result<Vec<PathBuf>, ExpandError> {
    let mut archives = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && is_archive_path(entry.path()) {
            archives.push(entry.path().to_path_buf());
        }
    }

    Ok(archives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_archive_path() {
        assert!(is_archive_path(Path::new("bundle.zip")));
        assert!(is_archive_path(Path::new("dir/bundle.ZIP")));
        assert!(is_archive_path(Path::new("dir/bundle.Zip")));

        assert!(!is_archive_path(Path::new("bundle.tar")));
        assert!(!is_archive_path(Path::new("bundle.zip.txt")));
        assert!(!is_archive_path(Path::new("zip")));
        assert!(!is_archive_path(Path::new("noextension")));
    }

    #[test]
    fn test_find_archives_recursive_and_ordered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("b.zip"), b"x").unwrap();
        fs::write(root.join("a.zip"), b"x").unwrap();
        fs::write(root.join("plain.txt"), b"x").unwrap();
        fs::write(root.join("nested/deeper/c.ZIP"), b"x").unwrap();

        let found = find_archives(root).unwrap();

        assert_eq!(
            found,
            vec![
                root.join("a.zip"),
                root.join("b.zip"),
                root.join("nested/deeper/c.ZIP"),
            ]
        );
    }

    #[test]
    fn test_find_archives_empty_tree() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_archives(temp_dir.path()).unwrap().is_empty());
    }
}
