//! Security and safety checks for archive entry paths.
//!
//! This module validates the internal paths of archive entries before they
//! are written under an extraction target, to prevent attacks like zip-slip
//! (path traversal).

use crate::error::SecurityError;
use std::path::{Component, Path, PathBuf};

/// Validates and normalizes an archive entry path to prevent security vulnerabilities.
///
/// This function performs the following checks:
/// - Rejects absolute paths
/// - Rejects paths containing ".." components (path traversal)
/// - Normalizes the path to remove redundant separators and "." components
/// - Validates UTF-8 encoding
///
/// # Arguments
///
/// * `path` - The entry path from the archive
///
/// # Returns
///
/// Returns a normalized `PathBuf` if the path is safe, or a `SecurityError` if validation fails.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use expander::safety::validate_entry_path;
///
/// // Valid relative path
/// let safe_path = validate_entry_path(Path::new("dir/file.txt")).unwrap();
/// assert_eq!(safe_path, Path::new("dir/file.txt"));
///
/// // Path traversal attempt - rejected
/// let result = validate_entry_path(Path::new("../../etc/passwd"));
/// assert!(result.is_err());
///
/// // Absolute path - rejected
/// let result = validate_entry_path(Path::new("/etc/passwd"));
/// assert!(result.is_err());
/// ```
pub fn validate_entry_path(path: &Path) -> Result<PathBuf, SecurityError> {
    // Check if path is absolute
    if path.is_absolute() {
        return Err(SecurityError::AbsolutePath(path.display().to_string()));
    }

    // Validate UTF-8 encoding
    let path_str = path.to_str().ok_or_else(|| {
        SecurityError::PathTraversal("Path contains invalid UTF-8 characters".to_string())
    })?;

    // Normalize and validate path components
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => {
                // Check for ".." in the component itself (some archives may encode it differently)
                let part_str = part.to_str().ok_or_else(|| {
                    SecurityError::PathTraversal(
                        "Path component contains invalid UTF-8".to_string(),
                    )
                })?;

                if part_str == ".." {
                    return Err(SecurityError::PathTraversal(format!(
                        "Path contains '..' component: {}",
                        path_str
                    )));
                }

                normalized.push(part);
            }
            Component::CurDir => {
                // Skip "." components
                continue;
            }
            Component::ParentDir => {
                // Reject ".." components
                return Err(SecurityError::PathTraversal(format!(
                    "Path contains '..' component: {}",
                    path_str
                )));
            }
            Component::RootDir => {
                // Should not happen since we already checked for absolute paths
                return Err(SecurityError::AbsolutePath(path.display().to_string()));
            }
            Component::Prefix(_) => {
                // Windows-specific prefix (e.g., "C:")
                return Err(SecurityError::AbsolutePath(path.display().to_string()));
            }
        }
    }

    // Ensure the normalized path is not empty
    if normalized.as_os_str().is_empty() {
        return Err(SecurityError::PathTraversal(
            "Path normalizes to empty".to_string(),
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_path_valid() {
        // Simple relative path
        let result = validate_entry_path(Path::new("file.txt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Path::new("file.txt"));

        // Nested path
        let result = validate_entry_path(Path::new("dir/subdir/file.txt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Path::new("dir/subdir/file.txt"));

        // Path with current directory component
        let result = validate_entry_path(Path::new("./dir/file.txt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Path::new("dir/file.txt"));
    }

    #[test]
    fn test_validate_entry_path_absolute() {
        // Unix absolute path
        let result = validate_entry_path(Path::new("/etc/passwd"));
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            SecurityError::AbsolutePath(_)
        ));

        // Another absolute path
        let result = validate_entry_path(Path::new("/tmp/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_entry_path_traversal() {
        // Parent directory component
        let result = validate_entry_path(Path::new("../etc/passwd"));
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            SecurityError::PathTraversal(_)
        ));

        // Multiple parent components
        let result = validate_entry_path(Path::new("../../etc/passwd"));
        assert!(result.is_err());

        // Parent in middle of path
        let result = validate_entry_path(Path::new("dir/../etc/passwd"));
        assert!(result.is_err());

        // Parent at end
        let result = validate_entry_path(Path::new("dir/.."));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_entry_path_unicode() {
        // Japanese characters
        let result = validate_entry_path(Path::new("日本語/ファイル.txt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Path::new("日本語/ファイル.txt"));

        // Mixed unicode and ASCII
        let result = validate_entry_path(Path::new("folder/файл-file-文件.txt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Path::new("folder/файл-file-文件.txt"));
    }

    #[test]
    fn test_validate_entry_path_unicode_traversal() {
        // Unicode path traversal attempts should still be blocked
        let result = validate_entry_path(Path::new("日本語/../etc/passwd"));
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            SecurityError::PathTraversal(_)
        ));

        // Unicode with parent directory
        let result = validate_entry_path(Path::new("../中文/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_entry_path_edge_cases() {
        // Empty path components should be handled
        let result = validate_entry_path(Path::new("dir//file.txt"));
        assert!(result.is_ok());

        // Multiple current directory components
        let result = validate_entry_path(Path::new("./././file.txt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Path::new("file.txt"));

        // Path with only current directory
        let result = validate_entry_path(Path::new("."));
        assert!(result.is_err()); // Should normalize to empty and be rejected

        // Path with trailing slash (directory)
        let result = validate_entry_path(Path::new("dir/subdir/"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_entry_path_zip_slip_variants() {
        // Classic zip-slip
        let result = validate_entry_path(Path::new("../../etc/passwd"));
        assert!(result.is_err());

        // Zip-slip with more levels
        let result = validate_entry_path(Path::new("../../../../../../../etc/passwd"));
        assert!(result.is_err());

        // Zip-slip in middle of path
        let result = validate_entry_path(Path::new("safe/../../etc/passwd"));
        assert!(result.is_err());

        // Zip-slip with current directory obfuscation
        let result = validate_entry_path(Path::new("./../../etc/passwd"));
        assert!(result.is_err());

        // Zip-slip targeting home directory
        let result = validate_entry_path(Path::new("../../home/user/.ssh/id_rsa"));
        assert!(result.is_err());
    }
}
