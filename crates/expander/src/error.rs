//! Error types for nested archive expansion.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for expansion operations.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Input archive or directory not found at the specified path.
    #[error("Archive not found: {0}")]
    NotFound(PathBuf),

    /// The archive is corrupted or malformed.
    #[error("Corrupted archive {path}: {reason}")]
    Corrupted {
        /// Path of the archive that failed to parse
        path: PathBuf,
        /// Underlying parse failure
        reason: String,
    },

    /// A target directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred during extraction or deletion.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Security-related errors for archive entry paths.
///
/// These are produced by path validation and consumed as per-entry skip
/// decisions; they never abort an archive on their own.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Path traversal attempt detected (e.g., "../../../etc/passwd").
    #[error("Path traversal attempt: {0}")]
    PathTraversal(String),

    /// Absolute path not allowed in archive entries.
    #[error("Absolute path not allowed: {0}")]
    AbsolutePath(String),
}
