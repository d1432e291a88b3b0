//! Type definitions for nested archive expansion.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Options for expanding a nested archive tree.
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Whether to remove each archive file after it is successfully
    /// extracted (this includes the root archive)
    pub delete_archives: bool,

    /// Where nested archives are unpacked relative to their own location
    pub layout: ExtractionLayout,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            delete_archives: true,
            layout: ExtractionLayout::Subdir,
        }
    }
}

/// Where a nested archive's contents are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionLayout {
    /// Extract into a directory named after the archive minus its suffix,
    /// created alongside the archive
    Subdir,

    /// Extract directly into the archive's own containing directory
    InPlace,
}

/// Statistics about a completed expansion operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpandStats {
    /// Number of archives successfully extracted
    pub archives_extracted: u64,

    /// Number of corrupt archives skipped and left on disk
    pub archives_skipped: u64,

    /// Number of files written across all extractions
    pub files_extracted: u64,

    /// Total bytes written to disk
    pub bytes_written: u64,

    /// Duration of the expansion operation (in seconds)
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Result of a completed expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandReport {
    /// Root of the expanded output tree
    pub output_dir: PathBuf,

    /// Counters accumulated over the whole traversal
    pub stats: ExpandStats,
}

// Helper module for Duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
