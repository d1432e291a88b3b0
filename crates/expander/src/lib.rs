//! # Expander
//!
//! Recursive extraction of nested archives into a flat directory tree.
//!
//! Given a root archive, this library unpacks it, locates any archives that
//! surfaced in the extracted output, unpacks those in turn, and repeats
//! until the tree contains no further archives. Traversal is an explicit
//! work queue with a visited set, so every archive is extracted at most
//! once and arbitrarily deep nesting cannot overflow the stack. Entry paths
//! are validated before writing to prevent zip-slip attacks.
//!
//! ## Example
//!
//! ```rust,no_run
//! use expander::{expand, ExpandOptions, ExtractionLayout};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Flatten bundle.zip (and every archive nested inside it) into
//! // a sibling "bundle" directory, deleting archives as they go.
//! let report = expand(Path::new("bundle.zip"), None, &ExpandOptions::default())?;
//! println!(
//!     "{} archives expanded into {}",
//!     report.stats.archives_extracted,
//!     report.output_dir.display()
//! );
//!
//! // Keep the archives and unpack each one next to itself.
//! let options = ExpandOptions {
//!     delete_archives: false,
//!     layout: ExtractionLayout::InPlace,
//! };
//! expand(Path::new("bundle.zip"), Some(Path::new("out")), &options)?;
//! # Ok(())
//! # }
//! ```

pub mod discover;
pub mod error;
pub mod expand;
pub mod extract;
pub mod safety;
pub mod types;

// Re-export main types
pub use error::{ExpandError, SecurityError};
pub use types::{ExpandOptions, ExpandReport, ExpandStats, ExtractionLayout};

use std::path::Path;

/// Expand a root archive and every archive nested inside it.
///
/// # Arguments
///
/// * `root_archive` - Path to the root archive file
/// * `output_dir` - Destination root; defaults to a sibling directory named
///   after the root archive minus its suffix
/// * `options` - Expansion options (archive deletion, nested layout)
///
/// # Returns
///
/// Returns an `ExpandReport` with the resolved output directory and
/// traversal statistics.
///
/// # Errors
///
/// Returns an error if:
/// - The root archive doesn't exist
/// - A target directory cannot be created
/// - An I/O failure occurs while writing output or deleting an archive
///
/// A corrupt archive is not an error here: it is logged, left on disk, and
/// counted in `ExpandStats::archives_skipped`.
pub fn expand(
    root_archive: &Path,
    output_dir: Option<&Path>,
    options: &ExpandOptions,
) -> Result<ExpandReport, ExpandError> {
    expand::expand_archive(root_archive, output_dir, options)
}

/// Expand every archive already present under an existing directory.
///
/// The directory is scanned recursively and each discovered archive is
/// extracted in place within the tree, using the same traversal as
/// [`expand`]. A tree with no archives is a successful no-op.
///
/// # Errors
///
/// Returns `ExpandError::NotFound` if `dir` is not an existing directory;
/// otherwise fails under the same conditions as [`expand`].
pub fn expand_dir(dir: &Path, options: &ExpandOptions) -> Result<ExpandReport, ExpandError> {
    expand::expand_directory(dir, options)
}
