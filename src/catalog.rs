//! Work catalog - enumerates the source directory into an ordered list
//! of work items
//!
//! The catalog is built once at startup: the directory is listed,
//! non-regular entries (subdirectories, symlinks, sockets) are skipped,
//! and the surviving files are sorted by size in descending order.
//! Handing out the largest files first gives the dispatcher the best
//! chance of keeping per-worker volume balanced as the tail of small
//! files fills in the gaps.
//!
//! The sort is stable: files of equal size keep their discovery order,
//! which keeps assignment sequences reproducible.

use crate::error::{CatalogError, CatalogResult};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A single unit of work: one regular file and its size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Full path to the file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,
}

impl WorkItem {
    /// Create a new work item
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// The full, pre-sorted set of discoverable work items for a run
#[derive(Debug)]
pub struct Catalog {
    items: Vec<WorkItem>,
    total_bytes: u64,
}

impl Catalog {
    /// Build the catalog from a source directory
    ///
    /// Lists the directory (non-recursive), keeps regular files only,
    /// drops paths matching any exclude pattern, and sorts the result
    /// by size descending.
    pub fn build(dir: &Path, exclude: &[Regex]) -> CatalogResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| CatalogError::SourceUnavailable {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            // DirEntry::file_type and DirEntry::metadata do not follow
            // symlinks, so links to files are excluded here as well
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Cannot determine file type");
                    continue;
                }
            };

            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if is_excluded(&path, exclude) {
                debug!(path = %path.display(), "Excluded by pattern");
                continue;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot stat file");
                    continue;
                }
            };

            items.push(WorkItem::new(path, size));
        }

        if items.is_empty() {
            return Err(CatalogError::Empty {
                path: dir.to_path_buf(),
            });
        }

        Ok(Self::from_items(items))
    }

    /// Build a catalog from an explicit item list
    ///
    /// Applies the same size-descending stable sort as [`Catalog::build`].
    pub fn from_items(mut items: Vec<WorkItem>) -> Self {
        // Stable sort: equal sizes keep their discovery order
        items.sort_by(|a, b| b.size.cmp(&a.size));
        let total_bytes = items.iter().map(|i| i.size).sum();

        Self { items, total_bytes }
    }

    /// Number of items in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item sizes in bytes
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// The ordered items, largest first
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Consume the catalog, yielding the ordered items
    pub fn into_items(self) -> Vec<WorkItem> {
        self.items
    }
}

/// Check a path against the compiled exclude patterns
fn is_excluded(path: &Path, exclude: &[Regex]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let text = path.to_string_lossy();
    exclude.iter().any(|re| re.is_match(&text))
}
