//! Shared test utilities for the photo-manifest test suite.
//!
//! Provides a fixture tree builder and lookup helpers over [`Manifest`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = PhotoTree::new()
//!     .month("2024-01", &["a.jpg", "b.txt"])
//!     .dir("notes");
//!
//! let manifest = build(tree.path(), &ScanOptions::default());
//! assert_eq!(months(&manifest), vec!["2024-01"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Manifest, MonthGroup};

// =========================================================================
// Fixture setup
// =========================================================================

/// A photos root in a temp directory, removed on drop.
///
/// Image files hold placeholder bytes: the scanner only looks at names.
pub struct PhotoTree {
    tmp: TempDir,
}

impl Default for PhotoTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoTree {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// Create directory `name` (may be nested) holding the given files.
    pub fn month(self, name: &str, files: &[&str]) -> Self {
        let dir = self.tmp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), "fake image").unwrap();
        }
        self
    }

    /// Create an empty directory.
    pub fn dir(self, name: &str) -> Self {
        fs::create_dir_all(self.tmp.path().join(name)).unwrap();
        self
    }

    /// Create a plain file directly at `name`.
    pub fn file(self, name: &str) -> Self {
        fs::write(self.tmp.path().join(name), "not a folder").unwrap();
        self
    }
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Month names in manifest order.
pub fn months(manifest: &Manifest) -> Vec<&str> {
    manifest.groups().iter().map(|g| g.month.as_str()).collect()
}

/// Find a group by month. Panics if not found.
pub fn find_group<'a>(manifest: &'a Manifest, month: &str) -> &'a MonthGroup {
    manifest
        .groups()
        .iter()
        .find(|g| g.month == month)
        .unwrap_or_else(|| panic!("month '{month}' not found. Available: {:?}", months(manifest)))
}

/// Image names of a group, sorted.
///
/// Directory listing order is platform-dependent, so tests that put several
/// files in one folder compare sorted names.
pub fn sorted_image_names(group: &MonthGroup) -> Vec<&str> {
    let mut names: Vec<&str> = group.images.iter().map(|i| i.name.as_str()).collect();
    names.sort_unstable();
    names
}
