//! Photos directory scanning and manifest building.
//!
//! This is the one piece of logic shared by both invocation modes: the HTTP
//! endpoint calls [`build`] per request, and the `build` command calls it once
//! and writes the result to disk. Both get the same [`Manifest`] for the same
//! directory tree.
//!
//! ## Directory Structure
//!
//! ```text
//! public/photos/                   # Photos root
//! ├── 2024-02/                     # Month folder → one group
//! │   ├── beach.jpg
//! │   ├── dunes.webp
//! │   └── notes.txt                # Not an image, skipped
//! ├── 2024-01/
//! │   └── snow.png
//! ├── 2023-12/                     # No images → group dropped
//! └── drafts/                      # Not YYYY-MM, skipped
//! ```
//!
//! produces groups `2024-02`, `2024-01` in that order.
//!
//! ## Ordering
//!
//! Month folders are sorted by name, descending. Because names are fixed-width
//! and zero-padded this is also newest-first; no date parsing happens. Inside
//! a folder, images keep the order the directory listing returned them in.
//!
//! Folders are listed in parallel with rayon. `collect` on an indexed parallel
//! iterator keeps input order, so the result is independent of which folder
//! finishes first.
//!
//! ## Failure
//!
//! [`scan`] stops at the first I/O error and returns it; [`build`] turns that
//! into [`Manifest::Failure`]. There are no partial manifests: either every
//! folder was read or the caller gets an error message.
//!
//! ## Symlinks
//!
//! Entries are classified after following symlinks, so a symlinked month
//! folder is scanned like a real one and a symlink to an image counts as an
//! image. A dangling symlink is neither and is skipped, even when its name
//! looks like an image.

use crate::naming::{self, DEFAULT_IMAGE_EXTENSIONS};
use crate::types::{Manifest, MonthGroup, PhotoEntry};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Photos directory not found")]
    RootNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_at(path: &Path) -> impl FnOnce(std::io::Error) -> ScanError + '_ {
    move |source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Scan settings that shape the output but not the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// First URL path segment for every image, without slashes (`photos`).
    pub base_route: String,
    /// Recognized image extensions, compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            base_route: "photos".to_string(),
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ScanOptions {
    /// Public URL for an image: `/<base-route>/<month>/<file>`.
    ///
    /// Names are used verbatim, without escaping or case changes.
    pub fn image_url(&self, month: &str, file_name: &str) -> String {
        let route = self.base_route.trim_matches('/');
        if route.is_empty() {
            format!("/{month}/{file_name}")
        } else {
            format!("/{route}/{month}/{file_name}")
        }
    }
}

/// Build the manifest for `root`. Never fails: errors become [`Manifest::Failure`].
pub fn build(root: &Path, options: &ScanOptions) -> Manifest {
    info!(root = %root.display(), "building photo manifest");

    match scan(root, options) {
        Ok(data) => {
            let images: usize = data.iter().map(|g| g.images.len()).sum();
            info!(months = data.len(), images, "photo manifest built");
            Manifest::success(data)
        }
        Err(err) => {
            match &err {
                ScanError::RootNotFound(path) => {
                    warn!(root = %path.display(), "photos directory not found")
                }
                ScanError::Io { .. } => error!(error = %err, "photo scan failed"),
            }
            Manifest::failure(err.to_string())
        }
    }
}

/// Scan `root` into month groups, newest first, empty groups dropped.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Vec<MonthGroup>, ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(ScanError::RootNotFound(root.to_path_buf())),
    }

    let months = month_folders(root)?;
    debug!(?months, "month folders");

    let groups = months
        .par_iter()
        .map(|month| scan_month(root, month, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(groups
        .into_iter()
        .filter(|group| !group.images.is_empty())
        .collect())
}

/// Names of the `YYYY-MM` directories directly under `root`, sorted descending.
fn month_folders(root: &Path) -> Result<Vec<String>, ScanError> {
    let mut months = Vec::new();
    for entry in fs::read_dir(root).map_err(io_at(root))? {
        let entry = entry.map_err(io_at(root))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !naming::is_month_folder(&name) {
            debug!(name = %name, "skipping entry, not a month folder");
            continue;
        }
        if kind_of(&entry)? == EntryKind::Dir {
            months.push(name);
        }
    }

    months.sort_unstable_by(|a, b| b.cmp(a));
    Ok(months)
}

fn scan_month(root: &Path, month: &str, options: &ScanOptions) -> Result<MonthGroup, ScanError> {
    let dir = root.join(month);
    let mut images = Vec::new();

    for entry in fs::read_dir(&dir).map_err(io_at(&dir))? {
        let entry = entry.map_err(io_at(&dir))?;
        let Ok(name) = entry.file_name().into_string() else {
            debug!(month, "skipping file with non UTF-8 name");
            continue;
        };
        if !naming::has_image_extension(&name, &options.extensions) {
            continue;
        }
        if kind_of(&entry)? != EntryKind::File {
            continue;
        }
        images.push(PhotoEntry {
            url: options.image_url(month, &name),
            name,
            month: month.to_string(),
        });
    }

    debug!(
        month,
        files = ?images.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        "images in month folder"
    );

    Ok(MonthGroup {
        month: month.to_string(),
        images,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
    Other,
}

/// Classify a directory entry, following symlinks.
///
/// A dangling symlink is `Other`, not an error.
fn kind_of(entry: &fs::DirEntry) -> Result<EntryKind, ScanError> {
    let path = entry.path();
    let file_type = entry.file_type().map_err(io_at(&path))?;

    let file_type = if file_type.is_symlink() {
        match fs::metadata(&path) {
            Ok(meta) => meta.file_type(),
            Err(_) => return Ok(EntryKind::Other),
        }
    } else {
        file_type
    };

    Ok(if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    })
}
