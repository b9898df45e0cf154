//! Build-time manifest writing.
//!
//! The build step scans once and writes the manifest JSON where the static
//! server will pick it up. The frontend fetches that file unconditionally, so
//! a missing file is worse than a failure manifest: every path through
//! [`build_and_publish`] tries to leave a file behind.
//!
//! Writes go to a temp file in the target directory followed by a rename, so a
//! reader never sees a half-written manifest.

use crate::scan::{self, ScanOptions};
use crate::types::Manifest;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `manifest` as pretty JSON and write it atomically to `output`.
///
/// Missing parent directories are created.
pub fn publish(manifest: &Manifest, output: &Path) -> Result<(), PublishError> {
    let json = serde_json::to_string_pretty(manifest)?;
    atomic_write(output, json.as_bytes())
}

/// Scan `root` and write the manifest to `output`.
///
/// Scan failures are not errors here: they produce a failure manifest, which
/// is written like any other. If writing the real manifest fails, a minimal
/// failure manifest carrying the write error is attempted in its place and
/// the original error is returned.
pub fn build_and_publish(
    root: &Path,
    options: &ScanOptions,
    output: &Path,
) -> Result<Manifest, PublishError> {
    let manifest = scan::build(root, options);

    match publish(&manifest, output) {
        Ok(()) => {
            info!(output = %output.display(), success = manifest.is_success(), "manifest written");
            Ok(manifest)
        }
        Err(err) => {
            error!(output = %output.display(), error = %err, "failed to write manifest");
            let fallback = Manifest::failure(err.to_string());
            if let Err(fallback_err) = publish(&fallback, output) {
                error!(error = %fallback_err, "failed to write fallback manifest");
            }
            Err(err)
        }
    }
}

fn atomic_write(target: &Path, content: &[u8]) -> Result<(), PublishError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| PublishError::Io { path, source }
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let mut temp_name = target.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp = target.with_file_name(temp_name);

    fs::write(&temp, content).map_err(io_err(&temp))?;
    if let Err(source) = fs::rename(&temp, target) {
        let _ = fs::remove_file(&temp);
        return Err(PublishError::Io {
            path: target.to_path_buf(),
            source,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn read_manifest(path: &Path) -> Manifest {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn publish_writes_json() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("photos.json");
        let manifest = Manifest::success(vec![]);

        publish(&manifest, &target).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert!(value["data"].as_array().unwrap().is_empty());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn publish_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join(".output/public/api/photos.json");

        publish(&Manifest::failure("x"), &target).unwrap();
        assert!(target.is_file());
    }

    #[test]
    fn publish_overwrites_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("photos.json");

        publish(&Manifest::failure("first"), &target).unwrap();
        publish(&Manifest::failure("second"), &target).unwrap();

        assert_eq!(read_manifest(&target), Manifest::failure("second"));
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn build_and_publish_writes_scanned_manifest() {
        let tree = PhotoTree::new().month("2024-01", &["a.jpg", "b.txt"]);
        let out = TempDir::new().unwrap();
        let target = out.path().join("photos.json");

        let manifest = build_and_publish(tree.path(), &ScanOptions::default(), &target).unwrap();

        assert!(manifest.is_success());
        assert_eq!(read_manifest(&target), manifest);
        assert_eq!(months(&manifest), vec!["2024-01"]);
    }

    #[test]
    fn build_and_publish_writes_file_for_missing_root() {
        let out = TempDir::new().unwrap();
        let target = out.path().join("photos.json");

        let manifest = build_and_publish(
            &out.path().join("no-such-dir"),
            &ScanOptions::default(),
            &target,
        )
        .unwrap();

        assert!(!manifest.is_success());
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["data"], serde_json::json!([]));
        assert_eq!(value["error"], "Photos directory not found");
    }

    #[test]
    fn build_and_publish_reports_unwritable_target() {
        let tree = PhotoTree::new().month("2024-01", &["a.jpg"]);
        // The target is an existing directory: rename onto it fails
        let out = TempDir::new().unwrap();
        let target = out.path().join("photos.json");
        fs::create_dir_all(target.join("occupied")).unwrap();

        let result = build_and_publish(tree.path(), &ScanOptions::default(), &target);

        assert!(matches!(result, Err(PublishError::Io { .. })));
        assert!(!out.path().join("photos.json.tmp").exists());
    }
}
