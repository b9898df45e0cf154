//! Manifest types shared by the builder, the build-time writer and the HTTP endpoint.
//!
//! The frontend reads one JSON shape regardless of how the manifest was
//! produced:
//!
//! ```json
//! { "success": true,  "data": [ { "month": "2024-01", "images": [ ... ] } ] }
//! { "success": false, "data": [], "error": "Photos directory not found" }
//! ```
//!
//! In Rust the result is a tagged [`Manifest`] instead of a boolean plus
//! optional fields, so a failure can never carry groups and a success can
//! never carry an error. The conversion to and from the flat wire shape goes
//! through a private body struct.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One image inside a month folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// File name with extension, exactly as found on disk.
    pub name: String,
    /// Public URL path, `/<base-route>/<month>/<name>`.
    pub url: String,
    /// Name of the owning month folder.
    pub month: String,
}

/// All images of one month folder, in directory listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month: String,
    pub images: Vec<PhotoEntry>,
}

/// Result of one builder invocation.
///
/// Groups in `Success` are ordered by month, newest first, and none of them is
/// empty. The builder never returns anything else; callers that deserialize a
/// manifest from disk get the same guarantees checked at the shape level only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ManifestBody", try_from = "ManifestBody")]
pub enum Manifest {
    Success { data: Vec<MonthGroup> },
    Failure { error: String },
}

impl Manifest {
    pub fn success(data: Vec<MonthGroup>) -> Self {
        Manifest::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Manifest::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Manifest::Success { .. })
    }

    /// Month groups; always empty for a failure.
    pub fn groups(&self) -> &[MonthGroup] {
        match self {
            Manifest::Success { data } => data,
            Manifest::Failure { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Manifest::Success { .. } => None,
            Manifest::Failure { error } => Some(error),
        }
    }

    /// Total number of images across all groups.
    pub fn image_count(&self) -> usize {
        self.groups().iter().map(|g| g.images.len()).sum()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ManifestShapeError {
    #[error("failure manifest must carry a non-empty error message")]
    MissingError,
    #[error("failure manifest must not carry data")]
    DataOnFailure,
}

/// Flat wire shape consumed by the frontend.
#[derive(Serialize, Deserialize)]
struct ManifestBody {
    success: bool,
    #[serde(default)]
    data: Vec<MonthGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<Manifest> for ManifestBody {
    fn from(manifest: Manifest) -> Self {
        match manifest {
            Manifest::Success { data } => ManifestBody {
                success: true,
                data,
                error: None,
            },
            Manifest::Failure { error } => ManifestBody {
                success: false,
                data: Vec::new(),
                error: Some(error),
            },
        }
    }
}

impl TryFrom<ManifestBody> for Manifest {
    type Error = ManifestShapeError;

    fn try_from(body: ManifestBody) -> Result<Self, Self::Error> {
        if body.success {
            // A stray error string on a success body is dropped.
            return Ok(Manifest::Success { data: body.data });
        }
        if !body.data.is_empty() {
            return Err(ManifestShapeError::DataOnFailure);
        }
        match body.error {
            Some(error) if !error.is_empty() => Ok(Manifest::Failure { error }),
            _ => Err(ManifestShapeError::MissingError),
        }
    }
}
