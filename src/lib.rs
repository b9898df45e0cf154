//! # Photo Manifest
//!
//! Builds the photo listing for a personal website. Photos live in month
//! folders (`public/photos/2024-01/...`); the manifest groups them by month,
//! newest first, as JSON the frontend can render directly.
//!
//! # Two Modes, One Builder
//!
//! ```text
//! serve   GET /api/photos  →  scan::build  →  JSON response
//! build   (once)           →  scan::build  →  .output/public/api/photos.json
//! ```
//!
//! Both modes call [`scan::build`] with an explicit root path and
//! [`scan::ScanOptions`]; neither reads the working directory implicitly.
//! The result is a tagged [`types::Manifest`]. Failures are values, not
//! errors: a missing photos directory is a normal state on a fresh deploy,
//! and the frontend shows an empty gallery for it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the photos root and builds the manifest |
//! | [`naming`] | `YYYY-MM` folder and image extension rules |
//! | [`types`] | `Manifest`, `MonthGroup`, `PhotoEntry` and their JSON shape |
//! | [`publish`] | Build mode: atomic manifest file writing with failure fallback |
//! | [`server`] | On-demand mode: axum endpoint |
//! | [`config`] | `photo-manifest.toml` loading, merging and validation |
//! | [`logging`] | tracing subscriber setup |
//! | [`output`] | CLI output formatting |

pub mod config;
pub mod logging;
pub mod naming;
pub mod output;
pub mod publish;
pub mod scan;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
