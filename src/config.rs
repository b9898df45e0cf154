//! Configuration module.
//!
//! Handles loading, validating and merging `photo-manifest.toml`. Stock
//! defaults are the base layer; the user file only needs the keys it wants to
//! change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! photos_root = "public/photos"                  # Directory holding YYYY-MM folders
//! base_route = "photos"                          # URL prefix: /photos/2024-01/a.jpg
//! output = ".output/public/api/photos.json"      # Where `build` writes the manifest
//! extensions = ["jpg", "jpeg", "png", "gif", "webp"]
//!
//! [server]
//! bind = "127.0.0.1:3000"
//! api_path = "/api/photos"
//! timeout_secs = 10
//!
//! [processing]
//! max_processes = 4         # Max parallel folder scans (omit for auto = CPU cores)
//! ```
//!
//! ## Path Resolution
//!
//! Relative `photos_root` and `output` paths resolve against the directory
//! holding the config file, not the process working directory. Running the
//! build from a different directory produces the same manifest.
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::DEFAULT_IMAGE_EXTENSIONS;
use crate::scan::ScanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "photo-manifest.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `photo-manifest.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Root directory containing the `YYYY-MM` month folders.
    pub photos_root: PathBuf,
    /// First URL path segment of every image URL.
    pub base_route: String,
    /// Manifest file written by the build step.
    pub output: PathBuf,
    /// Image extensions to surface, case-insensitive.
    pub extensions: Vec<String>,
    /// HTTP endpoint settings.
    pub server: ServerConfig,
    /// Parallel scanning settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            photos_root: PathBuf::from("public/photos"),
            base_route: "photos".to_string(),
            output: PathBuf::from(".output/public/api/photos.json"),
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            server: ServerConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_route.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "base_route must not be empty".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "extensions entries must be bare extensions without a dot, got {bad:?}"
            )));
        }
        if !self.server.api_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "server.api_path must start with '/'".into(),
            ));
        }
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }

    /// Resolve relative paths against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.photos_root.is_relative() {
            self.photos_root = base.join(&self.photos_root);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
        self
    }

    /// Options handed to the scanner.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            base_route: self.base_route.trim_matches('/').to_string(),
            extensions: self.extensions.clone(),
        }
    }
}

/// HTTP endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Route serving the manifest.
    pub api_path: String,
    /// Upper bound for one manifest build; exceeding it yields a failure manifest.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            api_path: "/api/photos".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of folders scanned in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`, falling back to stock defaults.
///
/// Relative paths inside the config resolve against the file's directory.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    let config = resolve_config(stock_defaults_value(), overlay)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-manifest configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths resolve against the directory holding this file.
# Unknown keys will cause an error.

# Directory holding the month folders (YYYY-MM). Anything else inside it
# is ignored.
photos_root = "public/photos"

# First URL segment of each image URL: /<base_route>/<month>/<file>.
# Must match where the static server exposes photos_root.
base_route = "photos"

# Where `photo-manifest build` writes the manifest JSON. A file is always
# written, even when the scan fails.
output = ".output/public/api/photos.json"

# File extensions surfaced as images, compared case-insensitively.
extensions = ["jpg", "jpeg", "png", "gif", "webp"]

# ---------------------------------------------------------------------------
# HTTP endpoint (`photo-manifest serve`)
# ---------------------------------------------------------------------------
[server]
# Address to listen on.
bind = "127.0.0.1:3000"

# Route answering with the manifest JSON. Always HTTP 200; failures are
# reported in the body as "success": false.
api_path = "/api/photos"

# Maximum seconds for one scan before answering with a failure manifest.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Parallel scanning
# ---------------------------------------------------------------------------
[processing]
# Maximum folders scanned in parallel. Omit to use all CPU cores.
# Values above the core count are clamped down.
# max_processes = 4
"##
}
