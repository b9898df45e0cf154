//! Logging initialization.
//!
//! Scan diagnostics (root path, discovered folders, per-folder files, result)
//! go through `tracing`. They are advisory: nothing reads them back, and the
//! manifest is identical with logging on or off.
//!
//! `RUST_LOG` overrides the default filter in every profile, e.g.
//! `RUST_LOG=photo_manifest=debug` to see folder listings.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

/// Logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output on stderr
    Development,
    /// JSON lines on stderr, for log collectors
    Production,
    /// No output
    Test,
}

const DEFAULT_FILTER: &str = "photo_manifest=info";

static INIT_ONCE: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
