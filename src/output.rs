//! CLI output formatting.
//!
//! Output is a content inventory: months first, images indented under them,
//! with the public URL prefix shown once per month instead of per image.
//!
//! # Output Format
//!
//! ## Manifest
//!
//! ```text
//! 001 2024-02 (2 photos)
//!     /photos/2024-02/
//!     001 beach.jpg
//!     002 dunes.webp
//! 002 2024-01 (1 photo)
//!     /photos/2024-01/
//!     001 snow.png
//!
//! 2 months, 3 photos
//! ```
//!
//! A failure manifest renders as a single `Failed:` line.
//!
//! ## Build
//!
//! ```text
//! 2 months, 3 photos
//! Wrote .output/public/api/photos.json
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::types::{Manifest, MonthGroup};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// URL prefix shared by every image of a group, e.g. `/photos/2024-01/`.
fn group_prefix(group: &MonthGroup) -> Option<&str> {
    let first = group.images.first()?;
    first
        .url
        .strip_suffix(first.name.as_str())
        .filter(|prefix| group.images.iter().all(|i| i.url.starts_with(prefix)))
}

/// One-line summary: month and photo counts, or the failure message.
pub fn format_summary(manifest: &Manifest) -> String {
    match manifest {
        Manifest::Success { data } => format!(
            "{}, {}",
            plural(data.len(), "month", "months"),
            plural(manifest.image_count(), "photo", "photos")
        ),
        Manifest::Failure { error } => format!("Failed: {error}"),
    }
}

/// Full inventory of a manifest.
pub fn format_manifest_output(manifest: &Manifest) -> Vec<String> {
    let Manifest::Success { data } = manifest else {
        return vec![format_summary(manifest)];
    };

    let mut lines = Vec::new();
    for (i, group) in data.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            group.month,
            plural(group.images.len(), "photo", "photos")
        ));
        let prefix = group_prefix(group);
        if let Some(prefix) = prefix {
            lines.push(format!("{}{}", indent(1), prefix));
        }
        for (j, image) in group.images.iter().enumerate() {
            // Fall back to full URLs when images don't share a prefix
            let label = match prefix {
                Some(_) => image.name.as_str(),
                None => image.url.as_str(),
            };
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), label));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format_summary(manifest));
    lines
}

pub fn print_manifest_output(manifest: &Manifest) {
    for line in format_manifest_output(manifest) {
        println!("{}", line);
    }
}

/// Result of the build step: summary plus the file written.
pub fn format_build_output(manifest: &Manifest, output: &Path) -> Vec<String> {
    vec![
        format_summary(manifest),
        format!("Wrote {}", output.display()),
    ]
}

pub fn print_build_output(manifest: &Manifest, output: &Path) {
    for line in format_build_output(manifest, output) {
        println!("{}", line);
    }
}
