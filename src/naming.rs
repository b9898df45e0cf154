//! Centralized filename rules for the photos tree.
//!
//! Two conventions decide what the manifest sees:
//!
//! - **Month folders**: a directory directly under the photos root whose name is
//!   exactly `YYYY-MM` (four ASCII digits, a hyphen, two ASCII digits). The
//!   name is both the grouping key and the sort key, so it is never parsed as
//!   a date: `2024-13` is a valid month folder as far as the scanner cares.
//! - **Image files**: files whose extension, compared case-insensitively, is in
//!   the configured extension list.
//!
//! ```text
//! public/photos/
//! ├── 2024-02/          → month folder
//! │   ├── beach.JPG     → image (extension match ignores case)
//! │   └── notes.txt     → ignored
//! ├── 2024-1/           → ignored (month must be two digits)
//! └── drafts/           → ignored
//! ```

use std::path::Path;

/// Extensions recognized as images when nothing else is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Whether `name` follows the `YYYY-MM` month folder convention.
///
/// - `"2024-01"` → true
/// - `"2024-1"` → false (month must be zero-padded)
/// - `"24-01"` → false
/// - `"2024-01-15"` → false (no trailing content allowed)
/// - `"drafts"` → false
pub fn is_month_folder(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

/// Whether `file_name` has one of `extensions`, ignoring ASCII case.
///
/// Only the last extension counts: `photo.jpg.txt` is not an image, and a
/// bare dotfile like `.jpg` has no extension at all.
pub fn has_image_extension<S: AsRef<str>>(file_name: &str, extensions: &[S]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known.as_ref()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_folder_accepts_yyyy_mm() {
        assert!(is_month_folder("2024-01"));
        assert!(is_month_folder("1999-12"));
    }

    #[test]
    fn month_folder_does_not_validate_calendar() {
        assert!(is_month_folder("2024-13"));
        assert!(is_month_folder("0000-00"));
    }

    #[test]
    fn month_folder_requires_zero_padding() {
        assert!(!is_month_folder("2024-1"));
        assert!(!is_month_folder("24-01"));
    }

    #[test]
    fn month_folder_rejects_extra_content() {
        assert!(!is_month_folder("2024-01-15"));
        assert!(!is_month_folder(" 2024-01"));
        assert!(!is_month_folder("2024-01 "));
        assert!(!is_month_folder("2024_01"));
    }

    #[test]
    fn month_folder_rejects_words() {
        assert!(!is_month_folder("drafts"));
        assert!(!is_month_folder("notes"));
        assert!(!is_month_folder(""));
    }

    #[test]
    fn month_folder_rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode digits but not ASCII
        assert!(!is_month_folder("٢٠٢٤-٠١"));
    }

    #[test]
    fn image_extension_case_insensitive() {
        assert!(has_image_extension("a.jpg", DEFAULT_IMAGE_EXTENSIONS));
        assert!(has_image_extension("a.JPG", DEFAULT_IMAGE_EXTENSIONS));
        assert!(has_image_extension("a.JpEg", DEFAULT_IMAGE_EXTENSIONS));
        assert!(has_image_extension("a.WebP", DEFAULT_IMAGE_EXTENSIONS));
    }

    #[test]
    fn image_extension_covers_defaults() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.gif", "a.webp"] {
            assert!(has_image_extension(name, DEFAULT_IMAGE_EXTENSIONS), "{name}");
        }
    }

    #[test]
    fn image_extension_rejects_others() {
        assert!(!has_image_extension("b.txt", DEFAULT_IMAGE_EXTENSIONS));
        assert!(!has_image_extension("b.tiff", DEFAULT_IMAGE_EXTENSIONS));
        assert!(!has_image_extension("README", DEFAULT_IMAGE_EXTENSIONS));
        assert!(!has_image_extension("photo.jpg.txt", DEFAULT_IMAGE_EXTENSIONS));
    }

    #[test]
    fn image_extension_dotfile_has_no_extension() {
        assert!(!has_image_extension(".jpg", DEFAULT_IMAGE_EXTENSIONS));
    }

    #[test]
    fn image_extension_uses_custom_list() {
        let exts = vec!["avif".to_string()];
        assert!(has_image_extension("x.AVIF", &exts));
        assert!(!has_image_extension("x.jpg", &exts));
    }
}
