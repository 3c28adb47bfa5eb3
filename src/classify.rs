//! Supported-input filter.
//!
//! Only JPEG and PNG sources are resized. Anything else in the source directory
//! is skipped silently: it produces no output and is not counted as a failure.

use std::path::Path;

/// Extensions accepted as batch inputs, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Whether `path` names a supported image, judged by extension alone.
///
/// Matching is case-insensitive. The path does not need to exist. Paths
/// without an extension (including empty paths and dot-files like `.png`)
/// are not supported.
pub fn is_supported(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions() {
        assert!(is_supported("photo.jpg"));
        assert!(is_supported("photo.jpeg"));
        assert!(is_supported("photo.png"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_supported("IMG_0001.JPG"));
        assert!(is_supported("scan.Jpeg"));
        assert!(is_supported("icon.PnG"));
    }

    #[test]
    fn rejects_other_formats() {
        for name in ["a.gif", "a.webp", "a.tiff", "a.bmp", "notes.txt", "a.jpg.bak"] {
            assert!(!is_supported(name), "{name} should be rejected");
        }
    }

    #[test]
    fn rejects_paths_without_extension() {
        assert!(!is_supported(""));
        assert!(!is_supported("README"));
        assert!(!is_supported("photo."));
        assert!(!is_supported(".png"));
        assert!(!is_supported("dir/"));
    }

    #[test]
    fn only_inspects_the_last_component() {
        assert!(is_supported("/tmp/pictures.png/dawn.jpg"));
        assert!(!is_supported("/tmp/pictures.jpg/dawn"));
    }

    #[test]
    fn path_need_not_exist() {
        assert!(is_supported("/definitely/not/here/photo.png"));
    }

    #[test]
    fn near_misses_are_rejected() {
        for ext in ["jp", "jpgx", "pn", "pngg", " jpg", "jpg "] {
            let name = format!("a.{ext}");
            assert!(!is_supported(&name), "{name} should be rejected");
        }
    }
}
