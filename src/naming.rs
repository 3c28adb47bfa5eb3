//! Output filename convention.
//!
//! Every resized image is named after its source with the target height
//! spliced in before the extension:
//!
//! - `dawn.jpg` at 720 → `dawn_720p.jpg`
//! - `IMG_0042.JPEG` at 1080 → `IMG_0042_1080p.JPEG` (extension text is kept as-is)
//! - `scan.v2.png` at 480 → `scan.v2_480p.png` (only the last extension counts)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name for `source` resized to `height`, e.g. `dawn_720p.jpg`.
pub fn output_file_name(source: &Path, height: u32) -> OsString {
    let mut name = source.file_stem().map(OsString::from).unwrap_or_default();
    name.push(format!("_{height}p"));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Full output path for `source` resized to `height` inside `output_dir`.
pub fn output_path(output_dir: &Path, source: &Path, height: u32) -> PathBuf {
    output_dir.join(output_file_name(source, height))
}
