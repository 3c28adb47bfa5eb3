//! Shared test utilities for the imgopty test suite.
//!
//! Writes small synthetic source files so codec and pipeline tests don't
//! depend on checked-in fixtures.

use image::{ImageEncoder, RgbImage};
use std::path::Path;

/// Gradient pattern so encoders have real content to compress.
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Create a small valid JPEG file with the given dimensions.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write bytes no image decoder accepts.
pub fn write_corrupt_file(path: &Path) {
    std::fs::write(path, b"definitely not an image").unwrap();
}

/// Create an empty file, for tests where only the name matters.
pub fn touch(path: &Path) {
    std::fs::write(path, b"").unwrap();
}
