//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait is the only boundary between the batch pipeline and
//! actual file formats: `decode` turns a file into a [`DecodedImage`], `encode`
//! writes one back out in the format implied by the output path.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec). Tests swap in the recording
//! mock from this module so the batch logic runs without touching real files.

use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid image data: {0}")]
    Decode(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid output dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Output {width}x{height} exceeds the {limit} pixel limit")]
    TooLarge { width: u64, height: u32, limit: u64 },
}

/// An in-memory pixel buffer.
///
/// Owned by the unit of work that decoded it and dropped once every target
/// height for that file has been written.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: DynamicImage,
}

impl DecodedImage {
    pub fn new(pixels: DynamicImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(pixels: DynamicImage) -> Self {
        Self::new(pixels)
    }
}

/// Decode/encode capability consumed by the batch runner.
///
/// Implementations must be `Sync`: the parallel strategy shares one codec
/// across all rayon workers.
pub trait ImageCodec: Sync {
    /// Read and decode the image at `path`.
    fn decode(&self, path: &Path) -> Result<DecodedImage, CodecError>;

    /// Encode `image` to `path`, choosing the format from the path's extension.
    fn encode(&self, image: &DecodedImage, path: &Path) -> Result<(), CodecError>;
}
