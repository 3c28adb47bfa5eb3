//! Pure Rust codec on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` with format guessed from content |
//! | Encode (JPEG, PNG) | `DynamicImage::save_with_format`, format from the output extension |

use super::backend::{CodecError, DecodedImage, ImageCodec};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Pure Rust codec using the `image` crate ecosystem.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the output format from the path's extension.
fn output_format(path: &Path) -> Result<ImageFormat, CodecError> {
    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => Ok(format),
        _ => Err(CodecError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )),
    }
}

impl ImageCodec for RustCodec {
    fn decode(&self, path: &Path) -> Result<DecodedImage, CodecError> {
        let pixels = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(DecodedImage::new(pixels))
    }

    fn encode(&self, image: &DecodedImage, path: &Path) -> Result<(), CodecError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidDimensions { width, height });
        }

        let format = output_format(path)?;
        let encode_err = |e: image::ImageError| CodecError::Encode(e.to_string());

        // JPEG has no alpha channel
        if format == ImageFormat::Jpeg && image.pixels().color().has_alpha() {
            let flattened = DynamicImage::ImageRgb8(image.pixels().to_rgb8());
            return flattened.save_with_format(path, format).map_err(encode_err);
        }
        image
            .pixels()
            .save_with_format(path, format)
            .map_err(encode_err)
    }
}
