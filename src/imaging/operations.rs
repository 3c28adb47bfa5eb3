//! High-level image operations.
//!
//! These functions combine calculations with pixel work. They never touch the
//! filesystem: the caller persists each [`ResizedOutput`] through an
//! [`ImageCodec`](super::ImageCodec).

use super::backend::{CodecError, DecodedImage};
use super::calculations::target_width;
use crate::naming::output_path;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer};
use std::path::{Path, PathBuf};

/// Bicubic resampling.
const FILTER: FilterType = FilterType::CatmullRom;

/// Largest output `resize` will produce, in pixels.
///
/// Allows about 62,000 pixels of width at 1080p. Resampling works through an
/// `f32` RGBA buffer of up to this many pixels, which stays within 1 GiB.
pub const MAX_TARGET_PIXELS: u64 = 1 << 26;

/// One resized variant of a source image, ready to be encoded.
#[derive(Debug, Clone)]
pub struct ResizedOutput {
    pub target_height: u32,
    pub image: DecodedImage,
    pub path: PathBuf,
}

/// Narrow an exact target width to `u32`, rejecting outputs over the limit.
fn output_width(width: u64, height: u32) -> Result<u32, CodecError> {
    let too_large = || CodecError::TooLarge {
        width,
        height,
        limit: MAX_TARGET_PIXELS,
    };
    if width
        .checked_mul(u64::from(height))
        .is_none_or(|pixels| pixels > MAX_TARGET_PIXELS)
    {
        return Err(too_large());
    }
    u32::try_from(width).map_err(|_| too_large())
}

/// Resize `image` to `target_height`, keeping its aspect ratio.
///
/// The width comes from [`target_width`] and is not clamped. A zero width
/// yields a zero-width buffer, which the codec rejects when it is written.
/// A width whose output would exceed [`MAX_TARGET_PIXELS`] is rejected here
/// with [`CodecError::TooLarge`] before anything is allocated.
///
/// # Panics
///
/// Panics if `target_height` or the image height is zero.
pub fn resize(image: &DecodedImage, target_height: u32) -> Result<DecodedImage, CodecError> {
    let width = output_width(
        target_width(image.dimensions(), target_height),
        target_height,
    )?;
    let pixels = image.pixels();

    if width == 0 {
        let empty = match pixels {
            DynamicImage::ImageLuma8(_) => {
                DynamicImage::ImageLuma8(ImageBuffer::new(0, target_height))
            }
            DynamicImage::ImageRgba8(_) => {
                DynamicImage::ImageRgba8(ImageBuffer::new(0, target_height))
            }
            _ => DynamicImage::ImageRgb8(ImageBuffer::new(0, target_height)),
        };
        return Ok(DecodedImage::new(empty));
    }

    Ok(DecodedImage::new(pixels.resize_exact(
        width,
        target_height,
        FILTER,
    )))
}

/// Resize `image` for one target height and name its output file.
pub fn create_target(
    image: &DecodedImage,
    source: &Path,
    output_dir: &Path,
    target_height: u32,
) -> Result<ResizedOutput, CodecError> {
    Ok(ResizedOutput {
        target_height,
        image: resize(image, target_height)?,
        path: output_path(output_dir, source, target_height),
    })
}
