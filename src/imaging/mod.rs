//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG) |
//! | **Resize** | `DynamicImage::resize_exact` with Catmull-Rom |
//! | **Encode** | `DynamicImage::save_with_format` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: The fixed [`TargetSpec`]
//! - **Backend**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: Resize and output planning combining calculations + pixels

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, DecodedImage, ImageCodec};
pub use calculations::target_width;
pub use operations::{ResizedOutput, create_target, resize};
pub use params::TargetSpec;
pub use rust_backend::RustCodec;
