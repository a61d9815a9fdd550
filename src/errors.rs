//! Errors

use crate::mask::MaskFormat;
use crate::pixfmt::PixelFormat;

/// Failures surfaced at the public boundary of the rasterizer
///
/// Degenerate geometry is never an error; zero-height edges and empty
/// paths simply contribute nothing.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Fixed point division with a zero divisor
    #[error("fixed point division by zero")]
    DivideByZero,

    /// Mask filter received a mask it cannot process
    #[error("unsupported mask format: expected {expected:?}, found {found:?}")]
    UnsupportedMaskFormat { expected: MaskFormat, found: MaskFormat },

    /// Source and destination pixel formats cannot be combined
    #[error("unsupported pixel format: expected {expected:?}, found {found:?}")]
    UnsupportedPixelFormat { expected: PixelFormat, found: PixelFormat },

    /// Mask image would exceed the allocation limit
    #[error("mask of {width}x{height} is too large to allocate")]
    MaskTooLarge { width: i32, height: i32 },

    /// Pixmap with a zero or overflowing size
    #[error("invalid pixmap dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Snapshot reading or writing failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RasterError>;
