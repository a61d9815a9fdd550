//! Rasterizer configuration
//!
//! All tunables of a draw live here and are passed down explicitly, so
//! separate surfaces or threads never share state.

use crate::clip::HorizontalClip;

/// Largest supported supersampling shift
pub const MAX_SUPERSAMPLE_SHIFT: u8 = 4;

/// Rasterizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    /// Anti-aliased fills sample `2^shift` rows and columns per pixel
    pub supersample_shift: u8,
    /// Left and right clipping behaviour of the edge clipper
    pub horizontal_clip: HorizontalClip,
    /// Let the edge builder use the single polygon fast path
    pub allow_polygon_mode: bool,
    /// Maximum distance in pixels between a curve and its flattened lines
    pub curve_tolerance: f64,
    /// Largest mask image, in bytes, that may be allocated
    pub max_mask_bytes: usize,
    /// Let the blitter factory pick format specific blitters instead of
    /// the generic proc driven one
    pub specialized_blitters: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            supersample_shift: 2,
            horizontal_clip: HorizontalClip::Clamp,
            allow_polygon_mode: true,
            curve_tolerance: 0.25,
            max_mask_bytes: i32::MAX as usize,
            specialized_blitters: true,
        }
    }
}

impl RasterConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }
    /// Set the supersampling shift, clamped to [MAX_SUPERSAMPLE_SHIFT]
    pub fn supersample_shift(mut self, shift: u8) -> Self {
        self.supersample_shift = shift.min(MAX_SUPERSAMPLE_SHIFT);
        self
    }
    /// Set the horizontal clipping behaviour
    pub fn horizontal_clip(mut self, mode: HorizontalClip) -> Self {
        self.horizontal_clip = mode;
        self
    }
    /// Enable or disable the polygon fast path
    pub fn allow_polygon_mode(mut self, allow: bool) -> Self {
        self.allow_polygon_mode = allow;
        self
    }
    /// Set the curve flattening tolerance in pixels
    pub fn curve_tolerance(mut self, tolerance: f64) -> Self {
        self.curve_tolerance = tolerance;
        self
    }
    /// Set the mask allocation limit in bytes
    pub fn max_mask_bytes(mut self, bytes: usize) -> Self {
        self.max_mask_bytes = bytes;
        self
    }
    /// Enable or disable the format specific blitters
    pub fn specialized_blitters(mut self, enable: bool) -> Self {
        self.specialized_blitters = enable;
        self
    }
}
