//! Coverage Masks
//!
//! A [Mask] holds per pixel coverage for a rectangle of device space. It is
//! the hand-off between the scan converter, the mask filters and
//! [Blitter::blit_mask](crate::Blitter::blit_mask).

use crate::clip::IntRect;
use crate::config::RasterConfig;
use crate::errors::{RasterError, Result};

/// Layout of a mask image
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MaskFormat {
    /// One bit per pixel, most significant bit first
    Bw,
    /// One byte of coverage per pixel
    A8,
    /// Three A8 planes: alpha, multiply and additive shading
    ThreeD,
}

/// Integer point, used for mask margins
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IPoint {
    pub x: i32,
    pub y: i32,
}

impl IPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Coverage for the pixels of `bounds`
///
/// `image` may be empty while only the bounds of a mask are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    /// Device pixels covered by the mask
    pub bounds: IntRect,
    /// Bytes per row of one plane
    pub row_bytes: usize,
    pub format: MaskFormat,
    pub image: Vec<u8>,
}

impl Mask {
    /// Create a mask with bounds but no image
    pub fn new(bounds: IntRect, format: MaskFormat) -> Self {
        let width = bounds.width().max(0) as usize;
        Mask { bounds, row_bytes: Self::compute_row_bytes(format, width), format, image: vec![] }
    }
    /// Bytes in a row of `width` pixels
    pub fn compute_row_bytes(format: MaskFormat, width: usize) -> usize {
        match format {
            MaskFormat::Bw => (width + 7) >> 3,
            MaskFormat::A8 | MaskFormat::ThreeD => width,
        }
    }
    /// Bytes of one plane
    pub fn plane_size(&self) -> Option<usize> {
        self.row_bytes.checked_mul(self.bounds.height().max(0) as usize)
    }
    /// Bytes of the whole image, `None` on overflow
    pub fn compute_image_size(&self) -> Option<usize> {
        let planes = if self.format == MaskFormat::ThreeD { 3 } else { 1 };
        self.plane_size()?.checked_mul(planes)
    }
    /// Mask has no pixels
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
    /// Allocate a zeroed image for the bounds
    ///
    /// Fails with [RasterError::MaskTooLarge] when the size overflows, is
    /// larger than `config.max_mask_bytes` or cannot be allocated.
    ///
    ///     use edgefill::{IntRect, Mask, MaskFormat, RasterConfig};
    ///
    ///     let config = RasterConfig::default().max_mask_bytes(1000);
    ///     let mut mask = Mask::new(IntRect::new(0, 0, 10, 10), MaskFormat::A8);
    ///     assert!(mask.alloc_image(&config).is_ok());
    ///     let mut big = Mask::new(IntRect::new(0, 0, 100, 100), MaskFormat::A8);
    ///     assert!(big.alloc_image(&config).is_err());
    ///
    pub fn alloc_image(&mut self, config: &RasterConfig) -> Result<()> {
        let too_large = RasterError::MaskTooLarge {
            width: self.bounds.width(),
            height: self.bounds.height(),
        };
        let size = match self.compute_image_size() {
            Some(size) if size <= config.max_mask_bytes => size,
            _ => return Err(too_large),
        };
        let mut image = Vec::new();
        if image.try_reserve_exact(size).is_err() {
            return Err(too_large);
        }
        image.resize(size, 0);
        self.image = image;
        Ok(())
    }
    /// Index of pixel (x,y) in the alpha plane, device coordinates
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bounds.contains(x, y));
        let (dx, dy) = ((x - self.bounds.x1) as usize, (y - self.bounds.y1) as usize);
        match self.format {
            MaskFormat::Bw => dy * self.row_bytes + (dx >> 3),
            MaskFormat::A8 | MaskFormat::ThreeD => dy * self.row_bytes + dx,
        }
    }
    /// Coverage at device pixel (x,y), 0 outside the bounds
    pub fn alpha_at(&self, x: i32, y: i32) -> u8 {
        if !self.bounds.contains(x, y) || self.image.is_empty() {
            return 0;
        }
        let i = self.index(x, y);
        match self.format {
            MaskFormat::Bw => {
                let bit = 0x80 >> ((x - self.bounds.x1) & 7);
                if self.image[i] & bit != 0 { 255 } else { 0 }
            }
            MaskFormat::A8 | MaskFormat::ThreeD => self.image[i],
        }
    }
    /// Set the coverage at device pixel (x,y)
    ///
    /// For [MaskFormat::Bw] any non-zero value sets the bit.
    pub fn set_alpha(&mut self, x: i32, y: i32, v: u8) {
        if !self.bounds.contains(x, y) || self.image.is_empty() {
            return;
        }
        let i = self.index(x, y);
        match self.format {
            MaskFormat::Bw => {
                let bit = 0x80 >> ((x - self.bounds.x1) & 7);
                if v != 0 { self.image[i] |= bit } else { self.image[i] &= !bit }
            }
            MaskFormat::A8 | MaskFormat::ThreeD => self.image[i] = v,
        }
    }
    /// Plane `n` of a [MaskFormat::ThreeD] mask: 0 alpha, 1 multiply, 2 add
    ///
    /// Planes the image does not hold are empty.
    pub fn plane(&self, n: usize) -> &[u8] {
        let size = self.plane_size().unwrap_or(0);
        self.image.get(n * size .. (n + 1) * size).unwrap_or(&[])
    }
    /// Coverage of device row `y` between `x1` and `x2`, expanded to bytes
    pub fn row_alpha(&self, y: i32, x1: i32, x2: i32, out: &mut Vec<u8>) {
        out.clear();
        out.extend((x1 .. x2).map(|x| self.alpha_at(x, y)));
    }
    /// Number of pixels with non-zero coverage
    pub fn count_nonzero(&self) -> usize {
        let b = self.bounds;
        (b.y1 .. b.y2)
            .map(|y| (b.x1 .. b.x2).filter(|&x| self.alpha_at(x, y) != 0).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bw_bits_are_msb_first() {
        let mut mask = Mask::new(IntRect::new(3, 1, 13, 3), MaskFormat::Bw);
        mask.alloc_image(&RasterConfig::default()).unwrap();
        assert_eq!(mask.row_bytes, 2);
        mask.set_alpha(3, 1, 200);
        mask.set_alpha(12, 2, 1);
        assert_eq!(mask.image, vec![0x80, 0, 0, 0x40]);
        assert_eq!(mask.alpha_at(3, 1), 255);
        assert_eq!(mask.alpha_at(4, 1), 0);
        assert_eq!(mask.count_nonzero(), 2);
    }

    #[test]
    fn three_d_has_three_planes() {
        let mut mask = Mask::new(IntRect::new(0, 0, 4, 2), MaskFormat::ThreeD);
        mask.alloc_image(&RasterConfig::default()).unwrap();
        assert_eq!(mask.image.len(), 24);
        assert_eq!(mask.plane(2).len(), 8);
    }

    #[test]
    fn missing_planes_are_empty() {
        let mut mask = Mask::new(IntRect::new(0, 0, 4, 2), MaskFormat::A8);
        mask.alloc_image(&RasterConfig::default()).unwrap();
        assert_eq!(mask.plane(0).len(), 8);
        assert!(mask.plane(1).is_empty());
        assert!(mask.plane(2).is_empty());
    }
}
