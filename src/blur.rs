//! Box Blur
//!
//! Three passes of a box filter in each direction approximate a gaussian
//! blur of A8 masks.

use crate::config::RasterConfig;
use crate::errors::{RasterError, Result};
use crate::mask::{IPoint, Mask, MaskFormat};
use crate::math::multiply_u8;

/// Number of box passes
pub const BLUR_PASSES: usize = 3;

/// How the blurred coverage is combined with the source
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BlurStyle {
    /// Blur inside and outside the source
    #[default]
    Normal,
    /// Blur only inside the source: `blur * src`, nothing outside
    Inner,
}

/// Extra pixels on each side a blur of `sigma` needs
pub fn blur_margin(sigma: f64) -> i32 {
    if sigma > 0.0 && sigma.is_finite() {
        (3.0 * sigma).ceil() as i32
    } else {
        0
    }
}

/// Radius of each box pass for a blur of `sigma`
///
/// Three boxes of width `2r + 1` have a variance close to `sigma^2`.
pub fn box_radius(sigma: f64) -> usize {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return 0;
    }
    let width = (4.0 * sigma * sigma + 1.0).sqrt();
    ((width - 1.0) / 2.0).round() as usize
}

/// Box filter one line with zero padding
fn box_line(src: &[u8], dst: &mut [u8], r: usize) {
    let n = src.len();
    let w = (2 * r + 1) as u32;
    let mut sum: u32 = src[.. (r + 1).min(n)].iter().map(|&v| u32::from(v)).sum();
    for i in 0 .. n {
        dst[i] = ((sum + w / 2) / w) as u8;
        if i + r + 1 < n {
            sum += u32::from(src[i + r + 1]);
        }
        if i >= r {
            sum -= u32::from(src[i - r]);
        }
    }
}

/// Blur a tightly packed `width` x `height` plane in place
pub fn blur_plane(plane: &mut [u8], width: usize, height: usize, r: usize) {
    if r == 0 || width == 0 || height == 0 {
        return;
    }
    let mut line = vec![0u8; width.max(height)];
    let mut out = vec![0u8; width.max(height)];
    for _ in 0 .. BLUR_PASSES {
        for row in plane.chunks_mut(width) {
            line[.. width].copy_from_slice(row);
            box_line(&line[.. width], &mut out[.. width], r);
            row.copy_from_slice(&out[.. width]);
        }
        for x in 0 .. width {
            for y in 0 .. height {
                line[y] = plane[y * width + x];
            }
            box_line(&line[.. height], &mut out[.. height], r);
            for y in 0 .. height {
                plane[y * width + x] = out[y];
            }
        }
    }
}

/// Blur an A8 mask
///
/// The result covers the source bounds grown by [blur_margin] on every
/// side, which is also returned. A source without an image gives a
/// result without an image.
pub fn box_blur(src: &Mask, sigma: f64, style: BlurStyle, config: &RasterConfig) -> Result<(Mask, IPoint)> {
    if src.format != MaskFormat::A8 {
        return Err(RasterError::UnsupportedMaskFormat { expected: MaskFormat::A8, found: src.format });
    }
    let m = blur_margin(sigma);
    let margin = IPoint::new(m, m);
    let mut dst = Mask::new(src.bounds.outset(m, m), MaskFormat::A8);
    if src.image.is_empty() || src.is_empty() {
        return Ok((dst, margin));
    }
    dst.alloc_image(config)?;
    let (w, h) = (src.bounds.width() as usize, src.bounds.height() as usize);
    let m = m as usize;
    for y in 0 .. h {
        let s = &src.image[y * src.row_bytes .. y * src.row_bytes + w];
        let start = (y + m) * dst.row_bytes + m;
        dst.image[start .. start + w].copy_from_slice(s);
    }
    let (dw, dh) = (dst.bounds.width() as usize, dst.bounds.height() as usize);
    blur_plane(&mut dst.image, dw, dh, box_radius(sigma));
    if style == BlurStyle::Inner {
        for y in 0 .. dh {
            for x in 0 .. dw {
                let i = y * dst.row_bytes + x;
                let inside = x >= m && x < m + w && y >= m && y < m + h;
                dst.image[i] = if inside {
                    multiply_u8(dst.image[i], src.image[(y - m) * src.row_bytes + x - m])
                } else {
                    0
                };
            }
        }
    }
    log::debug!("BLUR: sigma {} radius {} margin {}", sigma, box_radius(sigma), m);
    Ok((dst, margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_line_spreads_evenly() {
        let src = [0, 0, 90, 0, 0];
        let mut dst = [0; 5];
        box_line(&src, &mut dst, 1);
        assert_eq!(dst, [0, 30, 30, 30, 0]);
    }

    #[test]
    fn radius_grows_with_sigma() {
        assert_eq!(box_radius(0.0), 0);
        assert_eq!(box_radius(1.0), 1);
        assert!(box_radius(4.0) > box_radius(2.0));
        assert!(3 * box_radius(5.0) as i32 <= blur_margin(5.0));
    }
}
