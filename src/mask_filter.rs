//! Mask Filters
//!
//! Post-processing of the coverage mask of a path before it is blitted.

use crate::blur::{blur_margin, box_blur, BlurStyle};
use crate::config::RasterConfig;
use crate::errors::{RasterError, Result};
use crate::mask::{IPoint, Mask, MaskFormat};
use crate::transform::Transform;

/// Mask filter attached to a paint
#[derive(Debug, Clone, PartialEq)]
pub enum MaskFilter {
    /// Keep every other pixel in a checkerboard
    Stipple,
    /// Light the blurred mask as a relief
    Emboss(Emboss),
}

impl MaskFilter {
    /// Format of the masks this filter produces
    pub fn format(&self) -> MaskFormat {
        match self {
            MaskFilter::Stipple => MaskFormat::A8,
            MaskFilter::Emboss(_) => MaskFormat::ThreeD,
        }
    }
    /// Pixels the filter may add on each side of the source bounds
    pub fn margin(&self, matrix: &Transform) -> IPoint {
        match self {
            MaskFilter::Stipple => IPoint::default(),
            MaskFilter::Emboss(e) => {
                let m = blur_margin(e.sigma(matrix));
                IPoint::new(m, m)
            }
        }
    }
    /// Filter `src` into `dst` with the default allocation limits
    ///
    /// `matrix` is the transform the path was drawn with; `margin`, when
    /// given, receives the growth of the bounds.
    pub fn filter_mask(&self, dst: &mut Mask, src: &Mask, matrix: &Transform,
                       margin: Option<&mut IPoint>) -> Result<()> {
        self.filter_mask_with(dst, src, matrix, margin, &RasterConfig::default())
    }
    /// Filter `src` into `dst`, allocating within the limits of `config`
    pub fn filter_mask_with(&self, dst: &mut Mask, src: &Mask, matrix: &Transform,
                            margin: Option<&mut IPoint>, config: &RasterConfig) -> Result<()> {
        let m = match self {
            MaskFilter::Stipple => {
                stipple(dst, src)?;
                IPoint::default()
            }
            MaskFilter::Emboss(e) => e.filter(dst, src, matrix, config)?,
        };
        if let Some(margin) = margin {
            *margin = m;
        }
        Ok(())
    }
}

/// Checkerboard stipple
///
/// A pixel is kept when `(x + y) & 1 == 0` in device coordinates and
/// zeroed otherwise. Only A8 masks are accepted.
///
///     use edgefill::{IntRect, Mask, MaskFormat, stipple};
///
///     let mut src = Mask::new(IntRect::new(0, 0, 2, 2), MaskFormat::A8);
///     src.image = vec![255; 4];
///     let mut dst = Mask::new(IntRect::default(), MaskFormat::A8);
///     stipple(&mut dst, &src).unwrap();
///     assert_eq!(dst.image, vec![255, 0, 0, 255]);
///
pub fn stipple(dst: &mut Mask, src: &Mask) -> Result<()> {
    if src.format != MaskFormat::A8 {
        return Err(RasterError::UnsupportedMaskFormat { expected: MaskFormat::A8, found: src.format });
    }
    dst.bounds = src.bounds;
    dst.format = MaskFormat::A8;
    dst.row_bytes = src.row_bytes;
    dst.image.clear();
    if src.image.is_empty() {
        return Ok(());
    }
    dst.image.extend_from_slice(&src.image);
    let b = src.bounds;
    for y in b.y1 .. b.y2 {
        let row = (y - b.y1) as usize * dst.row_bytes;
        for x in b.x1 .. b.x2 {
            if (x + y) & 1 != 0 {
                dst.image[row + (x - b.x1) as usize] = 0;
            }
        }
    }
    Ok(())
}

/// Light shining on an embossed mask
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    /// Unit vector pointing towards the light
    pub direction: [f64; 3],
    /// Brightness where the light does not reach
    pub ambient: u8,
    /// Highlight sharpness, 4.4 fixed point
    pub specular: u8,
}

impl Light {
    /// Create a light, `None` if `direction` cannot be normalized
    pub fn new(direction: [f64; 3], ambient: u8, specular: u8) -> Option<Self> {
        let [x, y, z] = direction;
        let len = (x * x + y * y + z * z).sqrt();
        if !(len > 0.0) || !len.is_finite() {
            return None;
        }
        Some(Light { direction: [x / len, y / len, z / len], ambient, specular })
    }
    /// Light with its xy direction rotated by `matrix`, keeping its length
    pub fn transformed(&self, matrix: &Transform) -> Light {
        let [x, y, z] = self.direction;
        let (mx, my) = matrix.transform_vector(x, y);
        let (len, mlen) = ((x * x + y * y).sqrt(), (mx * mx + my * my).sqrt());
        let (mx, my) = if mlen > 0.0 { (mx * len / mlen, my * len / mlen) } else { (x, y) };
        Light { direction: [mx, my, z], ..*self }
    }
}

/// Emboss mask filter
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Emboss {
    pub light: Light,
    /// Blur standard deviation in path units
    pub blur_sigma: f64,
}

/// Height of the surface normal relative to the alpha slope
const DELTA: i32 = 32;

impl Emboss {
    /// Create an emboss filter, `None` for a degenerate light or blur
    ///
    ///     use edgefill::Emboss;
    ///
    ///     let e = Emboss::new([1.0, 1.0, 1.0], 32, 128, 2.0).unwrap();
    ///     assert!((e.light.direction[2] - 1.0 / 3f64.sqrt()).abs() < 1e-12);
    ///     assert!(Emboss::new([0.0; 3], 32, 128, 2.0).is_none());
    ///     assert!(Emboss::new([1.0, 0.0, 0.0], 32, 128, 0.0).is_none());
    ///
    pub fn new(direction: [f64; 3], ambient: u8, specular: u8, blur_sigma: f64) -> Option<Self> {
        if !(blur_sigma > 0.0) || !blur_sigma.is_finite() {
            return None;
        }
        let light = Light::new(direction, ambient, specular)?;
        Some(Emboss { light, blur_sigma })
    }
    /// Blur sigma in device pixels
    pub fn sigma(&self, matrix: &Transform) -> f64 {
        matrix.map_radius(self.blur_sigma)
    }

    fn filter(&self, dst: &mut Mask, src: &Mask, matrix: &Transform,
              config: &RasterConfig) -> Result<IPoint> {
        let sigma = self.sigma(matrix);
        let (blurred, margin) = box_blur(src, sigma, BlurStyle::Inner, config)?;
        *dst = Mask::new(blurred.bounds, MaskFormat::ThreeD);
        if blurred.image.is_empty() {
            return Ok(margin);
        }
        dst.alloc_image(config)?;
        let plane = dst.plane_size().unwrap_or(0);
        dst.image[.. plane].copy_from_slice(&blurred.image);
        emboss(dst, &self.light.transformed(matrix));

        // Put back the unblurred alpha, centered in the grown bounds
        let (w, h) = (src.bounds.width() as usize, src.bounds.height() as usize);
        let (mx, my) = (margin.x as usize, margin.y as usize);
        dst.image[.. plane].iter_mut().for_each(|a| *a = 0);
        for y in 0 .. h {
            let s = &src.image[y * src.row_bytes .. y * src.row_bytes + w];
            let start = (y + my) * dst.row_bytes + mx;
            dst.image[start .. start + w].copy_from_slice(s);
        }
        let (alpha, shading) = dst.image.split_at_mut(plane);
        for (i, a) in alpha.iter().enumerate() {
            if *a == 0 {
                shading[i] = 0;
                shading[plane + i] = 0;
            }
        }
        log::debug!("EMBOSS: sigma {} margin {:?} bounds {:?}", sigma, margin, dst.bounds);
        Ok(margin)
    }
}

fn to_fixed(v: f64) -> i32 {
    (v * 65536.0) as i32
}

fn div255(x: u32) -> u32 {
    ((u64::from(x) * ((1 << 24) / 255)) >> 24) as u32
}

/// Fill the multiply and additive planes of a ThreeD mask from the slopes
/// of its alpha plane
fn emboss(mask: &mut Mask, light: &Light) {
    let specular = light.specular;
    let ambient = i32::from(light.ambient);
    let lx = to_fixed(light.direction[0]);
    let ly = to_fixed(light.direction[1]);
    let lz = to_fixed(light.direction[2]);
    let lz_dot_nz = lz * DELTA;
    let lz_dot8 = lz >> 8;

    let plane = mask.plane_size().unwrap_or(0);
    let rb = mask.row_bytes;
    let (w, h) = (mask.bounds.width() as usize, mask.bounds.height() as usize);
    if w == 0 || h == 0 {
        return;
    }
    let (alpha, shading) = mask.image.split_at_mut(plane);
    let (multiply, additive) = shading.split_at_mut(plane);
    let a = |x: usize, y: usize| i32::from(alpha[y * rb + x]);

    for y in 0 .. h {
        let (up, down) = (y.saturating_sub(1), (y + 1).min(h - 1));
        for x in 0 .. w {
            let (left, right) = (x.saturating_sub(1), (x + 1).min(w - 1));
            let nx = a(right, y) - a(left, y);
            let ny = a(x, down) - a(x, up);

            let numer = lx * nx + ly * ny + lz_dot_nz;
            let mut mul = ambient;
            let mut add = 0;

            if numer > 0 {
                let denom = f64::from(nx * nx + ny * ny + DELTA * DELTA).sqrt() as i32;
                let dot = (numer / denom) >> 8;
                mul = (mul + dot).min(255);

                // Reflection of the light about the normal, seen from (0,0,1)
                let hilite = (2 * dot - lz_dot8) * lz_dot8 >> 8;
                if hilite > 0 {
                    let hilite = hilite.min(255) as u32;
                    let mut acc = hilite;
                    for _ in 0 .. specular >> 4 {
                        acc = div255(acc * hilite);
                    }
                    add = acc as i32;
                }
            }
            multiply[y * rb + x] = mul as u8;
            additive[y * rb + x] = add as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::IntRect;

    #[test]
    fn flat_plateau_gets_ambient_plus_light() {
        let light = Light::new([0.0, 0.0, 1.0], 20, 0).unwrap();
        let mut mask = Mask::new(IntRect::new(0, 0, 3, 3), MaskFormat::ThreeD);
        mask.alloc_image(&RasterConfig::default()).unwrap();
        mask.image[.. 9].iter_mut().for_each(|a| *a = 200);
        emboss(&mut mask, &light);
        // Flat normal facing the light: dot = 65536 * 32 / 32 >> 8 = 256
        assert!(mask.plane(1).iter().all(|&m| m == 255));
    }

    #[test]
    fn light_keeps_xy_length_under_scale() {
        let light = Light::new([1.0, 0.0, 1.0], 0, 0).unwrap();
        let t = light.transformed(&Transform::new_scale(4.0, 4.0));
        assert!((t.direction[0] - light.direction[0]).abs() < 1e-12);
    }
}
