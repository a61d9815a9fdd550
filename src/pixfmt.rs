//! Pixel Formats
//!
//! Packing, unpacking and blending of single pixels for every
//! destination format. 32 bit pixels are premultiplied `0xAARRGGBB`,
//! 16 bit pixels are 5-6-5 RGB without alpha.

use crate::math::*;

/// Layout of a destination pixel
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8 bit alpha
    A8,
    /// 16 bit 5-6-5 RGB
    Rgb565,
    /// 32 bit premultiplied ARGB
    Argb32,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn bpp(&self) -> usize {
        match self {
            PixelFormat::A8 => 1,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Argb32 => 4,
        }
    }
}

/// Pack components into `0xAARRGGBB`
pub fn pack_argb32(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}

/// Split `0xAARRGGBB` into `(a, r, g, b)`
pub fn unpack_argb32(c: u32) -> (u8, u8, u8, u8) {
    ((c >> 24) as u8, (c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Alpha of a 32 bit pixel
pub fn get_a32(c: u32) -> u8 {
    (c >> 24) as u8
}

/// Scale every component of a 32 bit pixel by a [0,256] factor
pub fn alpha_mul_argb32(c: u32, scale: u32) -> u32 {
    let (a, r, g, b) = unpack_argb32(c);
    pack_argb32(alpha_mul(a, scale), alpha_mul(r, scale),
                alpha_mul(g, scale), alpha_mul(b, scale))
}

/// Premultiplied source over destination
pub fn src_over_argb32(src: u32, dst: u32) -> u32 {
    let (sa, sr, sg, sb) = unpack_argb32(src);
    if sa == 255 {
        return src;
    }
    let (da, dr, dg, db) = unpack_argb32(dst);
    pack_argb32(src_over_u8(sa, da, sa), src_over_u8(sr, dr, sa),
                src_over_u8(sg, dg, sa), src_over_u8(sb, db, sa))
}

/// Blend `src` scaled by `coverage` over `dst`
pub fn blend_argb32(src: u32, dst: u32, coverage: u8) -> u32 {
    match coverage {
        0 => dst,
        255 => src_over_argb32(src, dst),
        _ => src_over_argb32(alpha_mul_argb32(src, alpha_255_to_256(coverage)), dst),
    }
}

/// Pack 8 bit components into 5-6-5
pub fn pack_565(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r) >> 3) << 11 | (u16::from(g) >> 2) << 5 | u16::from(b) >> 3
}

/// Expand 5-6-5 to 8 bit components, replicating the high bits
pub fn unpack_565(c: u16) -> (u8, u8, u8) {
    let r = ((c >> 11) & 0x1F) as u8;
    let g = ((c >> 5) & 0x3F) as u8;
    let b = (c & 0x1F) as u8;
    (r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
}

/// Drop the alpha of a premultiplied 32 bit pixel and pack it as 5-6-5
pub fn argb32_to_565(c: u32) -> u16 {
    let (_, r, g, b) = unpack_argb32(c);
    pack_565(r, g, b)
}

/// Opaque 32 bit pixel from a 5-6-5 pixel
pub fn rgb565_to_argb32(c: u16) -> u32 {
    let (r, g, b) = unpack_565(c);
    pack_argb32(255, r, g, b)
}

/// Blend premultiplied `src` scaled by `coverage` over a 5-6-5 pixel
pub fn blend_565(src: u32, dst: u16, coverage: u8) -> u16 {
    if coverage == 0 {
        return dst;
    }
    let src = if coverage == 255 { src } else {
        alpha_mul_argb32(src, alpha_255_to_256(coverage))
    };
    let (sa, sr, sg, sb) = unpack_argb32(src);
    if sa == 255 {
        return pack_565(sr, sg, sb);
    }
    let (dr, dg, db) = unpack_565(dst);
    pack_565(src_over_u8(sr, dr, sa), src_over_u8(sg, dg, sa), src_over_u8(sb, db, sa))
}

/// Blend an alpha value scaled by `coverage` over an A8 pixel
pub fn blend_a8(alpha: u8, dst: u8, coverage: u8) -> u8 {
    let sa = multiply_u8(alpha, coverage);
    src_over_u8(sa, dst, sa)
}

/// Shade a premultiplied 32 bit pixel with an emboss multiply and add pair
///
/// Each color component becomes `min(c * mul / 255 + add, a)`.
pub fn shade_argb32(c: u32, mul: u8, add: u8) -> u32 {
    let (a, r, g, b) = unpack_argb32(c);
    let shade = |v: u8| multiply_u8(v, mul).saturating_add(add).min(a);
    pack_argb32(a, shade(r), shade(g), shade(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb565_round_trip_of_extremes() {
        assert_eq!(unpack_565(pack_565(255, 255, 255)), (255, 255, 255));
        assert_eq!(unpack_565(pack_565(0, 0, 0)), (0, 0, 0));
        assert_eq!(pack_565(255, 0, 0), 0xF800);
        assert_eq!(rgb565_to_argb32(0x07E0), 0xFF00_FF00);
    }

    #[test]
    fn opaque_source_replaces() {
        assert_eq!(blend_argb32(0xFF10_2030, 0xFFFF_FFFF, 255), 0xFF10_2030);
        assert_eq!(blend_argb32(0xFF10_2030, 0x1234_5678, 0), 0x1234_5678);
        assert_eq!(blend_565(0xFFFF_0000, 0x001F, 255), 0xF800);
        assert_eq!(blend_a8(255, 17, 255), 255);
    }
}
