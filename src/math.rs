//! Fixed point u8 arithmetic used by the blend procs

/// Multiply two u8 values using fixed point math, rounded
///
///     use edgefill::multiply_u8;
///     assert_eq!(multiply_u8(255, 255), 255);
///     assert_eq!(multiply_u8(255, 128), 128);
///     assert_eq!(multiply_u8(0, 200), 0);
///
/// See agg_color_rgba.h:395
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

/// Map an alpha in [0,255] to a scale in [0,256]
pub fn alpha_255_to_256(a: u8) -> u32 {
    u32::from(a) + 1
}

/// Scale an 8 bit value by a [0,256] factor
pub fn alpha_mul(value: u8, scale: u32) -> u8 {
    debug_assert!(scale <= 256);
    ((u32::from(value) * scale) >> 8) as u8
}

/// Source over for one premultiplied component
///
/// `sa` is the source alpha
pub fn src_over_u8(s: u8, d: u8, sa: u8) -> u8 {
    s.saturating_add(multiply_u8(d, 255 - sa))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_end_points() {
        assert_eq!(alpha_mul(200, alpha_255_to_256(255)), 200);
        assert_eq!(alpha_mul(200, alpha_255_to_256(0)), 0);
        assert_eq!(src_over_u8(0, 90, 0), 90);
        assert_eq!(src_over_u8(40, 90, 255), 40);
    }
}
