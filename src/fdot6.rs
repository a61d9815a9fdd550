//! Fixed point scanline math
//!
//! Two fixed point formats are used by the edge code:
//!
//! - [FDot6]: 26.6, 64 units per pixel, used for sub-pixel coordinates
//! - [Fixed]: 16.16, used for slopes and the running x of an edge
//!

use crate::errors::{RasterError, Result};

/// 26.6 fixed point value
pub type FDot6 = i32;
/// 16.16 fixed point value
pub type Fixed = i32;

/// Number of fractional bits in a [FDot6]
pub const FDOT6_SHIFT: i32 = 6;
/// One pixel in [FDot6] units
pub const FDOT6_ONE: FDot6 = 1 << FDOT6_SHIFT;
/// Half a pixel in [FDot6] units
pub const FDOT6_HALF: FDot6 = FDOT6_ONE >> 1;
/// One in [Fixed] units
pub const FIXED_ONE: Fixed = 1 << 16;
/// Half in [Fixed] units
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1;

/// Convert an integer to [FDot6]
///
/// The value must fit in 16 bits; this is checked in debug builds only.
///
///     use edgefill::int_to_fdot6;
///     assert_eq!(int_to_fdot6(3), 192);
///
pub fn int_to_fdot6(x: i32) -> FDot6 {
    debug_assert!(x as i16 as i32 == x, "{} does not fit in 16 bits", x);
    x << FDOT6_SHIFT
}

/// Integer part, rounding towards negative infinity
pub fn fdot6_floor(x: FDot6) -> i32 {
    x >> FDOT6_SHIFT
}

/// Integer part, rounding towards positive infinity
pub fn fdot6_ceil(x: FDot6) -> i32 {
    (x + (FDOT6_ONE - 1)) >> FDOT6_SHIFT
}

/// Round to the nearest integer, halves round up
///
///     use edgefill::fdot6_round;
///     assert_eq!(fdot6_round(32), 1);
///     assert_eq!(fdot6_round(31), 0);
///
pub fn fdot6_round(x: FDot6) -> i32 {
    (x + FDOT6_HALF) >> FDOT6_SHIFT
}

/// Widen a [FDot6] to [Fixed]
pub fn fdot6_to_fixed(x: FDot6) -> Fixed {
    debug_assert!((x << 10) >> 10 == x, "{} overflows 16.16", x);
    x << 10
}

/// Narrow a [Fixed] to [FDot6], dropping the low 10 bits
pub fn fixed_to_fdot6(x: Fixed) -> FDot6 {
    x >> 10
}

/// Convert a floating point coordinate to [FDot6], pre-scaled by `2^shift`
pub fn scalar_to_fdot6(v: f64, shift: u8) -> FDot6 {
    let scale = f64::from(1u32 << (FDOT6_SHIFT as u32 + u32::from(shift)));
    (v * scale).round() as FDot6
}

/// Convert a [FDot6] back to floating point
pub fn fdot6_to_scalar(x: FDot6) -> f64 {
    f64::from(x) / f64::from(FDOT6_ONE)
}

/// Convert a [Fixed] to floating point
pub fn fixed_to_scalar(x: Fixed) -> f64 {
    f64::from(x) / f64::from(FIXED_ONE)
}

/// Multiply a [Fixed] by a value of any precision, keeping the precision
/// of the second operand
pub fn fixed_mul(a: Fixed, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b)) >> 16) as i32
}

/// Round a [Fixed] to the nearest integer
pub fn fixed_round_to_int(x: Fixed) -> i32 {
    ((i64::from(x) + i64::from(FIXED_HALF)) >> 16) as i32
}

/// Floor a [Fixed] to an integer
pub fn fixed_floor_to_int(x: Fixed) -> i32 {
    x >> 16
}

/// Shift a [FDot6] up by `shift` bits for supersampled edges
pub fn fdot6_up_shift(x: FDot6, shift: u8) -> FDot6 {
    debug_assert!(((x << shift) >> shift) == x);
    x << shift
}

/// General 16.16 division, pinned to the representable range
fn fixed_div(numer: i32, denom: i32) -> Fixed {
    let v = (i64::from(numer) << 16) / i64::from(denom);
    v.clamp(-i64::from(i32::MAX), i64::from(i32::MAX)) as Fixed
}

/// Divide two [FDot6] values returning a [Fixed] quotient
///
/// When `a` fits in 16 bits the quotient is computed with a single 32 bit
/// divide; larger numerators would overflow the shift, so they take the
/// 64 bit path.
///
///     use edgefill::{fdot6_div, RasterError};
///     assert_eq!(fdot6_div(64, 128).unwrap(), 1 << 15);
///     assert!(matches!(fdot6_div(64, 0), Err(RasterError::DivideByZero)));
///
pub fn fdot6_div(a: FDot6, b: FDot6) -> Result<Fixed> {
    if b == 0 {
        return Err(RasterError::DivideByZero);
    }
    if a == a as i16 as i32 {
        // i16::MIN << 16 / -1 is the only overflow on this path
        Ok((a << 16).checked_div(b).unwrap_or_else(|| fixed_div(a, b)))
    } else {
        Ok(fixed_div(a, b))
    }
}
