//! Curve geometry
//!
//! Quadratic and cubic Bézier curves are chopped at their y extrema so
//! that every piece is monotonic in y, and monotonic pieces are flattened
//! into line segments for the edge builder.

/// Maximum subdivision depth for curve flattening, 2^6 = 64 lines per piece
pub const MAX_SUBDIVIDE_LEVEL: u32 = 6;

/// A point in path space
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    /// Point between `self` and `other` at parameter `t`
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(interp(self.x, other.x, t), interp(self.y, other.y, t))
    }
    /// Both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

fn interp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Compute `numer / denom` if the ratio lies strictly inside (0,1)
fn valid_unit_divide(numer: f64, denom: f64) -> Option<f64> {
    let (numer, denom) = if numer < 0.0 { (-numer, -denom) } else { (numer, denom) };
    if denom == 0.0 || numer == 0.0 || numer >= denom {
        return None;
    }
    let r = numer / denom;
    if r.is_nan() || r == 0.0 {
        return None;
    }
    debug_assert!(r > 0.0 && r < 1.0);
    Some(r)
}

/// Roots of `A t^2 + B t + C = 0` inside (0,1), sorted and deduplicated
///
/// From Numerical Recipes in C, Q = -1/2 (B + sign(B) sqrt[B*B - 4*A*C])
///
/// x1 = Q / A, x2 = C / Q
pub fn find_unit_quad_roots(a: f64, b: f64, c: f64) -> ([f64; 2], usize) {
    let mut roots = [0.0; 2];
    if a == 0.0 {
        return match valid_unit_divide(-c, b) {
            Some(r) => {
                roots[0] = r;
                (roots, 1)
            }
            None => (roots, 0),
        };
    }
    let dr = b * b - 4.0 * a * c;
    if dr < 0.0 {
        return (roots, 0);
    }
    let dr = dr.sqrt();
    if !dr.is_finite() {
        return (roots, 0);
    }
    let q = if b < 0.0 { -(b - dr) / 2.0 } else { -(b + dr) / 2.0 };
    let mut n = 0;
    if let Some(r) = valid_unit_divide(q, a) {
        roots[n] = r;
        n += 1;
    }
    if let Some(r) = valid_unit_divide(c, q) {
        roots[n] = r;
        n += 1;
    }
    if n == 2 {
        if roots[0] > roots[1] {
            roots.swap(0, 1);
        } else if roots[0] == roots[1] {
            n = 1;
        }
    }
    (roots, n)
}

fn is_not_monotonic(a: f64, b: f64, c: f64) -> bool {
    let ab = a - b;
    let bc = if ab < 0.0 { c - b } else { b - c };
    ab == 0.0 || bc < 0.0
}

/// Split a quadratic at `t`, producing two quadratics sharing `dst[2]`
pub fn chop_quad_at(src: &[Point; 3], t: f64) -> [Point; 5] {
    debug_assert!(t > 0.0 && t < 1.0);
    let ab = src[0].lerp(&src[1], t);
    let bc = src[1].lerp(&src[2], t);
    [src[0], ab, ab.lerp(&bc, t), bc, src[2]]
}

/// Chop a quadratic so the pieces are monotonic in y
///
/// Returns the points and the number of chops (0 or 1); quadratic `i`
/// uses `dst[2*i ..= 2*i + 2]`.
pub fn chop_quad_at_y_extrema(src: &[Point; 3]) -> ([Point; 5], usize) {
    let (a, mut b, c) = (src[0].y, src[1].y, src[2].y);
    if is_not_monotonic(a, b, c) {
        if let Some(t) = valid_unit_divide(a - b, a - b - b + c) {
            let mut dst = chop_quad_at(src, t);
            // flatten the extrema so both halves are strictly monotonic
            dst[1].y = dst[2].y;
            dst[3].y = dst[2].y;
            return (dst, 1);
        }
        // underflow, force monotonic by pinning the control point
        b = if (a - b).abs() < (b - c).abs() { a } else { c };
    }
    let mut dst = [Point::default(); 5];
    dst[0] = Point::new(src[0].x, a);
    dst[1] = Point::new(src[1].x, b);
    dst[2] = Point::new(src[2].x, c);
    (dst, 0)
}

/// Split a cubic at `t`, producing two cubics sharing `dst[3]`
pub fn chop_cubic_at(src: &[Point; 4], t: f64) -> [Point; 7] {
    debug_assert!(t > 0.0 && t < 1.0);
    let ab = src[0].lerp(&src[1], t);
    let bc = src[1].lerp(&src[2], t);
    let cd = src[2].lerp(&src[3], t);
    let abc = ab.lerp(&bc, t);
    let bcd = bc.lerp(&cd, t);
    let abcd = abc.lerp(&bcd, t);
    [src[0], ab, abc, abcd, bcd, cd, src[3]]
}

/// Parameter values of the extrema of a cubic in one coordinate
///
/// Cubic'(t) = At^2 + Bt + C, with the coefficients divided by 3
pub fn find_cubic_extrema(a: f64, b: f64, c: f64, d: f64) -> ([f64; 2], usize) {
    let aa = d - a + 3.0 * (b - c);
    let bb = 2.0 * (a - b - b + c);
    let cc = b - a;
    find_unit_quad_roots(aa, bb, cc)
}

/// Chop a cubic so the pieces are monotonic in y
///
/// Returns the points and the number of chops (0, 1 or 2); cubic `i` uses
/// `dst[3*i ..= 3*i + 3]`.
pub fn chop_cubic_at_y_extrema(src: &[Point; 4]) -> ([Point; 10], usize) {
    let (t_values, roots) = find_cubic_extrema(src[0].y, src[1].y, src[2].y, src[3].y);
    let mut dst = [Point::default(); 10];
    dst[..4].copy_from_slice(src);
    let mut n = 0;
    let mut base = 0;
    let mut t_prev = 0.0;
    for &t in &t_values[..roots] {
        // renormalize t onto the remaining piece
        let rest = [dst[base], dst[base + 1], dst[base + 2], dst[base + 3]];
        match valid_unit_divide(t - t_prev, 1.0 - t_prev) {
            Some(local) => {
                let chopped = chop_cubic_at(&rest, local);
                dst[base..base + 7].copy_from_slice(&chopped);
            }
            None => {
                // degenerate remainder, collapse it onto the end point
                let end = rest[3];
                dst[base + 3] = end;
                dst[base + 4] = end;
                dst[base + 5] = end;
                dst[base + 6] = end;
            }
        }
        // flatten the extremum so neighbouring pieces are monotonic
        let y = dst[base + 3].y;
        dst[base + 2].y = y;
        dst[base + 4].y = y;
        base += 3;
        n += 1;
        t_prev = t;
    }
    (dst, n)
}

/// Evaluate a quadratic at `t`
pub fn eval_quad_at(src: &[Point; 3], t: f64) -> Point {
    let ab = src[0].lerp(&src[1], t);
    let bc = src[1].lerp(&src[2], t);
    ab.lerp(&bc, t)
}

/// Evaluate a cubic at `t`
pub fn eval_cubic_at(src: &[Point; 4], t: f64) -> Point {
    let ab = src[0].lerp(&src[1], t);
    let bc = src[1].lerp(&src[2], t);
    let cd = src[2].lerp(&src[3], t);
    let abc = ab.lerp(&bc, t);
    let bcd = bc.lerp(&cd, t);
    abc.lerp(&bcd, t)
}

fn hypot(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// Number of line segments needed so the chord error stays below `tolerance`
///
/// `deviation` is the maximum distance of the curve from its chord; the
/// error of `n` evenly spaced chords falls with `n^2`.
fn segment_count(deviation: f64, tolerance: f64) -> usize {
    let max = 1usize << MAX_SUBDIVIDE_LEVEL;
    if !(deviation > tolerance) || !(tolerance > 0.0) {
        return 1;
    }
    let n = (deviation / tolerance).sqrt().ceil();
    if n.is_finite() {
        (n as usize).clamp(1, max)
    } else {
        max
    }
}

/// Flatten a quadratic into points, excluding the start point
pub fn flatten_quad(src: &[Point; 3], tolerance: f64, out: &mut Vec<Point>) {
    let dx = src[0].x - 2.0 * src[1].x + src[2].x;
    let dy = src[0].y - 2.0 * src[1].y + src[2].y;
    let n = segment_count(hypot(dx, dy) / 4.0, tolerance);
    for i in 1..n {
        out.push(eval_quad_at(src, i as f64 / n as f64));
    }
    out.push(src[2]);
}

/// Flatten a cubic into points, excluding the start point
pub fn flatten_cubic(src: &[Point; 4], tolerance: f64, out: &mut Vec<Point>) {
    let d1 = hypot(src[0].x - 2.0 * src[1].x + src[2].x,
                   src[0].y - 2.0 * src[1].y + src[2].y);
    let d2 = hypot(src[1].x - 2.0 * src[2].x + src[3].x,
                   src[1].y - 2.0 * src[2].y + src[3].y);
    let n = segment_count(d1.max(d2) * 0.75, tolerance);
    for i in 1..n {
        out.push(eval_cubic_at(src, i as f64 / n as f64));
    }
    out.push(src[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monotonic(ys: &[f64]) -> bool {
        ys.windows(2).all(|w| w[0] <= w[1]) || ys.windows(2).all(|w| w[0] >= w[1])
    }

    #[test]
    fn quad_chopped_at_peak() {
        let q = [Point::new(0., 0.), Point::new(5., 10.), Point::new(10., 0.)];
        let (dst, n) = chop_quad_at_y_extrema(&q);
        assert_eq!(n, 1);
        assert_eq!(dst[2].y, 5.0);
        assert!(monotonic(&[dst[0].y, dst[1].y, dst[2].y]));
        assert!(monotonic(&[dst[2].y, dst[3].y, dst[4].y]));
    }

    #[test]
    fn s_cubic_has_two_extrema() {
        let c = [Point::new(0., 0.), Point::new(0., 20.),
                 Point::new(10., -10.), Point::new(10., 10.)];
        let (dst, n) = chop_cubic_at_y_extrema(&c);
        assert_eq!(n, 2);
        for i in 0..=n {
            let ys: Vec<f64> = dst[3 * i..3 * i + 4].iter().map(|p| p.y).collect();
            assert!(monotonic(&ys), "piece {} {:?}", i, ys);
        }
        assert_eq!(dst[9], c[3]);
    }

    #[test]
    fn flat_curve_is_one_line() {
        let q = [Point::new(0., 0.), Point::new(5., 5.), Point::new(10., 10.)];
        let mut out = vec![];
        flatten_quad(&q, 0.25, &mut out);
        assert_eq!(out, vec![Point::new(10., 10.)]);
    }
}
