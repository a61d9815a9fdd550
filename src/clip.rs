//! Clipping Region
//!
//! Segments are clipped against a rectangle before they become edges.
//! Top and bottom are always clipped exactly, by re-parameterizing the
//! segment at the boundary. Left and right handling is selected by
//! [HorizontalClip].

use crate::geometry::{self, Point};

/// Rectangle
///
/// For integer rectangles `x2` and `y2` are exclusive, so a rectangle of
/// `(0,0,10,10)` covers 100 pixels.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}

/// Integer rectangle in device pixels
pub type IntRect = Rectangle<i32>;
/// Floating point rectangle in path space
pub type Rect = Rectangle<f64>;

impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        Self { x1, y1, x2, y2 }
    }
    /// Get location of point relative to rectangle
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [BOTTOM](constant.BOTTOM.html)
    /// - [TOP](constant.TOP.html)
    ///
    pub fn clip_flags(&self, x: T, y: T) -> u8 {
        clip_flags(&x, &y, &self.x1, &self.y1, &self.x2, &self.y2)
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
    /// Rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        !(self.x1 < self.x2 && self.y1 < self.y2)
    }
    /// Overlap of two rectangles, `None` if they do not overlap
    pub fn intersect(&self, r: &Rectangle<T>) -> Option<Rectangle<T>> {
        let pick_max = |a: T, b: T| if a > b { a } else { b };
        let pick_min = |a: T, b: T| if a < b { a } else { b };
        let out = Rectangle {
            x1: pick_max(self.x1, r.x1),
            y1: pick_max(self.y1, r.y1),
            x2: pick_min(self.x2, r.x2),
            y2: pick_min(self.y2, r.y2),
        };
        if out.is_empty() { None } else { Some(out) }
    }
}

impl IntRect {
    /// Rectangle from origin and size
    pub fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x, y, x + w, y + h)
    }
    /// Width in pixels, saturating at `i32::MAX`
    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }
    /// Height in pixels, saturating at `i32::MAX`
    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }
    /// Pixel (x,y) lies inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }
    /// Grow by `dx` and `dy` on each side, saturating at the i32 range
    pub fn outset(&self, dx: i32, dy: i32) -> Self {
        Self { x1: self.x1.saturating_sub(dx), y1: self.y1.saturating_sub(dy),
               x2: self.x2.saturating_add(dx), y2: self.y2.saturating_add(dy) }
    }
    /// Move by `dx` and `dy`
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self { x1: self.x1 + dx, y1: self.y1 + dy, x2: self.x2 + dx, y2: self.y2 + dy }
    }
    /// Same rectangle in path space
    pub fn to_rect(&self) -> Rect {
        Rect::new(f64::from(self.x1), f64::from(self.y1),
                  f64::from(self.x2), f64::from(self.y2))
    }
}

impl Rect {
    /// Smallest integer rectangle containing this rectangle
    pub fn round_out(&self) -> IntRect {
        IntRect::new(self.x1.floor() as i32, self.y1.floor() as i32,
                     self.x2.ceil() as i32, self.y2.ceil() as i32)
    }
}

/// Inside Region
///
/// See https://en.wikipedia.org/wiki/Liang-Barsky_algorithm
/// See https://en.wikipedia.org/wiki/Cyrus-Beck_algorithm
pub const INSIDE : u8 = 0b0000;
/// Left of Region
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region
pub const RIGHT  : u8 = 0b0000_0010;
/// Above Region, smaller y
pub const TOP    : u8 = 0b0000_0100;
/// Below Region, larger y
pub const BOTTOM : u8 = 0b0000_1000;

/// Determine the location of a point to a broken-down rectangle or range
fn clip_flags<T: std::cmp::PartialOrd>(x: &T, y: &T, x1: &T, y1: &T, x2: &T, y2: &T) -> u8 {
    let mut code = INSIDE;
    if x < x1 { code |= LEFT; }
    if x > x2 { code |= RIGHT; }
    if y < y1 { code |= TOP; }
    if y > y2 { code |= BOTTOM; }
    code
}

/// Left and right clipping behaviour
///
/// Vertical clipping is always exact.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HorizontalClip {
    /// Clamp x of the vertically clipped segment into the clip
    ///
    /// This is an approximation: a segment crossing the left or right
    /// boundary is bent, not split, so coverage next to the boundary is
    /// not exact. Pixels far from the crossing are unaffected.
    #[default]
    Clamp,
    /// Split at the boundary crossing, parts outside become vertical
    /// segments on the boundary so winding is preserved
    Exact,
}

/// Maximum number of lines [clip_line] may produce from one segment
pub const MAX_CLIPPED_LINE_SEGMENTS: usize = 3;

/// x coordinate of the line (p0,p1) at `y`, p0.y != p1.y
fn x_at_y(p0: &Point, p1: &Point, y: f64) -> f64 {
    if y == p0.y {
        return p0.x;
    }
    if y == p1.y {
        return p1.x;
    }
    p0.x + (y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y)
}

/// y coordinate of the line (p0,p1) at `x`, p0.x != p1.x
fn y_at_x(p0: &Point, p1: &Point, x: f64) -> f64 {
    p0.y + (x - p0.x) * (p1.y - p0.y) / (p1.x - p0.x)
}

/// Clip the line `p0` to `p1` against `clip`
///
/// Resulting lines are written to `out` in the direction of the input and
/// their number is returned. Lines entirely above or below the clip and
/// horizontal lines produce nothing.
pub fn clip_line(p0: Point, p1: Point, clip: &Rect, mode: HorizontalClip,
                 out: &mut [[Point; 2]; MAX_CLIPPED_LINE_SEGMENTS]) -> usize {
    if p0.y == p1.y {
        return 0;
    }
    let reverse = p0.y > p1.y;
    let (a, b) = if reverse { (p1, p0) } else { (p0, p1) };

    // Both points above or below clip box
    if b.y <= clip.y1 || a.y >= clip.y2 {
        return 0;
    }
    let top = if a.y < clip.y1 { Point::new(x_at_y(&a, &b, clip.y1), clip.y1) } else { a };
    let bot = if b.y > clip.y2 { Point::new(x_at_y(&a, &b, clip.y2), clip.y2) } else { b };

    let n = match mode {
        HorizontalClip::Clamp => {
            out[0] = [Point::new(top.x.max(clip.x1).min(clip.x2), top.y),
                      Point::new(bot.x.max(clip.x1).min(clip.x2), bot.y)];
            1
        }
        HorizontalClip::Exact => split_at_sides(&a, &b, top, bot, clip, out),
    };
    if reverse {
        out[..n].reverse();
        for seg in out[..n].iter_mut() {
            seg.swap(0, 1);
        }
    }
    n
}

/// Split a y-sorted, vertically clipped line where it crosses the sides
fn split_at_sides(a: &Point, b: &Point, top: Point, bot: Point, clip: &Rect,
                  out: &mut [[Point; 2]; MAX_CLIPPED_LINE_SEGMENTS]) -> usize {
    let f1 = clip.clip_flags(top.x, top.y) & (LEFT | RIGHT);
    let f2 = clip.clip_flags(bot.x, bot.y) & (LEFT | RIGHT);
    match (f1, f2) {
        (INSIDE, INSIDE) => {
            out[0] = [top, bot];
            return 1;
        }
        (LEFT, LEFT) => {
            out[0] = [Point::new(clip.x1, top.y), Point::new(clip.x1, bot.y)];
            return 1;
        }
        (RIGHT, RIGHT) => {
            out[0] = [Point::new(clip.x2, top.y), Point::new(clip.x2, bot.y)];
            return 1;
        }
        _ => {}
    }
    // Crossing points, in increasing y
    let mut ys = [top.y, 0.0, 0.0, bot.y];
    let mut n = 1;
    for &side in &[clip.x1, clip.x2] {
        let (lo, hi) = if top.x < bot.x { (top.x, bot.x) } else { (bot.x, top.x) };
        if side > lo && side < hi {
            let y = y_at_x(a, b, side).max(top.y).min(bot.y);
            ys[n] = y;
            n += 1;
        }
    }
    ys[n] = bot.y;
    ys[1..n].sort_by(|p, q| p.total_cmp(q));

    let mut count = 0;
    for w in ys[..=n].windows(2) {
        let (ya, yb) = (w[0], w[1]);
        if ya == yb {
            continue;
        }
        let xm = x_at_y(a, b, (ya + yb) * 0.5);
        let seg = if xm < clip.x1 {
            [Point::new(clip.x1, ya), Point::new(clip.x1, yb)]
        } else if xm > clip.x2 {
            [Point::new(clip.x2, ya), Point::new(clip.x2, yb)]
        } else {
            let xa = x_at_y(a, b, ya).max(clip.x1).min(clip.x2);
            let xb = x_at_y(a, b, yb).max(clip.x1).min(clip.x2);
            [Point::new(xa, ya), Point::new(xb, yb)]
        };
        out[count] = seg;
        count += 1;
    }
    count
}

/// Edge Clipper
///
/// Restarted once per path segment with one of the `clip_*` methods, then
/// pulled as an iterator until exhausted. Curves are chopped at their y
/// extrema and flattened before clipping, so every produced segment is a
/// monotonic line.
///
///     use edgefill::{EdgeClipper, HorizontalClip, Point, Rect};
///
///     let clip = Rect::new(0., 10., 100., 20.);
///     let mut clipper = EdgeClipper::new(Some(clip), HorizontalClip::Clamp, 0.25);
///     // vertical line entirely above the clip
///     clipper.clip_line(Point::new(5., 0.), Point::new(5., 8.));
///     assert_eq!(clipper.next(), None);
///
#[derive(Debug, Clone)]
pub struct EdgeClipper {
    /// Rectangle to clip on, `None` disables clipping
    clip: Option<Rect>,
    /// Left and right handling
    mode: HorizontalClip,
    /// Maximum flattening error in path units
    tolerance: f64,
    /// Segments produced for the current path segment
    segments: Vec<[Point; 2]>,
    /// Next segment to hand out
    cursor: usize,
    /// Scratch space for flattened points
    points: Vec<Point>,
}

impl EdgeClipper {
    /// Create a new clipper
    pub fn new(clip: Option<Rect>, mode: HorizontalClip, tolerance: f64) -> Self {
        Self { clip, mode, tolerance,
               segments: Vec::new(), cursor: 0, points: Vec::new() }
    }
    fn restart(&mut self) {
        self.segments.clear();
        self.cursor = 0;
    }
    /// Number of segments not yet pulled
    pub fn remaining(&self) -> usize {
        self.segments.len() - self.cursor
    }
    fn push_line(&mut self, p0: Point, p1: Point) {
        if p0.y == p1.y {
            return;
        }
        match self.clip {
            None => self.segments.push([p0, p1]),
            Some(ref clip) => {
                let mut out = [[Point::default(); 2]; MAX_CLIPPED_LINE_SEGMENTS];
                let n = clip_line(p0, p1, clip, self.mode, &mut out);
                self.segments.extend_from_slice(&out[..n]);
            }
        }
    }
    /// Monotonic piece lies entirely above or below the clip
    fn rejects(&self, pts: &[Point]) -> bool {
        match self.clip {
            None => false,
            Some(ref clip) => {
                let first = pts[0].y;
                let last = pts[pts.len() - 1].y;
                let (lo, hi) = if first < last { (first, last) } else { (last, first) };
                hi <= clip.y1 || lo >= clip.y2
            }
        }
    }
    fn push_points(&mut self, start: Point) {
        let points = std::mem::take(&mut self.points);
        let mut prev = start;
        for &p in &points {
            self.push_line(prev, p);
            prev = p;
        }
        self.points = points;
    }
    /// Restart the clipper with a line
    pub fn clip_line(&mut self, p0: Point, p1: Point) {
        self.restart();
        self.push_line(p0, p1);
    }
    /// Restart the clipper with a quadratic curve
    pub fn clip_quad(&mut self, pts: [Point; 3]) {
        self.restart();
        let (dst, n) = geometry::chop_quad_at_y_extrema(&pts);
        for i in 0..=n {
            let quad = [dst[2 * i], dst[2 * i + 1], dst[2 * i + 2]];
            if self.rejects(&quad) {
                continue;
            }
            self.points.clear();
            geometry::flatten_quad(&quad, self.tolerance, &mut self.points);
            self.push_points(quad[0]);
        }
        log::trace!("CLIP QUAD: {} segments", self.segments.len());
    }
    /// Restart the clipper with a cubic curve
    pub fn clip_cubic(&mut self, pts: [Point; 4]) {
        self.restart();
        let (dst, n) = geometry::chop_cubic_at_y_extrema(&pts);
        for i in 0..=n {
            let cubic = [dst[3 * i], dst[3 * i + 1], dst[3 * i + 2], dst[3 * i + 3]];
            if self.rejects(&cubic) {
                continue;
            }
            self.points.clear();
            geometry::flatten_cubic(&cubic, self.tolerance, &mut self.points);
            self.push_points(cubic[0]);
        }
        log::trace!("CLIP CUBIC: {} segments", self.segments.len());
    }
}

impl Iterator for EdgeClipper {
    type Item = [Point; 2];
    fn next(&mut self) -> Option<[Point; 2]> {
        let seg = self.segments.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(seg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_rect() -> Rect {
        Rect::new(0., 0., 10., 10.)
    }

    #[test]
    fn exact_split_preserves_direction() {
        let mut out = [[Point::default(); 2]; MAX_CLIPPED_LINE_SEGMENTS];
        // upwards line crossing both sides
        let n = clip_line(Point::new(15., 9.), Point::new(-5., 1.),
                          &clip_rect(), HorizontalClip::Exact, &mut out);
        assert_eq!(n, 3);
        for seg in &out[..n] {
            assert!(seg[0].y > seg[1].y);
        }
        assert_eq!(out[0][0], Point::new(10., 9.));
        assert_eq!(out[2][1], Point::new(0., 1.));
        // consecutive pieces join up
        assert_eq!(out[0][1], out[1][0]);
        assert_eq!(out[1][1], out[2][0]);
    }

    #[test]
    fn clamp_bends_crossing_line() {
        let mut out = [[Point::default(); 2]; MAX_CLIPPED_LINE_SEGMENTS];
        let n = clip_line(Point::new(-10., 0.), Point::new(10., 10.),
                          &clip_rect(), HorizontalClip::Clamp, &mut out);
        assert_eq!(n, 1);
        assert_eq!(out[0], [Point::new(0., 0.), Point::new(10., 10.)]);
    }

    #[test]
    fn rectangle_intersection() {
        let a = IntRect::new(0, 0, 10, 10);
        let b = IntRect::new(5, 5, 20, 20);
        assert_eq!(a.intersect(&b), Some(IntRect::new(5, 5, 10, 10)));
        assert_eq!(a.intersect(&IntRect::new(10, 0, 20, 10)), None);
    }
}
