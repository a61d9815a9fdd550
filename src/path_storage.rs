//! Path Storage

use crate::clip::Rect;
use crate::geometry::Point;
use crate::transform::Transform;

/// Path Commands
///
/// Curves store one vertex per point after the current point, each tagged
/// with the curve command: two for [PathCommand::QuadTo], three for
/// [PathCommand::CubicTo].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PathCommand {
    #[default]
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
    Close,
}

/// Single point of a path and the command that produced it
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vertex<T> {
    pub x: T,
    pub y: T,
    pub cmd: PathCommand,
}

impl Vertex<f64> {
    pub fn new(x: f64, y: f64, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::new(x, y, PathCommand::MoveTo)
    }
    pub fn line_to(x: f64, y: f64) -> Self {
        Self::new(x, y, PathCommand::LineTo)
    }
    pub fn close_polygon(x: f64, y: f64) -> Self {
        Self::new(x, y, PathCommand::Close)
    }
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Path segment produced by [Path::segments]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    /// Start of a new contour
    MoveTo(Point),
    Line([Point; 2]),
    Quad([Point; 3]),
    Cubic([Point; 4]),
    /// Close the contour; from the last point back to the contour start
    Close([Point; 2]),
}

/// Vector path of lines, quadratic and cubic curves
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    pub vertices: Vec<Vertex<f64>>,
}

impl Path {
    pub fn new() -> Self {
        Self { vertices: vec![] }
    }
    pub fn remove_all(&mut self) {
        self.vertices.clear();
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push(Vertex::move_to(x, y));
    }
    /// Line from the current point; starts a contour at (0,0) if needed
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.inject_move_to();
        self.vertices.push(Vertex::line_to(x, y));
    }
    /// Quadratic curve with control point (x1,y1) ending at (x2,y2)
    pub fn quad_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.inject_move_to();
        self.vertices.push(Vertex::new(x1, y1, PathCommand::QuadTo));
        self.vertices.push(Vertex::new(x2, y2, PathCommand::QuadTo));
    }
    /// Cubic curve with control points (x1,y1), (x2,y2) ending at (x3,y3)
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.inject_move_to();
        self.vertices.push(Vertex::new(x1, y1, PathCommand::CubicTo));
        self.vertices.push(Vertex::new(x2, y2, PathCommand::CubicTo));
        self.vertices.push(Vertex::new(x3, y3, PathCommand::CubicTo));
    }
    /// Close the current contour
    pub fn close_polygon(&mut self) {
        if let Some(last) = self.vertices.last().copied() {
            if last.cmd != PathCommand::Close && last.cmd != PathCommand::MoveTo {
                self.vertices.push(Vertex::close_polygon(last.x, last.y));
            }
        }
    }
    fn inject_move_to(&mut self) {
        match self.vertices.last() {
            None => self.move_to(0.0, 0.0),
            Some(v) if v.cmd == PathCommand::Close => {
                let start = self.contour_start();
                self.move_to(start.x, start.y);
            }
            _ => {}
        }
    }
    fn contour_start(&self) -> Point {
        self.vertices.iter().rev()
            .find(|v| v.cmd == PathCommand::MoveTo)
            .map(|v| v.point())
            .unwrap_or_default()
    }
    /// Rectangle as a closed contour, clockwise in y-down space
    pub fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let mut path = Path::new();
        path.move_to(x1, y1);
        path.line_to(x2, y1);
        path.line_to(x2, y2);
        path.line_to(x1, y2);
        path.close_polygon();
        path
    }
    /// Closed polygon through `pts`
    pub fn polygon(pts: &[(f64, f64)]) -> Self {
        let mut path = Path::new();
        if let Some((&(x, y), rest)) = pts.split_first() {
            path.move_to(x, y);
            for &(x, y) in rest {
                path.line_to(x, y);
            }
            path.close_polygon();
        }
        path
    }
    /// Iterate over the segments of the path
    pub fn segments(&self) -> Segments<'_> {
        Segments { vertices: &self.vertices, index: 0,
                   last: Point::default(), start: Point::default() }
    }
    /// All coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|v| v.x.is_finite() && v.y.is_finite())
    }
    /// Bounds of all points, including curve control points
    pub fn bounds(&self) -> Option<Rect> {
        bounding_rect(self)
    }
    /// Apply a transform to every point
    pub fn transform(&self, m: &Transform) -> Path {
        let vertices = self.vertices.iter()
            .map(|v| {
                let (x, y) = m.transform(v.x, v.y);
                Vertex::new(x, y, v.cmd)
            })
            .collect();
        Path { vertices }
    }
    /// Orientation of the first contour, treated as a polygon
    pub fn orientation(&self) -> Option<PathOrientation> {
        let end = self.vertices.iter().skip(1)
            .position(|v| v.cmd == PathCommand::MoveTo)
            .map(|i| i + 1)
            .unwrap_or(self.vertices.len());
        if end < 3 {
            return None;
        }
        Some(perceive_polygon_orientation(&self.vertices[..end]))
    }
}

/// Iterator over [Segment]s
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    vertices: &'a [Vertex<f64>],
    index: usize,
    last: Point,
    start: Point,
}

impl Segments<'_> {
    fn take_points<const N: usize>(&mut self, cmd: PathCommand) -> Option<[Point; N]> {
        let mut pts = [self.last; N];
        for p in pts.iter_mut().skip(1) {
            let v = self.vertices.get(self.index)?;
            if v.cmd != cmd {
                return None;
            }
            *p = v.point();
            self.index += 1;
        }
        Some(pts)
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;
    fn next(&mut self) -> Option<Segment> {
        let v = *self.vertices.get(self.index)?;
        let seg = match v.cmd {
            PathCommand::MoveTo => {
                self.index += 1;
                self.start = v.point();
                Segment::MoveTo(self.start)
            }
            PathCommand::LineTo => {
                self.index += 1;
                Segment::Line([self.last, v.point()])
            }
            PathCommand::QuadTo => Segment::Quad(self.take_points::<3>(PathCommand::QuadTo)?),
            PathCommand::CubicTo => Segment::Cubic(self.take_points::<4>(PathCommand::CubicTo)?),
            PathCommand::Close => {
                self.index += 1;
                let seg = Segment::Close([self.last, self.start]);
                self.last = self.start;
                return Some(seg);
            }
        };
        self.last = match seg {
            Segment::MoveTo(p) => p,
            Segment::Line(p) => p[1],
            Segment::Quad(p) => p[2],
            Segment::Cubic(p) => p[3],
            Segment::Close(p) => p[1],
        };
        Some(seg)
    }
}

/// Polygon Orientation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathOrientation {
    Clockwise,
    CounterClockwise,
}

/// Signed area of a polygon, positive for clockwise in y-down space
pub fn signed_area(vertices: &[Vertex<f64>]) -> f64 {
    let n = vertices.len();
    if n == 0 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];
        area += p1.x * p2.y - p1.y * p2.x;
    }
    area / 2.0
}

pub fn perceive_polygon_orientation(vertices: &[Vertex<f64>]) -> PathOrientation {
    if signed_area(vertices) < 0.0 {
        PathOrientation::CounterClockwise
    } else {
        PathOrientation::Clockwise
    }
}

pub fn bounding_rect(path: &Path) -> Option<Rect> {
    let (first, rest) = path.vertices.split_first()?;
    let mut r = Rect::new(first.x, first.y, first.x, first.y);
    for p in rest {
        r.expand(p.x, p.y);
    }
    Some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_of_mixed_path() {
        let mut path = Path::new();
        path.move_to(0., 0.);
        path.line_to(10., 0.);
        path.quad_to(20., 5., 10., 10.);
        path.cubic_to(8., 12., 2., 12., 0., 10.);
        path.close_polygon();
        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[2], Segment::Quad([Point::new(10., 0.), Point::new(20., 5.),
                                           Point::new(10., 10.)]));
        assert_eq!(segs[4], Segment::Close([Point::new(0., 10.), Point::new(0., 0.)]));
    }

    #[test]
    fn rect_orientation() {
        assert_eq!(Path::rect(0., 0., 10., 10.).orientation(), Some(PathOrientation::Clockwise));
        let ccw = Path::polygon(&[(0., 0.), (0., 10.), (10., 10.), (10., 0.)]);
        assert_eq!(ccw.orientation(), Some(PathOrientation::CounterClockwise));
    }
}
