//! Edge Builder
//!
//! Walks the verbs of a [Path] and turns every segment into edges. A path
//! made of a single closed contour of lines takes the polygon path: the
//! edge arena is sized up front and lines are converted directly. Anything
//! else goes through the [EdgeClipper], which also flattens curves.

use crate::clip::{clip_line, EdgeClipper, HorizontalClip, IntRect, Rect};
use crate::clip::MAX_CLIPPED_LINE_SEGMENTS;
use crate::config::RasterConfig;
use crate::edge::{Edge, EdgeList};
use crate::geometry::Point;
use crate::path_storage::{Path, PathCommand, Segment};

/// How the edge list was produced
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Single closed contour of lines, preallocated arena
    Polygon,
    /// Any path, growable arena fed by the edge clipper
    #[default]
    General,
}

/// Converts paths into sorted edge lists
#[derive(Debug, Clone)]
pub struct EdgeBuilder {
    edges: EdgeList,
    mode: BuildMode,
    horizontal_clip: HorizontalClip,
    allow_polygon_mode: bool,
    curve_tolerance: f64,
}

impl EdgeBuilder {
    /// Create a new builder using the clipping and flattening settings of
    /// `config`
    pub fn new(config: &RasterConfig) -> Self {
        Self {
            edges: EdgeList::new(),
            mode: BuildMode::General,
            horizontal_clip: config.horizontal_clip,
            allow_polygon_mode: config.allow_polygon_mode,
            curve_tolerance: config.curve_tolerance,
        }
    }

    /// Build the edges of `path`, returning the number of edges
    ///
    /// `clip` is in device pixels; edges are produced in a space scaled up
    /// by `2^shift_up`, so with a clip every edge covers only scanlines in
    /// `[clip.y1 << shift_up, clip.y2 << shift_up)`.
    ///
    ///     use edgefill::{EdgeBuilder, BuildMode, Path, RasterConfig};
    ///
    ///     let path = Path::polygon(&[(0., 0.), (10., 0.), (5., 10.)]);
    ///     let mut builder = EdgeBuilder::new(&RasterConfig::default());
    ///     assert_eq!(builder.build(&path, None, 0), 2);
    ///     assert_eq!(builder.mode(), BuildMode::Polygon);
    ///
    pub fn build(&mut self, path: &Path, clip: Option<&IntRect>, shift_up: u8) -> usize {
        self.edges.clear();
        if !path.is_finite() {
            log::warn!("EDGE BUILDER: path has non-finite coordinates, nothing to fill");
            self.mode = BuildMode::General;
            return 0;
        }
        let clip = clip.map(|c| c.to_rect());
        let polygon = if self.allow_polygon_mode { polygon_points(path) } else { None };
        match polygon {
            Some(pts) => {
                self.mode = BuildMode::Polygon;
                self.build_poly(&pts, clip.as_ref(), shift_up);
            }
            None => {
                self.mode = BuildMode::General;
                self.build_general(path, clip, shift_up);
            }
        }
        self.edges.sort();
        log::debug!("EDGE BUILDER: {:?} mode, {} edges, shift {}",
                    self.mode, self.edges.len(), shift_up);
        self.edges.len()
    }

    fn build_poly(&mut self, pts: &[Point], clip: Option<&Rect>, shift_up: u8) {
        let n = pts.len();
        let capacity = if clip.is_some() { n * MAX_CLIPPED_LINE_SEGMENTS } else { n };
        self.edges = EdgeList::with_capacity(capacity);
        let mut out = [[Point::default(); 2]; MAX_CLIPPED_LINE_SEGMENTS];
        for i in 0..n {
            let (p0, p1) = (pts[i], pts[(i + 1) % n]);
            match clip {
                None => self.push_line(p0, p1, shift_up),
                Some(clip) => {
                    let k = clip_line(p0, p1, clip, self.horizontal_clip, &mut out);
                    for seg in &out[..k] {
                        self.push_line(seg[0], seg[1], shift_up);
                    }
                }
            }
        }
        debug_assert!(self.edges.len() <= capacity);
    }

    fn build_general(&mut self, path: &Path, clip: Option<Rect>, shift_up: u8) {
        let tolerance = self.curve_tolerance / f64::from(1u32 << shift_up);
        let mut clipper = EdgeClipper::new(clip, self.horizontal_clip, tolerance);
        let mut start = Point::default();
        let mut last = Point::default();
        let mut open = false;
        for seg in path.segments() {
            match seg {
                Segment::MoveTo(p) => {
                    if open {
                        clipper.clip_line(last, start);
                        self.drain(&mut clipper, shift_up);
                    }
                    start = p;
                    last = p;
                    open = false;
                    continue;
                }
                Segment::Line([a, b]) => {
                    clipper.clip_line(a, b);
                    last = b;
                    open = true;
                }
                Segment::Quad(q) => {
                    clipper.clip_quad(q);
                    last = q[2];
                    open = true;
                }
                Segment::Cubic(c) => {
                    clipper.clip_cubic(c);
                    last = c[3];
                    open = true;
                }
                Segment::Close([a, b]) => {
                    clipper.clip_line(a, b);
                    last = b;
                    open = false;
                }
            }
            self.drain(&mut clipper, shift_up);
        }
        // Fills implicitly close open contours
        if open {
            clipper.clip_line(last, start);
            self.drain(&mut clipper, shift_up);
        }
    }

    fn drain(&mut self, clipper: &mut EdgeClipper, shift_up: u8) {
        for [p0, p1] in clipper.by_ref() {
            self.push_line(p0, p1, shift_up);
        }
    }

    fn push_line(&mut self, p0: Point, p1: Point, shift_up: u8) {
        if let Some(edge) = Edge::from_line(p0, p1, shift_up) {
            log::trace!("EDGE: y {}..={} x {} dx {} w {}",
                        edge.first_y, edge.last_y, edge.x, edge.dx, edge.winding);
            self.edges.push(edge);
        }
    }

    /// Edges of the last build, sorted by `first_y`
    pub fn edge_list(&self) -> &EdgeList {
        &self.edges
    }
    /// Take the edges of the last build
    pub fn into_edge_list(self) -> EdgeList {
        self.edges
    }
    /// Mode used by the last build
    pub fn mode(&self) -> BuildMode {
        self.mode
    }
}

/// Mode [EdgeBuilder::build] picks for `path` when polygon mode is allowed
pub fn classify(path: &Path) -> BuildMode {
    match polygon_points(path) {
        Some(_) => BuildMode::Polygon,
        None => BuildMode::General,
    }
}

/// Vertices of `path` if it qualifies for polygon mode
///
/// The path must be one contour of lines with at least three distinct
/// vertices whose outline changes vertical direction at most twice. That
/// structural check keeps out the obviously self-overlapping outlines
/// without an intersection test.
fn polygon_points(path: &Path) -> Option<Vec<Point>> {
    let (first, rest) = path.vertices.split_first()?;
    if first.cmd != PathCommand::MoveTo {
        return None;
    }
    let mut pts = vec![first.point()];
    for (i, v) in rest.iter().enumerate() {
        match v.cmd {
            PathCommand::LineTo => {
                let p = v.point();
                if pts.last() != Some(&p) {
                    pts.push(p);
                }
            }
            PathCommand::Close if i == rest.len() - 1 => {}
            _ => return None,
        }
    }
    while pts.len() > 1 && pts.last() == pts.first() {
        pts.pop();
    }
    if pts.len() < 3 || y_direction_changes(&pts) > 2 {
        return None;
    }
    Some(pts)
}

/// Number of times the closed outline switches between going down and up
fn y_direction_changes(pts: &[Point]) -> usize {
    let n = pts.len();
    let signs: Vec<bool> = (0..n)
        .map(|i| pts[(i + 1) % n].y - pts[i].y)
        .filter(|dy| *dy != 0.0)
        .map(|dy| dy > 0.0)
        .collect();
    if signs.is_empty() {
        return 0;
    }
    (0..signs.len())
        .filter(|&i| signs[i] != signs[(i + 1) % signs.len()])
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_is_not_a_polygon() {
        let star = Path::polygon(&[(50., 0.), (61., 35.), (98., 35.), (68., 57.),
                                   (79., 91.), (50., 70.), (21., 91.), (32., 57.),
                                   (2., 35.), (39., 35.)]);
        assert_eq!(classify(&star), BuildMode::General);
        assert_eq!(classify(&Path::rect(0., 0., 4., 4.)), BuildMode::Polygon);
    }

    #[test]
    fn two_contours_are_general() {
        let mut path = Path::rect(0., 0., 4., 4.);
        path.move_to(10., 10.);
        path.line_to(20., 10.);
        path.line_to(15., 20.);
        assert_eq!(classify(&path), BuildMode::General);
    }
}
