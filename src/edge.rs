//! Edges
//!
//! An edge is one y-monotonic line segment of a flattened path. Edges are
//! stored in an arena owned by an [EdgeList] and referenced by [EdgeId].

use crate::fdot6::*;
use crate::geometry::Point;

/// A y-monotonic line segment ready for scan conversion
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    /// x at the center of scanline `first_y`, 16.16
    pub x: Fixed,
    /// Change in x per scanline, 16.16
    pub dx: Fixed,
    /// First scanline covered, inclusive
    pub first_y: i32,
    /// Last scanline covered, inclusive
    pub last_y: i32,
    /// +1 if the source segment went down, -1 if it went up
    pub winding: i8,
}

impl Edge {
    /// Create an edge from a line segment
    ///
    /// Coordinates are converted to [FDot6] after being scaled up by
    /// `2^shift`. Segments that do not cross a scanline center have zero
    /// height and produce `None`.
    ///
    ///     use edgefill::{Edge, Point};
    ///
    ///     let e = Edge::from_line(Point::new(0., 0.), Point::new(0., 10.), 0).unwrap();
    ///     assert_eq!((e.first_y, e.last_y, e.winding), (0, 9, 1));
    ///     assert!(Edge::from_line(Point::new(0., 3.), Point::new(9., 3.), 0).is_none());
    ///
    pub fn from_line(p0: Point, p1: Point, shift: u8) -> Option<Edge> {
        let x0 = scalar_to_fdot6(p0.x, shift);
        let y0 = scalar_to_fdot6(p0.y, shift);
        let x1 = scalar_to_fdot6(p1.x, shift);
        let y1 = scalar_to_fdot6(p1.y, shift);
        Edge::from_fdot6(x0, y0, x1, y1)
    }

    /// Create an edge from [FDot6] end points
    pub fn from_fdot6(x0: FDot6, y0: FDot6, x1: FDot6, y1: FDot6) -> Option<Edge> {
        let (x0, y0, x1, y1, winding) = if y0 > y1 {
            (x1, y1, x0, y0, -1)
        } else {
            (x0, y0, x1, y1, 1)
        };
        let top = fdot6_round(y0);
        let bot = fdot6_round(y1);
        // Zero height, does not cross any scanline center
        if top == bot {
            return None;
        }
        let slope = fdot6_div(x1 - x0, y1 - y0).ok()?;
        // Distance from y0 to the center of the first scanline
        let dy = (top << FDOT6_SHIFT) + FDOT6_HALF - y0;
        Some(Edge {
            x: fdot6_to_fixed(x0 + fixed_mul(slope, dy)),
            dx: slope,
            first_y: top,
            last_y: bot - 1,
            winding,
        })
    }
    /// Top of the covered range in [FDot6]
    pub fn top_fdot6(&self) -> FDot6 {
        self.first_y << FDOT6_SHIFT
    }
    /// Bottom of the covered range in [FDot6], exclusive
    pub fn bottom_fdot6(&self) -> FDot6 {
        (self.last_y + 1) << FDOT6_SHIFT
    }
    /// x of the edge at scanline `y`, 16.16
    pub fn x_at(&self, y: i32) -> Fixed {
        debug_assert!(y >= self.first_y && y <= self.last_y);
        self.x.wrapping_add(self.dx.wrapping_mul(y - self.first_y))
    }
}

/// Index of an [Edge] inside its [EdgeList]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Position in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Edges of a path, ordered by `first_y`
///
/// Edges live in a contiguous arena; the list itself is a vector of ids
/// into that arena. Ids are only meaningful for the list that produced
/// them.
#[derive(Debug, Default, Clone)]
pub struct EdgeList {
    arena: Vec<Edge>,
    order: Vec<EdgeId>,
}

impl EdgeList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }
    /// Create an empty list with room for `n` edges
    pub fn with_capacity(n: usize) -> Self {
        Self { arena: Vec::with_capacity(n), order: Vec::with_capacity(n) }
    }
    /// Remove all edges, keeping the allocation
    pub fn clear(&mut self) {
        self.arena.clear();
        self.order.clear();
    }
    /// Add an edge, returning its id
    pub fn push(&mut self, edge: Edge) -> EdgeId {
        debug_assert!(edge.first_y <= edge.last_y);
        let id = EdgeId(self.arena.len() as u32);
        self.arena.push(edge);
        self.order.push(id);
        id
    }
    /// Stable sort by `first_y`
    pub fn sort(&mut self) {
        let arena = &self.arena;
        self.order.sort_by_key(|id| arena[id.index()].first_y);
    }
    /// Number of edges
    pub fn len(&self) -> usize {
        self.order.len()
    }
    /// List has no edges
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// Allocated edge slots
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }
    /// Ids in scan order
    pub fn ids(&self) -> &[EdgeId] {
        &self.order
    }
    /// Edge for an id
    pub fn get(&self, id: EdgeId) -> &Edge {
        &self.arena[id.index()]
    }
    /// Edges in scan order
    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.order.iter().map(move |id| &self.arena[id.index()])
    }
    /// Smallest `first_y` and largest `last_y`, `None` when empty
    pub fn y_range(&self) -> Option<(i32, i32)> {
        let first = self.arena.iter().map(|e| e.first_y).min()?;
        let last = self.arena.iter().map(|e| e.last_y).max()?;
        Some((first, last))
    }
}
