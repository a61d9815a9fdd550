//! Scan Converter
//!
//! Walks an [EdgeList] one scanline at a time, keeping the edges that cross
//! the current row in an active edge table ordered by x. The fill rule turns
//! the running winding count into horizontal spans that are handed to a
//! [Blitter], either directly or through a [SuperSampler] that accumulates
//! coverage for anti-aliasing.

use crate::blitter::{blit_coverage_row, Blitter};
use crate::clip::IntRect;
use crate::config::RasterConfig;
use crate::edge::{EdgeId, EdgeList};
use crate::edge_builder::EdgeBuilder;
use crate::fdot6::*;
use crate::path_storage::Path;
use crate::scan::Scanline;

/// Winding rule that decides which spans are inside
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum FillingRule {
    #[default]
    NonZero,
    EvenOdd,
    /// Everything outside the [FillingRule::NonZero] area
    InverseNonZero,
    /// Everything outside the [FillingRule::EvenOdd] area
    InverseEvenOdd,
}

impl FillingRule {
    /// Rule fills the outside of the path
    pub fn is_inverse(&self) -> bool {
        matches!(self, FillingRule::InverseNonZero | FillingRule::InverseEvenOdd)
    }
    /// Winding count is inside the path, ignoring inversion
    pub fn inside(&self, winding: i32) -> bool {
        match self {
            FillingRule::NonZero | FillingRule::InverseNonZero => winding != 0,
            FillingRule::EvenOdd | FillingRule::InverseEvenOdd => winding & 1 != 0,
        }
    }
}

/// Progress of a [ScanConverter]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ScanState {
    /// No scanline has been stepped to yet
    BeforeFirstEdge,
    /// Edges are active or still waiting to become active
    Active,
    /// Every edge has been inserted and removed again
    Exhausted,
}

/// Entry of the active edge table
#[derive(Debug, Copy, Clone)]
struct ActiveEdge {
    id: EdgeId,
    x: Fixed,
    dx: Fixed,
    last_y: i32,
    winding: i8,
}

/// Scanline walker over a sorted [EdgeList]
#[derive(Debug)]
pub struct ScanConverter<'a> {
    edges: &'a EdgeList,
    rule: FillingRule,
    bounds: Option<IntRect>,
    /// Next edge in `edges.ids()` to become active
    next: usize,
    active: Vec<ActiveEdge>,
    y: Option<i32>,
    state: ScanState,
    spans: Vec<(i32, i32)>,
}

impl<'a> ScanConverter<'a> {
    /// Create a converter over `edges`, which must be sorted by `first_y`
    pub fn new(edges: &'a EdgeList, rule: FillingRule) -> Self {
        Self {
            edges, rule,
            bounds: None,
            next: 0,
            active: vec![],
            y: None,
            state: ScanState::BeforeFirstEdge,
            spans: vec![],
        }
    }
    /// Limit spans to `bounds`
    ///
    /// Inverse fill rules need bounds; they cover every row of `bounds`,
    /// including rows no edge reaches.
    pub fn with_bounds(mut self, bounds: IntRect) -> Self {
        self.bounds = Some(bounds);
        self
    }
    pub fn state(&self) -> ScanState {
        self.state
    }
    /// Current scanline, `None` before the first step
    pub fn y(&self) -> Option<i32> {
        self.y
    }
    /// Number of edges in the active edge table
    pub fn active_len(&self) -> usize {
        self.active.len()
    }
    /// x of the active edges at the current scanline, in table order
    pub fn active_x(&self) -> Vec<Fixed> {
        self.active.iter().map(|e| e.x).collect()
    }
    /// Ids of the active edges, in table order
    pub fn active_ids(&self) -> Vec<EdgeId> {
        self.active.iter().map(|e| e.id).collect()
    }

    /// Move the active edge table to scanline `y`
    ///
    /// Edges that ended above `y` are dropped, the remaining edges are
    /// advanced, edges starting at or above `y` are inserted and the table
    /// is re-sorted by x. Edges with equal x keep their relative order.
    /// `y` must increase from call to call.
    pub fn step(&mut self, y: i32) {
        let delta = match self.y {
            Some(prev) => {
                debug_assert!(y > prev, "scanlines must increase");
                y - prev
            }
            None => 0,
        };
        self.active.retain(|e| e.last_y >= y);
        for e in self.active.iter_mut() {
            e.x = e.x.wrapping_add(e.dx.wrapping_mul(delta));
        }
        while let Some(&id) = self.edges.ids().get(self.next) {
            let edge = self.edges.get(id);
            if edge.first_y > y {
                break;
            }
            self.next += 1;
            if edge.last_y < y {
                continue;
            }
            self.active.push(ActiveEdge {
                id,
                x: edge.x_at(y),
                dx: edge.dx,
                last_y: edge.last_y,
                winding: edge.winding,
            });
        }
        // Insertion sort, the table is nearly sorted from the last row
        for i in 1..self.active.len() {
            let mut j = i;
            while j > 0 && self.active[j - 1].x > self.active[j].x {
                self.active.swap(j - 1, j);
                j -= 1;
            }
        }
        self.y = Some(y);
        self.state = if self.active.is_empty() && self.next >= self.edges.len() {
            ScanState::Exhausted
        } else {
            ScanState::Active
        };
    }

    fn first_y(&self) -> Option<i32> {
        if self.rule.is_inverse() {
            return self.bounds.filter(|b| !b.is_empty()).map(|b| b.y1);
        }
        let (top, _) = self.edges.y_range()?;
        Some(self.bounds.map_or(top, |b| top.max(b.y1)))
    }
    fn last_y(&self) -> i32 {
        if self.rule.is_inverse() {
            return self.bounds.map_or(i32::MIN, |b| b.y2 - 1);
        }
        let bottom = self.edges.y_range().map_or(i32::MIN, |(_, bot)| bot);
        self.bounds.map_or(bottom, |b| bottom.min(b.y2 - 1))
    }

    /// Step to the next scanline that may produce spans
    ///
    /// Rows without active edges are skipped unless the rule is inverse.
    pub fn advance(&mut self) -> Option<i32> {
        if self.state == ScanState::BeforeFirstEdge && self.rule.is_inverse() && self.bounds.is_none() {
            log::warn!("SCAN: inverse fill without bounds covers nothing");
        }
        let mut y = match self.y {
            None => match self.first_y() {
                Some(y) => y,
                None => {
                    self.state = ScanState::Exhausted;
                    return None;
                }
            },
            Some(y) => y.checked_add(1)?,
        };
        if !self.rule.is_inverse() && self.active.is_empty() {
            let pending = self.edges.ids().get(self.next).map(|&id| self.edges.get(id).first_y);
            match pending {
                Some(first_y) => y = y.max(first_y),
                None => {
                    self.state = ScanState::Exhausted;
                    return None;
                }
            }
        }
        if y > self.last_y() {
            self.state = ScanState::Exhausted;
            return None;
        }
        self.step(y);
        Some(y)
    }

    /// Spans of the current scanline as `(x, len)`, left to right
    pub fn walk_spans<F: FnMut(i32, i32)>(&mut self, mut f: F) {
        let (left, right) = self.bounds.map_or((i32::MIN, i32::MAX), |b| (b.x1, b.x2));
        self.spans.clear();
        let mut winding = 0;
        let mut start = 0;
        for e in &self.active {
            let x = fixed_round_to_int(e.x);
            let was_inside = self.rule.inside(winding);
            winding += i32::from(e.winding);
            let is_inside = self.rule.inside(winding);
            if !was_inside && is_inside {
                start = x;
            } else if was_inside && !is_inside {
                let (x0, x1) = (start.max(left), x.min(right));
                if x1 > x0 {
                    self.spans.push((x0, x1));
                }
            }
        }
        if self.rule.is_inverse() {
            if self.bounds.is_none() {
                return;
            }
            let mut cur = left;
            for &(x0, x1) in &self.spans {
                if x0 > cur {
                    f(cur, x0 - cur);
                }
                cur = cur.max(x1);
            }
            if right > cur {
                f(cur, right - cur);
            }
        } else {
            for &(x0, x1) in &self.spans {
                f(x0, x1 - x0);
            }
        }
    }

    /// Fill `sl` with the spans of the next non-empty scanline
    ///
    /// Returns `false` when no scanlines remain.
    pub fn sweep_scanline(&mut self, sl: &mut Scanline) -> bool {
        loop {
            let Some(y) = self.advance() else {
                return false;
            };
            sl.reset_spans();
            self.walk_spans(|x, len| sl.add_span(x, len, 255));
            if sl.num_spans() != 0 {
                sl.finalize(y);
                return true;
            }
        }
    }
}

/// Fill `path` without anti-aliasing
///
/// Pixels whose centers are inside the path under `rule` and inside `clip`
/// are blitted with [Blitter::blit_h].
pub fn fill_path<B: Blitter + ?Sized>(path: &Path, rule: FillingRule, clip: &IntRect,
                                      blitter: &mut B, config: &RasterConfig) {
    if clip.is_empty() {
        return;
    }
    let mut builder = EdgeBuilder::new(config);
    builder.build(path, Some(clip), 0);
    let mut conv = ScanConverter::new(builder.edge_list(), rule).with_bounds(*clip);
    let mut sl = Scanline::new();
    let mut rows = 0;
    while conv.sweep_scanline(&mut sl) {
        for span in &sl.spans {
            blitter.blit_h(span.x, sl.y, span.len);
        }
        rows += 1;
    }
    log::debug!("FILL PATH: {:?} {} rows", rule, rows);
}

/// Supersampled coordinates of `clip` fit in 16 bits
///
/// Edge x is carried as 16.16, so larger supersampled coordinates would
/// overflow it.
fn fits_supersampled(clip: &IntRect, shift: u8) -> bool {
    let range = i64::from(i16::MIN) ..= i64::from(i16::MAX);
    [clip.x1, clip.y1, clip.x2, clip.y2].iter().all(|&v| range.contains(&(i64::from(v) << shift)))
}

/// Fill `path` with anti-aliasing
///
/// Edges are built `config.supersample_shift` times finer in both
/// directions; a [SuperSampler] turns the supersampled spans back into
/// per pixel coverage. A clip too large to supersample is filled without
/// anti-aliasing.
pub fn fill_path_aa<B: Blitter + ?Sized>(path: &Path, rule: FillingRule, clip: &IntRect,
                                         blitter: &mut B, config: &RasterConfig) {
    let shift = config.supersample_shift;
    if shift == 0 {
        return fill_path(path, rule, clip, blitter, config);
    }
    if clip.is_empty() {
        return;
    }
    if !fits_supersampled(clip, shift) {
        log::debug!("FILL PATH AA: clip {:?} too large for shift {}, filling aliased", clip, shift);
        return fill_path(path, rule, clip, blitter, config);
    }
    let mut builder = EdgeBuilder::new(config);
    builder.build(path, Some(clip), shift);
    let super_clip = IntRect::new(clip.x1 << shift, clip.y1 << shift,
                                  clip.x2 << shift, clip.y2 << shift);
    let mut conv = ScanConverter::new(builder.edge_list(), rule).with_bounds(super_clip);
    let mut sampler = SuperSampler::new(clip, shift);
    while let Some(y) = conv.advance() {
        sampler.set_row(y >> shift, &mut *blitter);
        conv.walk_spans(|x, len| sampler.add_span(x, len));
    }
    sampler.flush(blitter);
}

/// Accumulates supersampled spans into per pixel coverage
///
/// Each device pixel collects up to `2^shift * 2^shift` samples; a full
/// pixel maps to coverage 255.
#[derive(Debug, Clone)]
pub struct SuperSampler {
    left: i32,
    shift: u8,
    y: Option<i32>,
    acc: Vec<u16>,
    dirty: Option<(usize, usize)>,
    covers: Vec<u8>,
}

impl SuperSampler {
    /// Sampler for the columns of `clip`
    pub fn new(clip: &IntRect, shift: u8) -> Self {
        let width = clip.width().max(0) as usize;
        Self { left: clip.x1, shift, y: None,
               acc: vec![0; width], dirty: None, covers: vec![] }
    }
    /// Switch to device row `y`, flushing the previous row if it differs
    pub fn set_row<B: Blitter + ?Sized>(&mut self, y: i32, blitter: &mut B) {
        if self.y != Some(y) {
            self.flush(blitter);
            self.y = Some(y);
        }
    }
    /// Add a span of supersampled columns on one supersampled row
    pub fn add_span(&mut self, x: i32, len: i32) {
        let scale = 1i32 << self.shift;
        let mask = scale - 1;
        let lo = self.left << self.shift;
        let hi = lo + ((self.acc.len() as i32) << self.shift);
        let (x0, x1) = (x.max(lo), x.saturating_add(len).min(hi));
        if x1 <= x0 {
            return;
        }
        let (sx, sx_last) = (x0 - lo, x1 - 1 - lo);
        let (px0, px1) = ((sx >> self.shift) as usize, (sx_last >> self.shift) as usize);
        if px0 == px1 {
            self.acc[px0] += (x1 - x0) as u16;
        } else {
            self.acc[px0] += (scale - (sx & mask)) as u16;
            for a in &mut self.acc[px0 + 1..px1] {
                *a += scale as u16;
            }
            self.acc[px1] += ((sx_last & mask) + 1) as u16;
        }
        self.dirty = Some(match self.dirty {
            None => (px0, px1),
            Some((d0, d1)) => (d0.min(px0), d1.max(px1)),
        });
    }
    /// Blit the accumulated row and clear it
    pub fn flush<B: Blitter + ?Sized>(&mut self, blitter: &mut B) {
        let (Some(y), Some((d0, d1))) = (self.y, self.dirty.take()) else {
            return;
        };
        let shift = self.shift;
        self.covers.clear();
        self.covers.extend(self.acc[d0 ..= d1].iter().map(|&a| coverage(a, shift)));
        log::trace!("SUPERSAMPLER: row {} pixels {}..={}", y, d0, d1);
        blit_coverage_row(blitter, self.left + d0 as i32, y, &self.covers);
        for a in &mut self.acc[d0 ..= d1] {
            *a = 0;
        }
    }
}

fn coverage(samples: u16, shift: u8) -> u8 {
    ((u32::from(samples) << 8) >> (2 * shift)).min(255) as u8
}
