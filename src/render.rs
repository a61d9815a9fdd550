//! Renderer
//!
//! Entry points that run a path through the whole pipeline: transform,
//! edge building, scan conversion, optional mask filter and blitting.

use crate::blitter::{choose_blitter, Blitter, BlitContext, MaskBlitter, SpriteBlitter};
use crate::buffer::Pixmap;
use crate::clip::IntRect;
use crate::color::Rgba8;
use crate::config::RasterConfig;
use crate::errors::Result;
use crate::mask::{Mask, MaskFormat};
use crate::mask_filter::MaskFilter;
use crate::path_storage::Path;
use crate::raster::{fill_path, fill_path_aa, FillingRule, ScanConverter};
use crate::scan::Scanline;
use crate::transform::Transform;

/// Most pixels outside the destination a filtered path is rasterized into
pub const MAX_MARGIN: i32 = 128;

/// How a path is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Solid color, not premultiplied
    pub color: Rgba8,
    pub anti_alias: bool,
    pub fill_rule: FillingRule,
    pub mask_filter: Option<MaskFilter>,
}

impl Default for Paint {
    fn default() -> Self {
        Self { color: Rgba8::black(), anti_alias: true,
               fill_rule: FillingRule::NonZero, mask_filter: None }
    }
}

impl Paint {
    /// Anti-aliased non-zero fill with `color`
    pub fn new(color: Rgba8) -> Self {
        Self { color, ..Self::default() }
    }
    pub fn anti_alias(mut self, aa: bool) -> Self {
        self.anti_alias = aa;
        self
    }
    pub fn fill_rule(mut self, rule: FillingRule) -> Self {
        self.fill_rule = rule;
        self
    }
    pub fn mask_filter(mut self, filter: MaskFilter) -> Self {
        self.mask_filter = Some(filter);
        self
    }
}

/// Render a single Scanline (y-row)
///
/// Fully covered spans go to [Blitter::blit_h], the others to
/// [Blitter::blit_anti_h].
pub fn render_scanline<B: Blitter + ?Sized>(sl: &Scanline, blitter: &mut B) {
    for span in &sl.spans {
        if span.is_solid() {
            blitter.blit_h(span.x, sl.y, span.len);
        } else {
            blitter.blit_anti_h(span.x, sl.y, &span.covers);
        }
    }
}

/// Render every remaining scanline of `conv`
pub fn render_scanlines<B: Blitter + ?Sized>(conv: &mut ScanConverter, sl: &mut Scanline,
                                             blitter: &mut B) {
    while conv.sweep_scanline(sl) {
        render_scanline(sl, blitter);
    }
}

fn fill<B: Blitter + ?Sized>(path: &Path, rule: FillingRule, aa: bool, clip: &IntRect,
                             blitter: &mut B, config: &RasterConfig) {
    if aa {
        fill_path_aa(path, rule, clip, blitter, config);
    } else {
        fill_path(path, rule, clip, blitter, config);
    }
}

/// Coverage mask of `path` limited to `clip`
///
/// The mask covers the pixels of the path bounds inside `clip`, or all of
/// `clip` for inverse fill rules. A path without area yields a mask with
/// empty bounds and no image.
///
///     use edgefill::{rasterize_to_mask, FillingRule, IntRect, Path, RasterConfig};
///
///     let path = Path::rect(1., 1., 3., 4.);
///     let clip = IntRect::new(0, 0, 10, 10);
///     let mask = rasterize_to_mask(&path, FillingRule::NonZero, false, &clip,
///                                  &RasterConfig::default()).unwrap();
///     assert_eq!(mask.bounds, IntRect::new(1, 1, 3, 4));
///     assert_eq!(mask.count_nonzero(), 6);
///
pub fn rasterize_to_mask(path: &Path, rule: FillingRule, aa: bool, clip: &IntRect,
                         config: &RasterConfig) -> Result<Mask> {
    let bounds = if rule.is_inverse() {
        Some(*clip).filter(|c| !c.is_empty())
    } else {
        path.bounds().and_then(|b| b.round_out().intersect(clip))
    };
    let Some(bounds) = bounds else {
        log::debug!("RASTERIZE: nothing to cover");
        return Ok(Mask::new(IntRect::default(), MaskFormat::A8));
    };
    let mut mask = Mask::new(bounds, MaskFormat::A8);
    mask.alloc_image(config)?;
    let mut blitter = MaskBlitter::new(&mut mask);
    fill(path, rule, aa, &bounds, &mut blitter, config);
    Ok(mask)
}

/// Draw `path` transformed by `transform` into `dst`
///
/// Without a mask filter the path is filled straight through the blitter
/// chosen for `dst` and `paint`. With one, the path is first rasterized to
/// a mask which is filtered and then blitted. A filter that fails is
/// skipped with a warning and the unfiltered mask is drawn.
pub fn draw_path(dst: &mut Pixmap, path: &Path, paint: &Paint, transform: &Transform,
                 config: &RasterConfig) -> Result<()> {
    let transformed;
    let path = if transform.is_identity() {
        path
    } else {
        transformed = path.transform(transform);
        &transformed
    };
    let clip = dst.bounds();
    let ctx = BlitContext::new(config);
    let Some(filter) = &paint.mask_filter else {
        let mut blitter = choose_blitter(dst, paint, &ctx)?;
        fill(path, paint.fill_rule, paint.anti_alias, &clip, &mut *blitter, config);
        return Ok(());
    };
    let margin = filter.margin(transform);
    let (mx, my) = (margin.x.min(MAX_MARGIN), margin.y.min(MAX_MARGIN));
    let src = rasterize_to_mask(path, paint.fill_rule, paint.anti_alias,
                                &clip.outset(mx, my), config)?;
    let mut filtered = Mask::new(IntRect::default(), filter.format());
    let result = filter.filter_mask_with(&mut filtered, &src, transform, None, config);
    let mut blitter = choose_blitter(dst, paint, &ctx)?;
    match result {
        Ok(()) => blitter.blit_mask(&filtered, &clip),
        Err(err) => {
            log::warn!("DRAW PATH: mask filter {:?} failed, drawing without it: {}", filter, err);
            blitter.blit_mask(&src, &clip);
        }
    }
    Ok(())
}

/// Draw all of `src` with its top left corner at (x, y)
pub fn draw_sprite(dst: &mut Pixmap, src: &Pixmap, x: i32, y: i32, config: &RasterConfig) -> Result<()> {
    let ctx = BlitContext::new(config);
    let mut blitter = SpriteBlitter::new(dst, src, x, y, &ctx)?;
    blitter.blit_rect(x, y, src.width as i32, src.height as i32);
    Ok(())
}
