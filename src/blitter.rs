//! Blitters
//!
//! A [Blitter] writes runs of coverage into a destination. The scan
//! converter and [Blitter::blit_mask] only ever talk to this trait; the
//! factory [choose_blitter] picks an implementation for a destination
//! format and paint.
//!
//! Runs are given in destination pixel space and are clipped to the
//! destination by every pixmap blitter.

use crate::buffer::Pixmap;
use crate::clip::IntRect;
use crate::config::RasterConfig;
use crate::errors::{RasterError, Result};
use crate::mask::{Mask, MaskFormat};
use crate::pixfmt::*;
use crate::render::Paint;

/// Writes pixels into memory
pub trait Blitter {
    /// Blit a horizontal run of fully covered pixels
    fn blit_h(&mut self, x: i32, y: i32, width: i32);

    /// Blit a horizontal run with one coverage value per pixel
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]);

    /// Blit a vertical run of pixels with the same coverage
    fn blit_v(&mut self, x: i32, y: i32, height: i32, alpha: u8) {
        for i in 0 .. height {
            self.blit_anti_h(x, y + i, &[alpha]);
        }
    }

    /// Blit a fully covered rectangle
    fn blit_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for i in 0 .. height {
            self.blit_h(x, y + i, width);
        }
    }

    /// Blit the part of `mask` inside `clip`
    ///
    /// Bw and A8 masks become coverage rows. [MaskFormat::ThreeD] masks go
    /// to [Blitter::blit_mask_3d].
    fn blit_mask(&mut self, mask: &Mask, clip: &IntRect) {
        let Some(r) = mask.bounds.intersect(clip) else {
            return;
        };
        if mask.image.is_empty() {
            return;
        }
        if mask.format == MaskFormat::ThreeD {
            return self.blit_mask_3d(mask, &r);
        }
        blit_mask_alpha(self, mask, &r);
    }

    /// Blit a shaded mask; blitters without shading use only its alpha
    fn blit_mask_3d(&mut self, mask: &Mask, clip: &IntRect) {
        blit_mask_alpha(self, mask, clip);
    }
}

/// Blit the alpha of `mask` inside `clip` as coverage rows
pub fn blit_mask_alpha<B: Blitter + ?Sized>(blitter: &mut B, mask: &Mask, clip: &IntRect) {
    let mut row = Vec::with_capacity(clip.width().max(0) as usize);
    for y in clip.y1 .. clip.y2 {
        mask.row_alpha(y, clip.x1, clip.x2, &mut row);
        blit_coverage_row(blitter, clip.x1, y, &row);
    }
}

/// Blit a row of coverage starting at `x`
///
/// Zero coverage is skipped, runs of full coverage go to
/// [Blitter::blit_h] and the rest to [Blitter::blit_anti_h].
pub fn blit_coverage_row<B: Blitter + ?Sized>(blitter: &mut B, x: i32, y: i32, covers: &[u8]) {
    let n = covers.len();
    let mut i = 0;
    while i < n {
        let c = covers[i];
        if c == 0 {
            i += 1;
            continue;
        }
        let start = i;
        if c == 255 {
            while i < n && covers[i] == 255 {
                i += 1;
            }
            blitter.blit_h(x + start as i32, y, (i - start) as i32);
        } else {
            while i < n && covers[i] != 0 && covers[i] != 255 {
                i += 1;
            }
            blitter.blit_anti_h(x + start as i32, y, &covers[start .. i]);
        }
    }
}

/// Clip a run to `dst`
///
/// Returns the row, the first pixel, the number of pixels skipped at the
/// start of the run and the number of pixels left.
fn clip_run(dst: &Pixmap, x: i32, y: i32, len: i32) -> Option<(usize, usize, usize, usize)> {
    if y < 0 || y as usize >= dst.height || len <= 0 {
        return None;
    }
    let x0 = x.max(0);
    let x1 = (i64::from(x) + i64::from(len)).min(dst.width as i64) as i32;
    if x1 <= x0 {
        return None;
    }
    Some((y as usize, x0 as usize, (x0 - x) as usize, (x1 - x0) as usize))
}

/// Visit every shaded pixel of a ThreeD mask inside `clip`
///
/// `put` receives the pixel, `src` modulated by the multiply and add
/// planes, and the coverage from the alpha plane. Returns `false` without
/// visiting anything when `mask` is not a complete ThreeD mask.
fn shade_mask<F: FnMut(usize, usize, u32, u8)>(mask: &Mask, clip: &IntRect, src: u32, mut put: F) -> bool {
    let complete = mask.compute_image_size().map_or(false, |n| mask.image.len() >= n);
    if mask.format != MaskFormat::ThreeD || !complete {
        return false;
    }
    let Some(clip) = clip.intersect(&mask.bounds) else {
        return true;
    };
    let (alpha, mul, add) = (mask.plane(0), mask.plane(1), mask.plane(2));
    for y in clip.y1 .. clip.y2 {
        let row = (y - mask.bounds.y1) as usize * mask.row_bytes;
        for x in clip.x1 .. clip.x2 {
            let i = row + (x - mask.bounds.x1) as usize;
            if alpha[i] != 0 {
                put(x as usize, y as usize, shade_argb32(src, mul[i], add[i]), alpha[i]);
            }
        }
    }
    true
}

/// Blend premultiplied `src` with coverage into the bytes of one pixel
pub type BlendProc = fn(dst: &mut [u8], src: u32, coverage: u8);
/// Read the bytes of one pixel as premultiplied `0xAARRGGBB`
pub type LoadProc = fn(src: &[u8]) -> u32;

fn blend_a8_proc(dst: &mut [u8], src: u32, coverage: u8) {
    dst[0] = blend_a8(get_a32(src), dst[0], coverage);
}
fn blend_565_proc(dst: &mut [u8], src: u32, coverage: u8) {
    let d = u16::from_ne_bytes([dst[0], dst[1]]);
    dst[.. 2].copy_from_slice(&blend_565(src, d, coverage).to_ne_bytes());
}
fn blend_argb32_proc(dst: &mut [u8], src: u32, coverage: u8) {
    let d = u32::from_ne_bytes([dst[0], dst[1], dst[2], dst[3]]);
    dst[.. 4].copy_from_slice(&blend_argb32(src, d, coverage).to_ne_bytes());
}
fn load_a8(src: &[u8]) -> u32 {
    pack_argb32(src[0], 0, 0, 0)
}
fn load_565(src: &[u8]) -> u32 {
    rgb565_to_argb32(u16::from_ne_bytes([src[0], src[1]]))
}
fn load_argb32(src: &[u8]) -> u32 {
    u32::from_ne_bytes([src[0], src[1], src[2], src[3]])
}

/// Pixel procs of one destination format
#[derive(Debug, Copy, Clone)]
pub struct BlitProcs {
    pub format: PixelFormat,
    pub blend: BlendProc,
    pub load: LoadProc,
}

/// Per draw blitting context
///
/// Holds the proc table for every pixel format; built from a
/// [RasterConfig] for each draw.
#[derive(Debug, Clone)]
pub struct BlitContext {
    procs: [BlitProcs; 3],
    specialized: bool,
}

impl BlitContext {
    pub fn new(config: &RasterConfig) -> Self {
        let procs = [
            BlitProcs { format: PixelFormat::A8, blend: blend_a8_proc, load: load_a8 },
            BlitProcs { format: PixelFormat::Rgb565, blend: blend_565_proc, load: load_565 },
            BlitProcs { format: PixelFormat::Argb32, blend: blend_argb32_proc, load: load_argb32 },
        ];
        Self { procs, specialized: config.specialized_blitters }
    }
    /// Procs for pixels of `format`
    pub fn procs(&self, format: PixelFormat) -> BlitProcs {
        match format {
            PixelFormat::A8 => self.procs[0],
            PixelFormat::Rgb565 => self.procs[1],
            PixelFormat::Argb32 => self.procs[2],
        }
    }
}

/// Blitter that draws nothing
#[derive(Debug, Default)]
pub struct NullBlitter;

impl Blitter for NullBlitter {
    fn blit_h(&mut self, _x: i32, _y: i32, _width: i32) {}
    fn blit_anti_h(&mut self, _x: i32, _y: i32, _covers: &[u8]) {}
    fn blit_mask(&mut self, _mask: &Mask, _clip: &IntRect) {}
}

/// Writes coverage into a mask
///
/// Pixels outside the mask bounds are ignored. Coverage is stored, not
/// accumulated.
#[derive(Debug)]
pub struct MaskBlitter<'a> {
    mask: &'a mut Mask,
}

impl<'a> MaskBlitter<'a> {
    /// Blitter into `mask`, whose image must be allocated
    pub fn new(mask: &'a mut Mask) -> Self {
        Self { mask }
    }
}

impl Blitter for MaskBlitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let b = self.mask.bounds;
        for x in x.max(b.x1) .. x.saturating_add(width).min(b.x2) {
            self.mask.set_alpha(x, y, 255);
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        for (i, &c) in covers.iter().enumerate() {
            self.mask.set_alpha(x + i as i32, y, c);
        }
    }
}

/// A8 destination, solid alpha
#[derive(Debug)]
pub struct A8Blitter<'a> {
    dst: &'a mut Pixmap,
    alpha: u8,
}

impl<'a> A8Blitter<'a> {
    pub fn new(dst: &'a mut Pixmap, alpha: u8) -> Result<Self> {
        check_format(dst, PixelFormat::A8)?;
        Ok(Self { dst, alpha })
    }
}

impl Blitter for A8Blitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let Some((y, x0, _, n)) = clip_run(self.dst, x, y, width) else {
            return;
        };
        let row = self.dst.row_mut(y);
        for d in &mut row[x0 .. x0 + n] {
            *d = blend_a8(self.alpha, *d, 255);
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        let Some((y, x0, skip, n)) = clip_run(self.dst, x, y, covers.len() as i32) else {
            return;
        };
        let row = self.dst.row_mut(y);
        for (d, &c) in row[x0 .. x0 + n].iter_mut().zip(&covers[skip ..]) {
            *d = blend_a8(self.alpha, *d, c);
        }
    }
    fn blit_v(&mut self, x: i32, y: i32, height: i32, alpha: u8) {
        for i in 0 .. height {
            if let Some((y, x0, _, _)) = clip_run(self.dst, x, y + i, 1) {
                let v = self.dst.get_a8(x0, y);
                self.dst.set_a8(x0, y, blend_a8(self.alpha, v, alpha));
            }
        }
    }
}

fn check_format(dst: &Pixmap, expected: PixelFormat) -> Result<()> {
    if dst.format != expected {
        return Err(RasterError::UnsupportedPixelFormat { expected, found: dst.format });
    }
    Ok(())
}

/// 5-6-5 destination, opaque solid color
#[derive(Debug)]
pub struct Rgb565OpaqueBlitter<'a> {
    dst: &'a mut Pixmap,
    src: u32,
    color: u16,
}

impl<'a> Rgb565OpaqueBlitter<'a> {
    /// `src` is a premultiplied, opaque `0xAARRGGBB` color
    pub fn new(dst: &'a mut Pixmap, src: u32) -> Result<Self> {
        check_format(dst, PixelFormat::Rgb565)?;
        debug_assert_eq!(get_a32(src), 255);
        Ok(Self { dst, src, color: argb32_to_565(src) })
    }
}

impl Blitter for Rgb565OpaqueBlitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let Some((y, x0, _, n)) = clip_run(self.dst, x, y, width) else {
            return;
        };
        for x in x0 .. x0 + n {
            self.dst.set_565(x, y, self.color);
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        let Some((y, x0, skip, n)) = clip_run(self.dst, x, y, covers.len() as i32) else {
            return;
        };
        for (x, &c) in (x0 .. x0 + n).zip(&covers[skip ..]) {
            let d = self.dst.get_565(x, y);
            self.dst.set_565(x, y, blend_565(self.src, d, c));
        }
    }
    fn blit_mask_3d(&mut self, mask: &Mask, clip: &IntRect) {
        let Some(r) = clip.intersect(&self.dst.bounds()) else {
            return;
        };
        let dst = &mut *self.dst;
        let shaded = shade_mask(mask, &r, self.src, |x, y, s, c| {
            let d = dst.get_565(x, y);
            dst.set_565(x, y, blend_565(s, d, c));
        });
        if !shaded {
            blit_mask_alpha(self, mask, &r);
        }
    }
}

/// 5-6-5 destination, translucent solid color
#[derive(Debug)]
pub struct Rgb565Blitter<'a> {
    dst: &'a mut Pixmap,
    src: u32,
}

impl<'a> Rgb565Blitter<'a> {
    /// `src` is a premultiplied `0xAARRGGBB` color
    pub fn new(dst: &'a mut Pixmap, src: u32) -> Result<Self> {
        check_format(dst, PixelFormat::Rgb565)?;
        Ok(Self { dst, src })
    }
}

impl Blitter for Rgb565Blitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let Some((y, x0, _, n)) = clip_run(self.dst, x, y, width) else {
            return;
        };
        for x in x0 .. x0 + n {
            let d = self.dst.get_565(x, y);
            self.dst.set_565(x, y, blend_565(self.src, d, 255));
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        let Some((y, x0, skip, n)) = clip_run(self.dst, x, y, covers.len() as i32) else {
            return;
        };
        for (x, &c) in (x0 .. x0 + n).zip(&covers[skip ..]) {
            let d = self.dst.get_565(x, y);
            self.dst.set_565(x, y, blend_565(self.src, d, c));
        }
    }
    fn blit_mask_3d(&mut self, mask: &Mask, clip: &IntRect) {
        let Some(r) = clip.intersect(&self.dst.bounds()) else {
            return;
        };
        let dst = &mut *self.dst;
        let shaded = shade_mask(mask, &r, self.src, |x, y, s, c| {
            let d = dst.get_565(x, y);
            dst.set_565(x, y, blend_565(s, d, c));
        });
        if !shaded {
            blit_mask_alpha(self, mask, &r);
        }
    }
}

/// 32 bit destination, opaque solid color
#[derive(Debug)]
pub struct Argb32OpaqueBlitter<'a> {
    dst: &'a mut Pixmap,
    src: u32,
}

impl<'a> Argb32OpaqueBlitter<'a> {
    /// `src` is a premultiplied, opaque `0xAARRGGBB` color
    pub fn new(dst: &'a mut Pixmap, src: u32) -> Result<Self> {
        check_format(dst, PixelFormat::Argb32)?;
        debug_assert_eq!(get_a32(src), 255);
        Ok(Self { dst, src })
    }
}

impl Blitter for Argb32OpaqueBlitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let Some((y, x0, _, n)) = clip_run(self.dst, x, y, width) else {
            return;
        };
        for x in x0 .. x0 + n {
            self.dst.set_argb32(x, y, self.src);
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        let Some((y, x0, skip, n)) = clip_run(self.dst, x, y, covers.len() as i32) else {
            return;
        };
        for (x, &c) in (x0 .. x0 + n).zip(&covers[skip ..]) {
            let d = self.dst.get_argb32(x, y);
            self.dst.set_argb32(x, y, blend_argb32(self.src, d, c));
        }
    }
    fn blit_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for i in 0 .. height {
            self.blit_h(x, y + i, width);
        }
    }
    fn blit_mask_3d(&mut self, mask: &Mask, clip: &IntRect) {
        let Some(r) = clip.intersect(&self.dst.bounds()) else {
            return;
        };
        let dst = &mut *self.dst;
        let shaded = shade_mask(mask, &r, self.src, |x, y, s, c| {
            let d = dst.get_argb32(x, y);
            dst.set_argb32(x, y, blend_argb32(s, d, c));
        });
        if !shaded {
            blit_mask_alpha(self, mask, &r);
        }
    }
}

/// 32 bit destination, translucent solid color
#[derive(Debug)]
pub struct Argb32Blitter<'a> {
    dst: &'a mut Pixmap,
    src: u32,
}

impl<'a> Argb32Blitter<'a> {
    /// `src` is a premultiplied `0xAARRGGBB` color
    pub fn new(dst: &'a mut Pixmap, src: u32) -> Result<Self> {
        check_format(dst, PixelFormat::Argb32)?;
        Ok(Self { dst, src })
    }
}

impl Blitter for Argb32Blitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let Some((y, x0, _, n)) = clip_run(self.dst, x, y, width) else {
            return;
        };
        for x in x0 .. x0 + n {
            let d = self.dst.get_argb32(x, y);
            self.dst.set_argb32(x, y, src_over_argb32(self.src, d));
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        let Some((y, x0, skip, n)) = clip_run(self.dst, x, y, covers.len() as i32) else {
            return;
        };
        for (x, &c) in (x0 .. x0 + n).zip(&covers[skip ..]) {
            let d = self.dst.get_argb32(x, y);
            self.dst.set_argb32(x, y, blend_argb32(self.src, d, c));
        }
    }
    fn blit_mask_3d(&mut self, mask: &Mask, clip: &IntRect) {
        let Some(r) = clip.intersect(&self.dst.bounds()) else {
            return;
        };
        let dst = &mut *self.dst;
        let shaded = shade_mask(mask, &r, self.src, |x, y, s, c| {
            let d = dst.get_argb32(x, y);
            dst.set_argb32(x, y, blend_argb32(s, d, c));
        });
        if !shaded {
            blit_mask_alpha(self, mask, &r);
        }
    }
}

/// Generic solid color blitter for any format, driven by [BlitProcs]
#[derive(Debug)]
pub struct ProcBlitter<'a> {
    dst: &'a mut Pixmap,
    src: u32,
    procs: BlitProcs,
}

impl<'a> ProcBlitter<'a> {
    /// `src` is a premultiplied `0xAARRGGBB` color
    pub fn new(dst: &'a mut Pixmap, src: u32, ctx: &BlitContext) -> Self {
        let procs = ctx.procs(dst.format);
        Self { dst, src, procs }
    }
    fn blend_pixel(&mut self, x: usize, y: usize, src: u32, coverage: u8) {
        (self.procs.blend)(&mut self.dst[(x, y)], src, coverage);
    }
}

impl Blitter for ProcBlitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        let Some((y, x0, _, n)) = clip_run(self.dst, x, y, width) else {
            return;
        };
        for x in x0 .. x0 + n {
            self.blend_pixel(x, y, self.src, 255);
        }
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        let Some((y, x0, skip, n)) = clip_run(self.dst, x, y, covers.len() as i32) else {
            return;
        };
        for (x, &c) in (x0 .. x0 + n).zip(&covers[skip ..]) {
            self.blend_pixel(x, y, self.src, c);
        }
    }
    fn blit_mask_3d(&mut self, mask: &Mask, clip: &IntRect) {
        let Some(r) = clip.intersect(&self.dst.bounds()) else {
            return;
        };
        let (dst, blend) = (&mut *self.dst, self.procs.blend);
        let shaded = shade_mask(mask, &r, self.src, |x, y, s, c| blend(&mut dst[(x, y)], s, c));
        if !shaded {
            blit_mask_alpha(self, mask, &r);
        }
    }
}

/// Blits the pixels of a source bitmap placed at an integer offset
///
/// Every covered destination pixel gets the source pixel scaled by the
/// coverage, blended over it. Destination pixels outside the source are
/// left alone.
#[derive(Debug)]
pub struct SpriteBlitter<'a> {
    dst: &'a mut Pixmap,
    src: &'a Pixmap,
    left: i32,
    top: i32,
    blend: BlendProc,
    load: LoadProc,
}

impl<'a> SpriteBlitter<'a> {
    /// Blitter for `src` with its top left corner at (left, top)
    ///
    /// A8 sources only draw into A8 destinations; 5-6-5 and 32 bit
    /// sources draw into either color format.
    pub fn new(dst: &'a mut Pixmap, src: &'a Pixmap, left: i32, top: i32,
               ctx: &BlitContext) -> Result<Self> {
        let compatible = match dst.format {
            PixelFormat::A8 => src.format == PixelFormat::A8,
            PixelFormat::Rgb565 | PixelFormat::Argb32 => src.format != PixelFormat::A8,
        };
        if !compatible {
            return Err(RasterError::UnsupportedPixelFormat { expected: dst.format, found: src.format });
        }
        let blend = ctx.procs(dst.format).blend;
        let load = ctx.procs(src.format).load;
        Ok(Self { dst, src, left, top, blend, load })
    }
    /// Source bounds in destination space
    pub fn bounds(&self) -> IntRect {
        IntRect::from_xywh(self.left, self.top, self.src.width as i32, self.src.height as i32)
    }
    fn blit_run<F: Fn(usize) -> u8>(&mut self, x: i32, y: i32, len: i32, cover: F) {
        let Some((dy, x0, skip, n)) = clip_run(self.dst, x, y, len) else {
            return;
        };
        let sy = y - self.top;
        if sy < 0 || sy as usize >= self.src.height {
            return;
        }
        let (sbpp, dbpp) = (self.src.format.bpp(), self.dst.format.bpp());
        let src_row = self.src.row(sy as usize);
        let dst_row = self.dst.row_mut(dy);
        for i in 0 .. n {
            let dx = x0 + i;
            let sx = dx as i32 - self.left;
            if sx < 0 || sx as usize >= self.src.width {
                continue;
            }
            let sx = sx as usize;
            let s = (self.load)(&src_row[sx * sbpp .. (sx + 1) * sbpp]);
            (self.blend)(&mut dst_row[dx * dbpp .. (dx + 1) * dbpp], s, cover(skip + i));
        }
    }
}

impl Blitter for SpriteBlitter<'_> {
    fn blit_h(&mut self, x: i32, y: i32, width: i32) {
        self.blit_run(x, y, width, |_| 255);
    }
    fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
        self.blit_run(x, y, covers.len() as i32, |i| covers[i]);
    }
}

/// Pick a blitter for drawing `paint` into `dst`
///
/// Fully transparent paints get a [NullBlitter]. With specialized
/// blitters disabled every format uses the [ProcBlitter].
pub fn choose_blitter<'a>(dst: &'a mut Pixmap, paint: &Paint, ctx: &BlitContext)
                          -> Result<Box<dyn Blitter + 'a>> {
    if paint.color.a == 0 {
        log::trace!("BLITTER: transparent paint, null blitter");
        return Ok(Box::new(NullBlitter));
    }
    if !ctx.specialized {
        let src = paint.color.premultiply().to_argb32();
        return Ok(Box::new(ProcBlitter::new(dst, src, ctx)));
    }
    match dst.format {
        PixelFormat::A8 => Ok(Box::new(A8Blitter::new(dst, paint.color.a)?)),
        PixelFormat::Rgb565 => choose_d16(dst, paint, ctx),
        PixelFormat::Argb32 => choose_d32(dst, paint, ctx),
    }
}

/// Blitter for a 5-6-5 destination
pub fn choose_d16<'a>(dst: &'a mut Pixmap, paint: &Paint, _ctx: &BlitContext)
                      -> Result<Box<dyn Blitter + 'a>> {
    let src = paint.color.premultiply().to_argb32();
    if paint.color.is_opaque() {
        Ok(Box::new(Rgb565OpaqueBlitter::new(dst, src)?))
    } else {
        Ok(Box::new(Rgb565Blitter::new(dst, src)?))
    }
}

/// Blitter for a 32 bit destination
pub fn choose_d32<'a>(dst: &'a mut Pixmap, paint: &Paint, _ctx: &BlitContext)
                      -> Result<Box<dyn Blitter + 'a>> {
    let src = paint.color.premultiply().to_argb32();
    if paint.color.is_opaque() {
        Ok(Box::new(Argb32OpaqueBlitter::new(dst, src)?))
    } else {
        Ok(Box::new(Argb32Blitter::new(dst, src)?))
    }
}

/// Blitter drawing the pixels of `src` placed at (left, top)
pub fn choose_sprite_blitter<'a>(dst: &'a mut Pixmap, src: &'a Pixmap, left: i32, top: i32,
                                 ctx: &BlitContext) -> Result<Box<dyn Blitter + 'a>> {
    Ok(Box::new(SpriteBlitter::new(dst, src, left, top, ctx)?))
}
