//! Pixel buffers

use crate::clip::IntRect;
use crate::errors::{RasterError, Result};
use crate::pixfmt::*;

/// Destination bitmap
///
/// Data is stored as row-major order (C-format), each row `row_bytes` long.
/// 16 and 32 bit pixels are stored in native byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    /// Pixel level data of the image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
    /// Bytes from the start of one row to the next
    pub row_bytes: usize,
    /// Layout of every pixel
    pub format: PixelFormat,
}

impl Pixmap {
    /// Create a new zeroed pixmap
    ///
    ///     use edgefill::{Pixmap, PixelFormat};
    ///
    ///     let pix = Pixmap::new(4, 3, PixelFormat::Rgb565).unwrap();
    ///     assert_eq!(pix.row_bytes, 8);
    ///     assert_eq!(pix.len(), 24);
    ///     assert!(Pixmap::new(0, 3, PixelFormat::A8).is_err());
    ///
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        let invalid = || RasterError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(invalid());
        }
        let row_bytes = width.checked_mul(format.bpp()).ok_or_else(invalid)?;
        let size = row_bytes.checked_mul(height).ok_or_else(invalid)?;
        Ok(Pixmap { data: vec![0u8; size], width, height, row_bytes, format })
    }
    /// Size of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Rectangle covering every pixel
    pub fn bounds(&self) -> IntRect {
        IntRect::new(0, 0, self.width as i32, self.height as i32)
    }
    /// Bytes of row `y`
    pub fn row(&self, y: usize) -> &[u8] {
        debug_assert!(y < self.height);
        let start = y * self.row_bytes;
        &self.data[start .. start + self.width * self.format.bpp()]
    }
    /// Mutable bytes of row `y`
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        debug_assert!(y < self.height);
        let start = y * self.row_bytes;
        let end = start + self.width * self.format.bpp();
        &mut self.data[start .. end]
    }
    /// Set every byte to zero
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0);
    }
    /// Set every pixel to the premultiplied color `c`
    pub fn fill(&mut self, c: u32) {
        for y in 0 .. self.height {
            for x in 0 .. self.width {
                self.set_pixel(x, y, c);
            }
        }
    }
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width, "request {} >= {} width :: pixel", x, self.width);
        assert!(y < self.height, "request {} >= {} height :: pixel", y, self.height);
        y * self.row_bytes + x * self.format.bpp()
    }
    /// 8 bit value at (x,y) of an A8 pixmap
    pub fn get_a8(&self, x: usize, y: usize) -> u8 {
        debug_assert_eq!(self.format, PixelFormat::A8);
        self.data[self.offset(x, y)]
    }
    pub fn set_a8(&mut self, x: usize, y: usize, v: u8) {
        debug_assert_eq!(self.format, PixelFormat::A8);
        let i = self.offset(x, y);
        self.data[i] = v;
    }
    /// 16 bit value at (x,y) of an Rgb565 pixmap
    pub fn get_565(&self, x: usize, y: usize) -> u16 {
        debug_assert_eq!(self.format, PixelFormat::Rgb565);
        let i = self.offset(x, y);
        u16::from_ne_bytes([self.data[i], self.data[i + 1]])
    }
    pub fn set_565(&mut self, x: usize, y: usize, v: u16) {
        debug_assert_eq!(self.format, PixelFormat::Rgb565);
        let i = self.offset(x, y);
        self.data[i .. i + 2].copy_from_slice(&v.to_ne_bytes());
    }
    /// 32 bit value at (x,y) of an Argb32 pixmap
    pub fn get_argb32(&self, x: usize, y: usize) -> u32 {
        debug_assert_eq!(self.format, PixelFormat::Argb32);
        let i = self.offset(x, y);
        u32::from_ne_bytes([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }
    pub fn set_argb32(&mut self, x: usize, y: usize, v: u32) {
        debug_assert_eq!(self.format, PixelFormat::Argb32);
        let i = self.offset(x, y);
        self.data[i .. i + 4].copy_from_slice(&v.to_ne_bytes());
    }
    /// Pixel at (x,y) as premultiplied `0xAARRGGBB`, whatever the format
    ///
    /// A8 pixels become black with that alpha, 5-6-5 pixels are opaque.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        match self.format {
            PixelFormat::A8 => pack_argb32(self.get_a8(x, y), 0, 0, 0),
            PixelFormat::Rgb565 => rgb565_to_argb32(self.get_565(x, y)),
            PixelFormat::Argb32 => self.get_argb32(x, y),
        }
    }
    /// Store a premultiplied `0xAARRGGBB` pixel, converting to the format
    pub fn set_pixel(&mut self, x: usize, y: usize, c: u32) {
        match self.format {
            PixelFormat::A8 => self.set_a8(x, y, get_a32(c)),
            PixelFormat::Rgb565 => self.set_565(x, y, argb32_to_565(c)),
            PixelFormat::Argb32 => self.set_argb32(x, y, c),
        }
    }
    /// Number of pixels that are not zero
    pub fn count_nonzero(&self) -> usize {
        let bpp = self.format.bpp();
        (0 .. self.height)
            .map(|y| self.row(y).chunks(bpp).filter(|p| p.iter().any(|&b| b != 0)).count())
            .sum()
    }
}

use std::ops::Index;
use std::ops::IndexMut;

impl Index<(usize,usize)> for Pixmap {
    type Output = [u8];
    fn index(&self, index: (usize, usize)) -> &[u8] {
        let i = self.offset(index.0, index.1);
        &self.data[i .. i + self.format.bpp()]
    }
}
impl IndexMut<(usize,usize)> for Pixmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut [u8] {
        let i = self.offset(index.0, index.1);
        let bpp = self.format.bpp();
        &mut self.data[i .. i + bpp]
    }
}
