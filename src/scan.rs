//! Scanlines
//!
//! A [Scanline] collects the spans of one row produced by the scan
//! converter before they are handed to a blitter.

/// Horizontal run of pixels with per pixel coverage
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Span {
    /// First pixel
    pub x: i32,
    /// Number of pixels
    pub len: i32,
    /// Coverage of each pixel, `len` values
    pub covers: Vec<u8>,
}

impl Span {
    /// Every pixel of the span is fully covered
    pub fn is_solid(&self) -> bool {
        self.covers.iter().all(|&c| c == 255)
    }
}

/// Spans of a single row
#[derive(Debug, Default, Clone)]
pub struct Scanline {
    /// x of the last pixel added, used to merge touching spans
    last_x: i32,
    pub spans: Vec<Span>,
    pub y: i32,
}

const LAST_X: i32 = 0x7FFF_FFF0;

impl Scanline {
    pub fn new() -> Self {
        Self { last_x: LAST_X, y: 0, spans: vec![] }
    }
    /// Drop all spans, keeping the row
    pub fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.spans.clear();
    }
    /// Set the row the spans belong to
    pub fn finalize(&mut self, y: i32) {
        self.y = y;
    }
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    /// Add `len` pixels starting at `x` with the same coverage
    ///
    /// Spans must be added left to right; a span starting right after the
    /// previous one extends it.
    pub fn add_span(&mut self, x: i32, len: i32, cover: u8) {
        if len <= 0 {
            return;
        }
        match self.spans.last_mut() {
            Some(cur) if x == self.last_x + 1 => {
                cur.len += len;
                cur.covers.extend(std::iter::repeat(cover).take(len as usize));
            }
            _ => {
                let span = Span { x, len, covers: vec![cover; len as usize] };
                self.spans.push(span);
            }
        }
        self.last_x = x + len - 1;
    }
    /// Total number of pixels in all spans
    pub fn pixel_count(&self) -> usize {
        self.spans.iter().map(|s| s.len as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spans_merge() {
        let mut sl = Scanline::new();
        sl.add_span(2, 3, 255);
        sl.add_span(5, 1, 128);
        sl.add_span(8, 2, 255);
        assert_eq!(sl.num_spans(), 2);
        assert_eq!(sl.spans[0].covers, vec![255, 255, 255, 128]);
        assert!(!sl.spans[0].is_solid());
        assert!(sl.spans[1].is_solid());
        assert_eq!(sl.pixel_count(), 6);
    }
}
