//! Colors

use crate::math::multiply_u8;

/// Color as Red, Green, Blue, and Alpha, not premultiplied
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Color is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
    /// Premultiply the color components by alpha
    ///
    ///     use edgefill::Rgba8;
    ///
    ///     let c = Rgba8::new(255, 128, 0, 128).premultiply();
    ///     assert_eq!(c.to_argb32(), 0x8080_4000);
    ///
    pub fn premultiply(&self) -> PremultipliedColor {
        PremultipliedColor {
            r: multiply_u8(self.r, self.a),
            g: multiply_u8(self.g, self.a),
            b: multiply_u8(self.b, self.a),
            a: self.a,
        }
    }
}

/// Color with components already multiplied by alpha
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct PremultipliedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PremultipliedColor {
    /// Pack as `0xAARRGGBB`
    pub fn to_argb32(&self) -> u32 {
        crate::pixfmt::pack_argb32(self.a, self.r, self.g, self.b)
    }
    /// Unpack from `0xAARRGGBB`
    pub fn from_argb32(c: u32) -> Self {
        let (a, r, g, b) = crate::pixfmt::unpack_argb32(c);
        Self { r, g, b, a }
    }
    /// Undo premultiplication
    pub fn demultiply(&self) -> Rgba8 {
        if self.a == 0 {
            return Rgba8::transparent();
        }
        let un = |c: u8| ((u32::from(c) * 255 + u32::from(self.a) / 2) / u32::from(self.a)).min(255) as u8;
        Rgba8::new(un(self.r), un(self.g), un(self.b), self.a)
    }
}

impl From<Rgba8> for PremultipliedColor {
    fn from(c: Rgba8) -> Self {
        c.premultiply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiply_round_trip() {
        let c = Rgba8::new(200, 100, 50, 255);
        assert_eq!(c.premultiply().demultiply(), c);
        assert_eq!(Rgba8::new(9, 9, 9, 0).premultiply().to_argb32(), 0);
    }
}
