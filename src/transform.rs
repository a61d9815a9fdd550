//! Transformations

use std::ops::Mul;

/// Affine transformation
///
/// Maps (x,y) to (x * sx + y * shx + tx, x * shy + y * sy + ty)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub shx: f64,
    pub shy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Transform is the identity
    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }
    /// Add a scaling to the transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.sx  *= sx;
        self.shx *= sx;
        self.tx  *= sx;
        self.sy  *= sy;
        self.shy *= sy;
        self.ty  *= sy;
    }
    /// Add a rotation to the transform
    ///
    /// angle is in radians
    pub fn rotate(&mut self, angle: f64) {
        let ca = angle.cos();
        let sa = angle.sin();
        let t0   = self.sx  * ca - self.shy * sa;
        let t2   = self.shx * ca - self.sy  * sa;
        let t4   = self.tx  * ca - self.ty  * sa;
        self.shy = self.sx  * sa + self.shy * ca;
        self.sy  = self.shx * sa + self.sy  * ca;
        self.ty  = self.tx  * sa + self.ty  * ca;
        self.sx  = t0;
        self.shx = t2;
        self.tx  = t4;
    }
    /// Perform the transform
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
    /// Transform a vector, ignoring translation
    pub fn transform_vector(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx + y * self.shx, x * self.shy + y * self.sy)
    }
    /// Length a radius takes on after the transform
    ///
    /// Geometric mean of the lengths of the two mapped axis vectors.
    pub fn map_radius(&self, radius: f64) -> f64 {
        let (x0, y0) = self.transform_vector(radius, 0.0);
        let (x1, y1) = self.transform_vector(0.0, radius);
        let d0 = (x0 * x0 + y0 * y0).sqrt();
        let d1 = (x1 * x1 + y1 * y1).sqrt();
        (d0 * d1).sqrt()
    }
    /// Apply `self` then `m`
    pub fn mul_transform(&self, m: &Transform) -> Self {
        let t0  = self.sx  * m.sx  + self.shy * m.shx;
        let t2  = self.shx * m.sx  + self.sy  * m.shx;
        let t4  = self.tx  * m.sx  + self.ty  * m.shx + m.tx;
        let shy = self.sx  * m.shy + self.shy * m.sy;
        let sy  = self.shx * m.shy + self.sy  * m.sy;
        let ty  = self.tx  * m.shy + self.ty  * m.sy + m.ty;
        Transform { sx: t0, sy, tx: t4, ty, shx: t2, shy }
    }
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        let mut t = Self::new();
        t.scale(sx, sy);
        t
    }
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        let mut t = Self::new();
        t.translate(tx, ty);
        t
    }
    pub fn new_rotate(ang: f64) -> Transform {
        let mut t = Self::new();
        t.rotate(ang);
        t
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_applies_left_first() {
        let m = Transform::new_scale(2.0, 4.0) * Transform::new_translate(3.0, -1.0);
        assert_eq!(m.transform(1.5, 2.5), (6.0, 9.0));
        assert!(!m.is_identity());
        assert!((Transform::new() * Transform::new()).is_identity());
    }

    #[test]
    fn radius_follows_uniform_scale() {
        assert_eq!(Transform::new_scale(3.0, 3.0).map_radius(2.0), 6.0);
        assert!((Transform::new_rotate(0.7).map_radius(2.0) - 2.0).abs() < 1e-12);
    }
}
