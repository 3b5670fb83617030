//! 4D vector for homogeneous coordinates.

use std::ops::{Add, Mul, Sub};

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from a Vec3.
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Create a direction (w=0) from a Vec3. Translation does not apply to it.
    pub const fn direction(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    /// The first three components, discarding w.
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divides every component by w, giving `(x/w, y/w, z/w, 1)`.
    ///
    /// Returns `None` when w is zero or any component is not finite, so the
    /// caller can drop the primitive instead of rasterizing NaNs.
    pub fn perspective_divide(self) -> Option<Self> {
        if self.w == 0.0 || !self.w.is_finite() {
            return None;
        }
        let ndc = Self::new(self.x / self.w, self.y / self.w, self.z / self.w, 1.0);
        ndc.is_finite().then_some(ndc)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_divide_normalizes_w() {
        let clip = Vec4::new(2.0, -4.0, 1.0, 2.0);
        assert_eq!(
            clip.perspective_divide(),
            Some(Vec4::new(1.0, -2.0, 0.5, 1.0))
        );
    }

    #[test]
    fn perspective_divide_rejects_zero_w() {
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, 0.0).perspective_divide(), None);
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, f32::NAN).perspective_divide(), None);
    }
}
