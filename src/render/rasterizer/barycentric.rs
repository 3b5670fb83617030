//! Barycentric coverage test.
//!
//! A point P is written relative to triangle ABC as
//!
//! ```text
//! P = A + s*(B - A) + t*(C - A)
//! ```
//!
//! Solving the 2x2 system with Cramer's rule gives
//!
//! ```text
//! denom = AB.x*AC.y - AB.y*AC.x
//! s     = (AC.y*AP.x - AC.x*AP.y) / denom
//! t     = (AB.x*AP.y - AB.y*AP.x) / denom
//! ```
//!
//! `denom` is twice the signed area of the triangle. When it is zero the three
//! points are collinear and no pixel can be inside.
//!
//! P is inside (edges included) when `s >= 0`, `t >= 0` and `s + t <= 1`.
//! The full weights are `(1 - s - t, s, t)` for A, B and C respectively.

use crate::math::vec2::Vec2;

/// A screen-space triangle prepared for repeated barycentric queries.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSetup {
    a: Vec2,
    ab: Vec2,
    ac: Vec2,
    denom: f32,
}

impl TriangleSetup {
    /// Returns `None` for a degenerate (zero-area) triangle.
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let ab = b - a;
        let ac = c - a;
        let denom = ab.perp_dot(ac);
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }
        Some(Self { a, ab, ac, denom })
    }

    /// Signed double area; positive for counter-clockwise winding.
    pub fn double_area(&self) -> f32 {
        self.denom
    }

    /// The `(s, t)` coordinates of `p`.
    #[inline]
    pub fn coordinates(&self, p: Vec2) -> (f32, f32) {
        let ap = p - self.a;
        let s = (self.ac.y * ap.x - self.ac.x * ap.y) / self.denom;
        let t = (self.ab.x * ap.y - self.ab.y * ap.x) / self.denom;
        (s, t)
    }

    /// The three weights `(1 - s - t, s, t)` of `p`, or `None` when `p` is
    /// outside the triangle.
    #[inline]
    pub fn weights(&self, p: Vec2) -> Option<[f32; 3]> {
        let (s, t) = self.coordinates(p);
        is_inside(s, t).then_some([1.0 - s - t, s, t])
    }
}

/// Inclusive inside test on barycentric coordinates.
#[inline]
pub fn is_inside(s: f32, t: f32) -> bool {
    s >= 0.0 && t >= 0.0 && s + t <= 1.0
}

/// One-shot form of [`TriangleSetup::coordinates`].
///
/// Returns `None` when the triangle is degenerate.
pub fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<(f32, f32)> {
    TriangleSetup::new(a, b, c).map(|setup| setup.coordinates(p))
}
