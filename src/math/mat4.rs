//! 4x4 transformation matrix.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! The camera helpers here ([`Mat4::look_at`], [`Mat4::projection`],
//! [`Mat4::viewport`]) are right-handed: the camera looks down -Z and the
//! viewport maps NDC +Y to increasing row index, so row 0 is the bottom
//! of the image.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// Depth range the viewport maps NDC z onto.
pub const DEFAULT_DEPTH_RANGE: f32 = 255.0;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a right-handed view matrix looking from `eye` towards `centre`.
    ///
    /// The basis is `z = normalize(eye - centre)`, `x = normalize(up × z)`,
    /// `y = normalize(z × x)`. The basis rows are composed with a translation
    /// by `-centre`, so `centre` lands on the origin of view space.
    ///
    /// `eye == centre` or `up` parallel to the view direction produce NaNs.
    pub fn look_at(eye: Vec3, centre: Vec3, up: Vec3) -> Self {
        let z = (eye - centre).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x).normalize();

        let basis = Self::new([
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [z.x, z.y, z.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        basis * Self::translation(-centre.x, -centre.y, -centre.z)
    }

    /// Simple perspective: identity with `coeff` at row 3, column 2.
    ///
    /// After multiplication `w = 1 + coeff * z`, so dividing by w shrinks
    /// points that are further away. The usual choice is
    /// `coeff = -1 / distance(eye, centre)`.
    pub fn projection(coeff: f32) -> Self {
        let mut m = Self::identity();
        m.data[3][2] = coeff;
        m
    }

    /// Maps NDC `[-1,1]^3` onto the screen rectangle `[x, x+w] × [y, y+h]`
    /// and the depth range `[0, depth]`.
    pub fn viewport(x: f32, y: f32, w: f32, h: f32, depth: f32) -> Self {
        Mat4::new([
            [w / 2.0, 0.0, 0.0, x + w / 2.0],
            [0.0, h / 2.0, 0.0, y + h / 2.0],
            [0.0, 0.0, depth / 2.0, depth / 2.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Computes the inverse of the matrix, if it exists.
    /// Returns `None` if the matrix is singular (determinant is zero).
    pub fn inverse(&self) -> Option<Mat4> {
        let m = &self.data;

        // 2x2 minors of the top two rows
        let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
        let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
        let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
        let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
        let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
        let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

        // 2x2 minors of the bottom two rows
        let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        if det.abs() < f32::EPSILON || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;

        Some(Mat4::new([
            [
                (m[1][1] * c5 - m[1][2] * c4 + m[1][3] * c3) * inv_det,
                (-m[0][1] * c5 + m[0][2] * c4 - m[0][3] * c3) * inv_det,
                (m[3][1] * s5 - m[3][2] * s4 + m[3][3] * s3) * inv_det,
                (-m[2][1] * s5 + m[2][2] * s4 - m[2][3] * s3) * inv_det,
            ],
            [
                (-m[1][0] * c5 + m[1][2] * c2 - m[1][3] * c1) * inv_det,
                (m[0][0] * c5 - m[0][2] * c2 + m[0][3] * c1) * inv_det,
                (-m[3][0] * s5 + m[3][2] * s2 - m[3][3] * s1) * inv_det,
                (m[2][0] * s5 - m[2][2] * s2 + m[2][3] * s1) * inv_det,
            ],
            [
                (m[1][0] * c4 - m[1][1] * c2 + m[1][3] * c0) * inv_det,
                (-m[0][0] * c4 + m[0][1] * c2 - m[0][3] * c0) * inv_det,
                (m[3][0] * s4 - m[3][1] * s2 + m[3][3] * s0) * inv_det,
                (-m[2][0] * s4 + m[2][1] * s2 - m[2][3] * s0) * inv_det,
            ],
            [
                (-m[1][0] * c3 + m[1][1] * c1 - m[1][2] * c0) * inv_det,
                (m[0][0] * c3 - m[0][1] * c1 + m[0][2] * c0) * inv_det,
                (-m[3][0] * s3 + m[3][1] * s1 - m[3][2] * s0) * inv_det,
                (m[2][0] * s3 - m[2][1] * s1 + m[2][2] * s0) * inv_det,
            ],
        ]))
    }

    /// Inverse first, then transpose. This is the matrix that carries
    /// normals through a transform that may scale non-uniformly.
    pub fn inverse_transpose(&self) -> Option<Mat4> {
        self.inverse().map(|inv| inv.transpose())
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, value) in out.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: `result[i] = Σ_j M[i][j] * v[j]`.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: [f32; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vec4::new(
            row(self.data[0]),
            row(self.data[1]),
            row(self.data[2]),
            row(self.data[3]),
        )
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Applies perspective division if w != 1.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let p = self * Vec4::point(v);
        if p.w != 0.0 && p.w != 1.0 {
            p.xyz() / p.w
        } else {
            p.xyz()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn multiply_is_not_commutative() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scaling(2.0, 2.0, 2.0);
        assert_ne!(t * s, s * t);
        // Scale first, then translate
        assert_eq!((t * s) * Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn multiply_is_associative() {
        let a = Mat4::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::UP);
        let b = Mat4::translation(1.0, 2.0, 3.0);
        let c = Mat4::projection(-0.25);
        assert_mat_eq((a * b) * c, a * (b * c));
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = Mat4::translation(1.0, -2.0, 3.0)
            * Mat4::look_at(Vec3::new(-2.0, 1.0, 4.0), Vec3::ZERO, Vec3::UP)
            * Mat4::scaling(2.0, 0.5, 3.0);
        let inv = m.inverse().expect("matrix is invertible");
        assert_mat_eq(m * inv, Mat4::identity());
        assert_mat_eq(inv * m, Mat4::identity());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert_eq!(Mat4::scaling(1.0, 0.0, 1.0).inverse(), None);
    }

    #[test]
    fn inverse_transpose_is_inverse_then_transpose() {
        let m = Mat4::translation(4.0, 5.0, 6.0) * Mat4::scaling(1.0, 2.0, 4.0);
        let expected = m.inverse().unwrap().transpose();
        assert_eq!(m.inverse_transpose(), Some(expected));
        // The other order leaves translation in the bottom row, not the last column
        assert_relative_eq!(expected.get(3, 0), -4.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_moves_centre_to_origin() {
        let eye = Vec3::new(1.0, 1.0, 3.0);
        let centre = Vec3::new(0.5, 0.0, -1.0);
        let view = Mat4::look_at(eye, centre, Vec3::UP);

        let c = view * centre;
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(c.z, 0.0, epsilon = 1e-5);

        // The eye sits on +Z in view space at its distance from the centre
        let e = view * eye;
        assert_relative_eq!(e.z, (eye - centre).magnitude(), epsilon = 1e-5);
    }

    #[test]
    fn projection_only_touches_w_row() {
        let p = Mat4::projection(-0.5);
        let v = p * Vec4::new(1.0, 2.0, 4.0, 1.0);
        assert_eq!(v, Vec4::new(1.0, 2.0, 4.0, -1.0));
    }

    #[test]
    fn viewport_maps_ndc_corners() {
        let vp = Mat4::viewport(0.0, 0.0, 800.0, 600.0, DEFAULT_DEPTH_RANGE);
        assert_eq!(vp * Vec3::new(-1.0, -1.0, -1.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(vp * Vec3::new(1.0, 1.0, 1.0), Vec3::new(800.0, 600.0, 255.0));
    }

    #[test]
    fn viewport_round_trips_through_inverse() {
        let vp = Mat4::viewport(10.0, 20.0, 640.0, 480.0, DEFAULT_DEPTH_RANGE);
        let inv = vp.inverse().expect("viewport is invertible");

        for p in [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(0.25, -0.5, 0.0),
            Vec3::new(0.9, 0.3, 0.75),
            Vec3::new(1.0, 1.0, 1.0),
        ] {
            let back = inv * (vp * p);
            assert_relative_eq!(back.x, p.x, epsilon = 1e-5);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-5);
            assert_relative_eq!(back.z, p.z, epsilon = 1e-5);
        }
    }
}
