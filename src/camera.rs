//! Look-at camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive towards the viewer (the camera looks down -Z)
//!
//! The camera is described by where it sits (`eye`), what it looks at
//! (`centre`) and which way is up. The projection strength is derived from
//! the eye-to-centre distance, so moving the eye closer also increases the
//! perspective.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub centre: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 3.0), Vec3::ZERO, Vec3::UP)
    }
}

impl Camera {
    pub fn new(eye: Vec3, centre: Vec3, up: Vec3) -> Self {
        Self { eye, centre, up }
    }

    /// Creates a camera at `eye` looking at the origin with +Y up.
    pub fn looking_at_origin(eye: Vec3) -> Self {
        Self::new(eye, Vec3::ZERO, Vec3::UP)
    }

    /// Distance from the eye to the point being looked at.
    pub fn distance(&self) -> f32 {
        (self.centre - self.eye).magnitude()
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World to camera space. `centre` maps to the origin.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.centre, self.up)
    }

    /// Single-coefficient perspective with `coeff = -1 / distance`.
    ///
    /// Returns the identity (orthographic) when the eye sits on the centre.
    pub fn projection(&self) -> Mat4 {
        let distance = self.distance();
        if distance > f32::EPSILON {
            Mat4::projection(-1.0 / distance)
        } else {
            Mat4::identity()
        }
    }

    /// `projection * view`, ready to be used as a shader's mvp for a mesh
    /// with no model transform.
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn view_moves_centre_to_origin() {
        let camera = Camera::default();
        let centre = camera.view() * camera.centre;
        assert_relative_eq!(centre.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(centre.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(centre.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn eye_ends_up_on_positive_z() {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 0.0, 5.0));
        let eye = camera.view() * camera.eye;
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn projection_uses_inverse_distance() {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 0.0, 4.0));
        assert_relative_eq!(camera.projection().get(3, 2), -0.25);
        assert_eq!(Camera::looking_at_origin(Vec3::ZERO).projection(), Mat4::identity());
    }

    #[test]
    fn nearer_points_get_smaller_w() {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 0.0, 3.0));
        let vp = camera.view_projection();
        let near = vp * Vec4::new(0.0, 0.0, 1.0, 1.0);
        let far = vp * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!(near.w < far.w);
        assert!(near.w > 0.0);
    }
}
