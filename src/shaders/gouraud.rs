//! Per-vertex diffuse lighting.
//!
//! Intensity `max(0, n·l)` is evaluated once per corner in the vertex stage
//! and blended across the face, so lighting detail is limited to the mesh
//! resolution.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;
use crate::render::rasterizer::{blend, Shader, Varyings};

#[derive(Debug, Clone, Copy, Default)]
pub struct GouraudShader;

#[derive(Debug, Clone, Copy)]
pub struct GouraudUniforms {
    pub mvp: Mat4,
    /// Direction towards the light in model space. Need not be normalized.
    pub light: Vec3,
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GouraudVaryings {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub intensities: [f32; 3],
    pub intensity: f32,
}

impl Varyings for GouraudVaryings {
    fn load(&mut self, corner: usize, vertex: &Vertex) {
        self.positions[corner] = vertex.position;
        self.normals[corner] = vertex.normal;
    }

    fn interpolate(&mut self, weights: [f32; 3]) {
        self.intensity = blend(&self.intensities, weights);
    }
}

impl Shader for GouraudShader {
    type Varyings = GouraudVaryings;
    type Uniforms = GouraudUniforms;

    fn vertex(
        &self,
        corner: usize,
        varyings: &mut GouraudVaryings,
        uniforms: &GouraudUniforms,
    ) -> Vec4 {
        // Missing or zero normals leave the corner unlit
        let intensity = match (
            varyings.normals[corner].try_normalize(),
            uniforms.light.try_normalize(),
        ) {
            (Some(normal), Some(light)) => normal.dot(light).max(0.0),
            _ => 0.0,
        };
        varyings.intensities[corner] = intensity;
        uniforms.mvp * Vec4::point(varyings.positions[corner])
    }

    fn fragment(&self, varyings: &GouraudVaryings, uniforms: &GouraudUniforms) -> Vec3 {
        (uniforms.color * varyings.intensity).min_scalar(255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use approx::assert_relative_eq;

    fn run(normal: Vec3, light: Vec3) -> Vec3 {
        let uniforms = GouraudUniforms {
            mvp: Mat4::identity(),
            light,
            color: Vec3::new(200.0, 100.0, 50.0),
        };
        let mut varyings = GouraudVaryings::default();
        for corner in 0..3 {
            varyings.load(corner, &Vertex::new(Vec3::ZERO, Vec2::ZERO, normal));
            GouraudShader.vertex(corner, &mut varyings, &uniforms);
        }
        varyings.interpolate([0.2, 0.3, 0.5]);
        GouraudShader.fragment(&varyings, &uniforms)
    }

    #[test]
    fn facing_the_light_gives_full_color() {
        let color = run(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(color.r(), 200.0, epsilon = 1e-3);
        assert_relative_eq!(color.b(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn facing_away_is_black() {
        assert_eq!(run(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0)), Vec3::ZERO);
        assert_eq!(run(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)), Vec3::ZERO);
    }

    #[test]
    fn oblique_light_scales_by_cosine() {
        let color = run(Vec3::UP, Vec3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(color.r(), 200.0 * std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-3);
    }
}
