use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;
use crate::render::rasterizer::{Shader, Varyings};

/// Fills every covered pixel with one color.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatShader;

#[derive(Debug, Clone, Copy)]
pub struct FlatUniforms {
    pub mvp: Mat4,
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlatVaryings {
    pub positions: [Vec3; 3],
}

impl Varyings for FlatVaryings {
    fn load(&mut self, corner: usize, vertex: &Vertex) {
        self.positions[corner] = vertex.position;
    }

    fn interpolate(&mut self, _weights: [f32; 3]) {}
}

impl Shader for FlatShader {
    type Varyings = FlatVaryings;
    type Uniforms = FlatUniforms;

    fn vertex(&self, corner: usize, varyings: &mut FlatVaryings, uniforms: &FlatUniforms) -> Vec4 {
        uniforms.mvp * Vec4::point(varyings.positions[corner])
    }

    fn fragment(&self, _varyings: &FlatVaryings, uniforms: &FlatUniforms) -> Vec3 {
        uniforms.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;

    #[test]
    fn vertex_applies_mvp() {
        let uniforms = FlatUniforms {
            mvp: Mat4::translation(1.0, 2.0, 3.0),
            color: Vec3::ONE,
        };
        let mut varyings = FlatVaryings::default();
        varyings.load(2, &Vertex::new(Vec3::new(1.0, 1.0, 1.0), Vec2::ZERO, Vec3::UP));

        let clip = FlatShader.vertex(2, &mut varyings, &uniforms);
        assert_eq!(clip, Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(FlatShader.fragment(&varyings, &uniforms), Vec3::ONE);
    }
}
