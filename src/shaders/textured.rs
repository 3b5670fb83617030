use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;
use crate::render::rasterizer::{blend, Shader, Varyings};
use crate::texture::Texture;

/// Unlit diffuse texturing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureShader;

#[derive(Debug, Clone)]
pub struct TextureUniforms {
    pub mvp: Mat4,
    pub diffuse: Texture,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextureVaryings {
    pub positions: [Vec3; 3],
    pub texcoords: [Vec2; 3],
    pub uv: Vec2,
}

impl Varyings for TextureVaryings {
    fn load(&mut self, corner: usize, vertex: &Vertex) {
        self.positions[corner] = vertex.position;
        self.texcoords[corner] = vertex.texcoord;
    }

    fn interpolate(&mut self, weights: [f32; 3]) {
        self.uv = blend(&self.texcoords, weights);
    }
}

impl Shader for TextureShader {
    type Varyings = TextureVaryings;
    type Uniforms = TextureUniforms;

    fn vertex(
        &self,
        corner: usize,
        varyings: &mut TextureVaryings,
        uniforms: &TextureUniforms,
    ) -> Vec4 {
        uniforms.mvp * Vec4::point(varyings.positions[corner])
    }

    fn fragment(&self, varyings: &TextureVaryings, uniforms: &TextureUniforms) -> Vec3 {
        uniforms.diffuse.sample(varyings.uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Backbuffer, Interpolation, Program};
    use crate::texture::ChannelOrder;

    /// 2x2 RGB texture: red, green on the bottom row; blue, white on top.
    fn checker() -> Texture {
        #[rustfmt::skip]
        let data = vec![
            255, 0, 0,    0, 255, 0,
            0, 0, 255,    255, 255, 255,
        ];
        Texture::from_raw(2, 2, 3, ChannelOrder::Rgb, data).unwrap()
    }

    #[test]
    fn textured_quad_reproduces_the_texture() {
        // Two triangles covering NDC [-1, 1]^2, uv matching position
        let corner = |x: f32, y: f32| {
            Vertex::new(
                Vec3::new(x, y, 0.0),
                Vec2::new((x + 1.0) / 2.0, (y + 1.0) / 2.0),
                Vec3::ZERO,
            )
        };
        let faces = [
            [corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0)],
            [corner(-1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)],
        ];

        let mut program = Program::with_uniforms(
            TextureShader,
            TextureUniforms {
                mvp: Mat4::identity(),
                diffuse: checker(),
            },
        );
        let viewport = Mat4::viewport(0.0, 0.0, 8.0, 8.0, 255.0);
        let mut buffer = Backbuffer::new(8, 8);
        for face in &faces {
            program.load_face(face);
            crate::render::draw_triangle(
                &mut program,
                &viewport,
                &mut buffer,
                Interpolation::default(),
            );
        }

        assert_eq!(buffer.pixel(1, 1), Some(0xFF0000));
        assert_eq!(buffer.pixel(6, 1), Some(0x00FF00));
        assert_eq!(buffer.pixel(1, 6), Some(0x0000FF));
        assert_eq!(buffer.pixel(6, 6), Some(0xFFFFFF));
    }
}
