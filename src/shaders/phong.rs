//! Normal-mapped Phong lighting.
//!
//! The fragment stage samples three maps at the interpolated texture
//! coordinate:
//! - the diffuse map gives the base color,
//! - the normal map gives a surface normal encoded as `rgb / 255 * 2 - 1`,
//! - the blue channel of the specular map is the shininess exponent.
//!
//! ```text
//! n     = normalize(inverse_transpose(mvp) * decode(normal_map))
//! l     = normalize(mvp * light)
//! r     = normalize(2n(n·l) - l)
//! s     = max(r.z, 0) ^ specular_map.b
//! color = min(255, 5 + diffuse * (max(n·l, 0) + 0.6 * s))
//! ```

use log::warn;

use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;
use crate::render::rasterizer::{blend, Shader, Varyings};
use crate::texture::Texture;

/// Base light added to every channel, and the color returned when the
/// lighting inputs are degenerate.
pub const AMBIENT: f32 = 5.0;
const SPECULAR_WEIGHT: f32 = 0.6;

#[derive(Debug, Clone, Copy, Default)]
pub struct PhongShader;

#[derive(Debug, Clone)]
pub struct PhongUniforms {
    pub mvp: Mat4,
    /// Inverse-transpose of `mvp`, used to carry normals.
    pub mvp_inverse_transpose: Mat4,
    /// Light position in model space.
    pub light: Vec3,
    pub diffuse: Texture,
    pub normal_map: Texture,
    pub specular_map: Texture,
}

impl PhongUniforms {
    /// Builds the uniforms and derives the normal matrix from `mvp`.
    ///
    /// A singular `mvp` falls back to the identity for normals.
    pub fn new(
        mvp: Mat4,
        light: Vec3,
        diffuse: Texture,
        normal_map: Texture,
        specular_map: Texture,
    ) -> Self {
        let mvp_inverse_transpose = mvp.inverse_transpose().unwrap_or_else(|| {
            warn!("mvp is singular, normals will not be transformed");
            Mat4::identity()
        });
        Self {
            mvp,
            mvp_inverse_transpose,
            light,
            diffuse,
            normal_map,
            specular_map,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhongVaryings {
    pub positions: [Vec3; 3],
    pub texcoords: [Vec2; 3],
    pub uv: Vec2,
}

impl Varyings for PhongVaryings {
    fn load(&mut self, corner: usize, vertex: &Vertex) {
        self.positions[corner] = vertex.position;
        self.texcoords[corner] = vertex.texcoord;
    }

    fn interpolate(&mut self, weights: [f32; 3]) {
        self.uv = blend(&self.texcoords, weights);
    }
}

impl Shader for PhongShader {
    type Varyings = PhongVaryings;
    type Uniforms = PhongUniforms;

    fn vertex(&self, corner: usize, varyings: &mut PhongVaryings, uniforms: &PhongUniforms) -> Vec4 {
        uniforms.mvp * Vec4::point(varyings.positions[corner])
    }

    fn fragment(&self, varyings: &PhongVaryings, uniforms: &PhongUniforms) -> Vec3 {
        let uv = varyings.uv;

        let encoded = uniforms.normal_map.sample(uv);
        let decoded = encoded / 255.0 * 2.0 - Vec3::ONE;
        let normal = (uniforms.mvp_inverse_transpose * Vec4::direction(decoded))
            .xyz()
            .try_normalize();
        let light = (uniforms.mvp * Vec4::point(uniforms.light))
            .xyz()
            .try_normalize();
        let (Some(normal), Some(light)) = (normal, light) else {
            return Vec3::splat(AMBIENT);
        };

        let intensity = normal.dot(light);
        let reflected = (normal * (2.0 * intensity) - light)
            .try_normalize()
            .unwrap_or(Vec3::ZERO);

        let shininess = uniforms.specular_map.sample(uv).b();
        let specular = reflected.z.max(0.0).powf(shininess);
        let diffuse = intensity.max(0.0);

        let color = uniforms.diffuse.sample(uv);
        (Vec3::splat(AMBIENT) + color * (diffuse + SPECULAR_WEIGHT * specular)).min_scalar(255.0)
    }
}
