//! Programmable shader stages.
//!
//! This module provides a trait-based abstraction for the two programmable
//! stages of the pipeline, similar to how GPUs separate the fixed-function
//! rasterizer from vertex and fragment shaders.
//!
//! # Architecture
//!
//! The rasterizer handles:
//! - Perspective divide and viewport transform
//! - Bounding box computation
//! - Inside/outside testing
//! - Barycentric weights and the depth test
//!
//! The shader handles:
//! - Clip-space positions ([`Shader::vertex`])
//! - Attribute interpolation ([`Varyings::interpolate`])
//! - Texture sampling and lighting ([`Shader::fragment`])
//!
//! # Varyings
//!
//! A varyings value is per-triangle scratch space owned by a [`Program`].
//! It holds the vertex-stage inputs and outputs for each of the three
//! corners plus the interpolated fragment-stage inputs. It is reused for
//! every triangle, so each method must overwrite everything it is
//! responsible for:
//! - [`Varyings::load`] overwrites one corner's inputs,
//! - [`Shader::vertex`] overwrites that corner's outputs,
//! - [`Varyings::interpolate`] overwrites the fragment inputs.

use std::ops::{Add, Mul};

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;

/// Per-triangle shader scratch data.
pub trait Varyings {
    /// Stores the vertex-stage inputs of `corner` (0, 1 or 2).
    fn load(&mut self, corner: usize, vertex: &Vertex);

    /// Blends the three corners' vertex-stage outputs into the
    /// fragment-stage inputs.
    ///
    /// `weights` sum to 1. They are already perspective-corrected when the
    /// pipeline is configured to do so.
    fn interpolate(&mut self, weights: [f32; 3]);
}

/// A vertex stage and a fragment stage over shader-defined data.
pub trait Shader {
    type Varyings: Varyings;
    /// Values that stay constant for a whole draw call.
    type Uniforms;

    /// Computes the clip-space position of `corner`.
    ///
    /// Reads the corner's inputs from `varyings` and writes any per-vertex
    /// outputs the fragment stage needs.
    fn vertex(&self, corner: usize, varyings: &mut Self::Varyings, uniforms: &Self::Uniforms)
        -> Vec4;

    /// Computes the color of one covered pixel.
    ///
    /// Reads only the interpolated fragment inputs. Channels are expected
    /// in `0.0..=255.0` and the shader must clamp them itself.
    fn fragment(&self, varyings: &Self::Varyings, uniforms: &Self::Uniforms) -> Vec3;
}

/// Binds a shader to its varyings and uniforms.
pub struct Program<S: Shader> {
    pub shader: S,
    pub varyings: S::Varyings,
    pub uniforms: S::Uniforms,
}

impl<S: Shader> Program<S> {
    pub fn new(shader: S, varyings: S::Varyings, uniforms: S::Uniforms) -> Self {
        Self {
            shader,
            varyings,
            uniforms,
        }
    }

    /// Loads the three corners of a mesh face into the varyings.
    pub fn load_face(&mut self, face: &[Vertex; 3]) {
        for (corner, vertex) in face.iter().enumerate() {
            self.varyings.load(corner, vertex);
        }
    }
}

impl<S> Program<S>
where
    S: Shader,
    S::Varyings: Default,
{
    /// Creates a program with freshly defaulted varyings.
    pub fn with_uniforms(shader: S, uniforms: S::Uniforms) -> Self {
        Self::new(shader, S::Varyings::default(), uniforms)
    }
}

/// Weighted sum of three per-corner values.
///
/// `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
#[inline]
pub fn blend<T>(values: &[T; 3], weights: [f32; 3]) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    values[0] * weights[0] + values[1] * weights[1] + values[2] * weights[2]
}
