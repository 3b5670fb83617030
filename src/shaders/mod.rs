//! Ready-made shaders.
//!
//! Each one pairs a [`Shader`](crate::render::Shader) with its varyings and
//! uniforms. They range from a constant color up to normal and specular
//! mapped Phong lighting.

pub mod flat;
pub mod gouraud;
pub mod phong;
pub mod textured;

pub use flat::{FlatShader, FlatUniforms, FlatVaryings};
pub use gouraud::{GouraudShader, GouraudUniforms, GouraudVaryings};
pub use phong::{PhongShader, PhongUniforms, PhongVaryings, AMBIENT};
pub use textured::{TextureShader, TextureUniforms, TextureVaryings};
