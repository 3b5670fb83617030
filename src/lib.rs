//! A CPU software rasterizer with programmable shaders.
//!
//! Triangles go through a vertex stage, perspective divide and viewport
//! transform, then a barycentric coverage test with a depth buffer and a
//! fragment stage. Everything runs on the CPU; SDL2 is only used by the
//! optional `window` feature to put finished frames on screen.
//!
//! # Quick Start
//!
//! ```no_run
//! use rastery::prelude::*;
//! use rastery::shaders::{FlatShader, FlatUniforms};
//!
//! let mesh = Mesh::from_obj("model.obj")?;
//! let camera = Camera::default();
//! let mut ctx = RenderContext::new(800, 600, RenderSettings::default());
//! let mut program = Program::with_uniforms(
//!     FlatShader,
//!     FlatUniforms { mvp: camera.view_projection(), color: Vec3::splat(255.0) },
//! );
//!
//! ctx.begin_frame();
//! ctx.draw_mesh(&mut program, &mesh);
//! let stats = ctx.end_frame();
//! # Ok::<(), rastery::LoadError>(())
//! ```

// Public API - exposed to library consumers
pub mod args;
pub mod camera;
pub mod colors;
pub mod error;
pub mod math;
pub mod mesh;
pub mod render;
pub mod shaders;
pub mod texture;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use error::LoadError;
pub use mesh::{Mesh, Vertex};
pub use render::{Interpolation, RenderContext, RenderSettings, TriangleOutcome};
pub use texture::{ChannelOrder, Texture};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rastery::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::Camera;

    // Assets
    pub use crate::error::LoadError;
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::texture::{ChannelOrder, Texture};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{
        FrameStats, Interpolation, Program, RenderContext, RenderSettings, Shader,
        TriangleOutcome, Varyings,
    };
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::{project_triangle, rasterize, ScreenVertex};
    pub use crate::render::{Backbuffer, Interpolation, Program};
    pub use crate::shaders::{FlatShader, FlatUniforms};
}
