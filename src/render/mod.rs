//! The rendering pipeline.
//!
//! - [`framebuffer`]: color and depth storage with bounds-checked writes.
//! - [`rasterizer`]: projection, coverage, depth test and the shader traits.
//! - [`context`]: ties a backbuffer to a viewport and counts what each frame draws.

pub mod context;
pub mod framebuffer;
pub mod rasterizer;
pub mod settings;

pub use context::{FrameStats, RenderContext};
pub use framebuffer::{Backbuffer, CLEAR_DEPTH};
pub use rasterizer::shader;
pub use rasterizer::{
    draw_triangle, Interpolation, Program, ScreenVertex, Shader, TriangleOutcome, Varyings,
};
pub use settings::RenderSettings;
