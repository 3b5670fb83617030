use crate::colors;
use crate::math::mat4::DEFAULT_DEPTH_RANGE;

use super::rasterizer::Interpolation;

/// Options that stay fixed across a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub interpolation: Interpolation,
    /// Packed `0x00RRGGBB` color the backbuffer is cleared to.
    pub clear_color: u32,
    /// Upper end of the viewport's depth mapping.
    pub depth_range: f32,
    /// Outline every drawn triangle on top of the shaded result.
    pub wireframe: bool,
    pub wireframe_color: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::PerspectiveCorrect,
            clear_color: colors::BLACK,
            depth_range: DEFAULT_DEPTH_RANGE,
            wireframe: false,
            wireframe_color: colors::WIREFRAME,
        }
    }
}
