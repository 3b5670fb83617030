//! Pixel word packing.
//!
//! The backbuffer stores one `u32` per pixel laid out as `0x00RRGGBB`.
//! Shaders work with [`Vec3`] colors whose channels are in `0.0..=255.0`.

use crate::math::vec3::Vec3;

pub const BLACK: u32 = 0x000000;
pub const WHITE: u32 = 0xFFFFFF;
pub const WIREFRAME: u32 = 0x00FF00;

/// Packs an RGB triple into `0x00RRGGBB`.
///
/// Channels are truncated toward zero. Values outside `0..=255` saturate and
/// NaN becomes 0; shaders are expected to clamp on their own.
#[inline]
pub fn pack_rgb(color: Vec3) -> u32 {
    let r = color.r() as u8 as u32;
    let g = color.g() as u8 as u32;
    let b = color.b() as u8 as u32;
    (r << 16) | (g << 8) | b
}

/// Splits `0x00RRGGBB` back into an RGB triple in `0.0..=255.0`.
#[inline]
pub fn unpack_rgb(word: u32) -> Vec3 {
    Vec3::new(
        ((word >> 16) & 0xFF) as f32,
        ((word >> 8) & 0xFF) as f32,
        (word & 0xFF) as f32,
    )
}
