//! Color and depth storage for one frame.
//!
//! [`Backbuffer`] owns a packed color buffer (`0x00RRGGBB` per pixel) and a
//! parallel depth buffer of the same size. Row 0 is the bottom row of the
//! image, matching the viewport transform.
//!
//! # Depth Buffer
//!
//! Depth values come from the viewport transform, which maps NDC z onto
//! `[0, depth_range]`. Larger values are closer to the camera, so a fragment
//! passes only when its depth is strictly greater than the stored one. The
//! buffer is cleared to negative infinity so that anything inside the mapped
//! range, including depth 0, can be drawn on an empty pixel.

use crate::colors;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Depth value of a pixel nothing has been drawn to yet.
pub const CLEAR_DEPTH: f32 = f32::NEG_INFINITY;

#[derive(Debug, Clone)]
pub struct Backbuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Backbuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BLACK; size],
            depth_buffer: vec![CLEAR_DEPTH; size],
            width,
            height,
        }
    }

    /// Reallocates both buffers for the new size. Previous contents are lost.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Resets every depth to [`CLEAR_DEPTH`] to prepare for a new frame.
    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(CLEAR_DEPTH);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Packs `color` and writes it at (x, y).
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Vec3) {
        self.set_pixel_raw(x, y, colors::pack_rgb(color));
    }

    /// Writes an already packed `0x00RRGGBB` word at (x, y).
    #[inline]
    pub fn set_pixel_raw(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|index| self.color_buffer[index])
    }

    #[inline]
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|index| self.depth_buffer[index])
    }

    /// Returns true if `depth` is closer than what is stored at (x, y).
    ///
    /// Closer means strictly greater. Out-of-bounds pixels and NaN depths
    /// never pass.
    #[inline]
    pub fn depth_test(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|index| depth > self.depth_buffer[index])
    }

    #[inline]
    pub fn write_depth(&mut self, x: i32, y: i32, depth: f32) {
        if let Some(index) = self.index(x, y) {
            self.depth_buffer[index] = depth;
        }
    }

    pub fn colors(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes, for handing to a presentation surface.
    ///
    /// On little-endian targets each pixel reads as B, G, R, 0.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8, and the
        // byte length covers exactly the initialized u32 elements.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Draws a line between two screen points using Bresenham's algorithm.
    ///
    /// The segment is first clipped to the buffer, so far off-screen
    /// endpoints cost no more than on-screen ones. Endpoints are then
    /// truncated to whole pixels. The line ignores and leaves the depth
    /// buffer untouched, so it always lands on top.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32) {
        if !from.is_finite() || !to.is_finite() || self.width == 0 || self.height == 0 {
            return;
        }
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let Some((start, end)) = clip_segment(from, to, max_x, max_y) else {
            return;
        };

        let (x0, y0) = (start.0 as i64, start.1 as i64);
        let (x1, y1) = (end.0 as i64, end.1 as i64);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };

        // Positive error favours stepping in x, negative in y
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel_raw(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += step_x;
            }
            if e2 < dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Outlines a triangle given its screen-space corners.
    pub fn draw_triangle_wireframe(&mut self, corners: [Vec2; 3], color: u32) {
        let [a, b, c] = corners;
        self.draw_line(a, b, color);
        self.draw_line(b, c, color);
        self.draw_line(c, a, color);
    }
}

/// Clips the segment `from..to` to `[0, max_x] x [0, max_y]` (Liang-Barsky).
///
/// Works in `f64` so endpoints far outside the buffer still land on the
/// right pixel. Returns `None` when no part of the segment is inside.
fn clip_segment(
    from: Vec2,
    to: Vec2,
    max_x: f64,
    max_y: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let mut t_enter = 0.0f64;
    let mut t_exit = 1.0f64;

    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t_exit {
                return None;
            }
            t_enter = t_enter.max(r);
        } else {
            if r < t_enter {
                return None;
            }
            t_exit = t_exit.min(r);
        }
    }

    let at = |t: f64| ((x0 + dx * t).clamp(0.0, max_x), (y0 + dy * t).clamp(0.0, max_y));
    Some((at(t_enter), at(t_exit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_cleared() {
        let buffer = Backbuffer::new(4, 3);
        assert_eq!(buffer.colors().len(), 12);
        assert!(buffer.colors().iter().all(|&c| c == colors::BLACK));
        assert!(buffer.depths().iter().all(|&d| d == CLEAR_DEPTH));
    }

    #[test]
    fn set_pixel_packs_rgb() {
        let mut buffer = Backbuffer::new(2, 2);
        buffer.set_pixel(1, 0, Vec3::new(255.0, 128.0, 1.0));
        assert_eq!(buffer.pixel(1, 0), Some(0xFF8001));
        assert_eq!(buffer.colors()[1], 0xFF8001);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buffer = Backbuffer::new(2, 2);
        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2), (i32::MAX, i32::MIN)] {
            buffer.set_pixel(x, y, Vec3::splat(255.0));
            buffer.write_depth(x, y, 1.0);
            assert_eq!(buffer.pixel(x, y), None);
            assert!(!buffer.depth_test(x, y, 1.0));
        }
        assert!(buffer.colors().iter().all(|&c| c == colors::BLACK));
        assert!(buffer.depths().iter().all(|&d| d == CLEAR_DEPTH));
    }

    #[test]
    fn depth_test_requires_strictly_greater() {
        let mut buffer = Backbuffer::new(1, 1);
        assert!(buffer.depth_test(0, 0, 0.0));
        buffer.write_depth(0, 0, 10.0);
        assert!(!buffer.depth_test(0, 0, 10.0));
        assert!(!buffer.depth_test(0, 0, 9.0));
        assert!(!buffer.depth_test(0, 0, f32::NAN));
        assert!(buffer.depth_test(0, 0, 10.5));
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut buffer = Backbuffer::new(2, 2);
        buffer.set_pixel_raw(0, 0, colors::WHITE);
        buffer.resize(3, 5);
        assert_eq!((buffer.width(), buffer.height()), (3, 5));
        assert_eq!(buffer.colors().len(), 15);
        assert_eq!(buffer.depths().len(), 15);
        assert_eq!(buffer.pixel(0, 0), Some(colors::BLACK));
    }

    #[test]
    fn as_bytes_covers_every_pixel() {
        let buffer = Backbuffer::new(3, 2);
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut buffer = Backbuffer::new(8, 8);
        buffer.draw_line(Vec2::new(1.0, 1.0), Vec2::new(6.0, 4.0), colors::WHITE);
        assert_eq!(buffer.pixel(1, 1), Some(colors::WHITE));
        assert_eq!(buffer.pixel(6, 4), Some(colors::WHITE));
        let lit = buffer.colors().iter().filter(|&&c| c == colors::WHITE).count();
        // One pixel per step along the major axis
        assert_eq!(lit, 6);
    }

    #[test]
    fn far_off_screen_endpoints_are_clipped() {
        let mut buffer = Backbuffer::new(16, 16);
        // Horizontal line through y = 3 with endpoints billions of pixels away
        buffer.draw_line(Vec2::new(-3.0e9, 3.5), Vec2::new(5.0e12, 3.5), colors::WHITE);
        for x in 0..16 {
            assert_eq!(buffer.pixel(x, 3), Some(colors::WHITE), "pixel ({x}, 3)");
        }
        let lit = buffer.colors().iter().filter(|&&c| c == colors::WHITE).count();
        assert_eq!(lit, 16);

        // Entirely outside: nothing drawn, no panic
        buffer.clear(colors::BLACK);
        buffer.draw_line(Vec2::new(1.0e12, -2.0e11), Vec2::new(3.0e12, -1.0e9), colors::WHITE);
        assert!(buffer.colors().iter().all(|&c| c == colors::BLACK));
    }

    #[test]
    fn wireframe_with_a_huge_corner_stays_in_bounds() {
        let mut buffer = Backbuffer::new(16, 16);
        buffer.draw_triangle_wireframe(
            [Vec2::new(0.0, 0.0), Vec2::new(8.0e9, 1.6e9), Vec2::new(0.0, 15.0)],
            colors::WIREFRAME,
        );
        assert_eq!(buffer.pixel(0, 0), Some(colors::WIREFRAME));
        assert_eq!(buffer.pixel(0, 15), Some(colors::WIREFRAME));
    }

    #[test]
    fn wireframe_leaves_interior_untouched() {
        let mut buffer = Backbuffer::new(16, 16);
        buffer.draw_triangle_wireframe(
            [Vec2::new(1.0, 1.0), Vec2::new(14.0, 1.0), Vec2::new(1.0, 14.0)],
            colors::WIREFRAME,
        );
        assert_eq!(buffer.pixel(1, 1), Some(colors::WIREFRAME));
        assert_eq!(buffer.pixel(4, 4), Some(colors::BLACK));
    }
}
