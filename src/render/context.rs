//! Frame-level state: the backbuffer, the viewport and per-frame counters.

use log::debug;

use super::framebuffer::Backbuffer;
use super::rasterizer::{self, Program, Shader, TriangleOutcome};
use super::settings::RenderSettings;
use crate::math::mat4::Mat4;
use crate::mesh::Mesh;

/// Counters collected between [`RenderContext::begin_frame`] and
/// [`RenderContext::end_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles submitted.
    pub triangles: u32,
    /// Triangles that reached the pixel loop.
    pub drawn: u32,
    pub degenerate: u32,
    pub invalid: u32,
    /// Pixels covered by some triangle, before the depth test.
    pub fragments_covered: u64,
    /// Pixels that passed the depth test and were shaded.
    pub fragments_written: u64,
}

impl FrameStats {
    pub fn record(&mut self, outcome: TriangleOutcome) {
        self.triangles += 1;
        match outcome {
            TriangleOutcome::Drawn { covered, written } => {
                self.drawn += 1;
                self.fragments_covered += u64::from(covered);
                self.fragments_written += u64::from(written);
            }
            TriangleOutcome::Degenerate => self.degenerate += 1,
            TriangleOutcome::InvalidVertex => self.invalid += 1,
        }
    }
}

/// Owns everything a draw call mutates.
///
/// Drawing needs `&mut self`, so the buffers can only be reallocated
/// between draws, never during one.
pub struct RenderContext {
    backbuffer: Backbuffer,
    viewport: Mat4,
    settings: RenderSettings,
    stats: FrameStats,
}

impl RenderContext {
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> Self {
        Self {
            backbuffer: Backbuffer::new(width, height),
            viewport: Self::viewport_for(width, height, settings.depth_range),
            settings,
            stats: FrameStats::default(),
        }
    }

    fn viewport_for(width: u32, height: u32, depth_range: f32) -> Mat4 {
        Mat4::viewport(0.0, 0.0, width as f32, height as f32, depth_range)
    }

    /// Reallocates the backbuffer and recomputes the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(
            "resizing backbuffer {}x{} -> {}x{}",
            self.backbuffer.width(),
            self.backbuffer.height(),
            width,
            height
        );
        self.backbuffer.resize(width, height);
        self.viewport = Self::viewport_for(width, height, self.settings.depth_range);
    }

    /// Clears color and depth and resets the frame counters.
    pub fn begin_frame(&mut self) {
        self.backbuffer.clear(self.settings.clear_color);
        self.backbuffer.clear_depth();
        self.stats = FrameStats::default();
    }

    /// Draws the triangle whose corners are currently loaded in `program`.
    pub fn draw<S: Shader>(&mut self, program: &mut Program<S>) -> TriangleOutcome {
        let outcome = match rasterizer::project_triangle(program, &self.viewport) {
            Some(screen) => {
                let outcome = rasterizer::rasterize(
                    &screen,
                    program,
                    &mut self.backbuffer,
                    self.settings.interpolation,
                );
                if self.settings.wireframe && outcome != TriangleOutcome::Degenerate {
                    self.backbuffer.draw_triangle_wireframe(
                        screen.map(|vertex| vertex.xy()),
                        self.settings.wireframe_color,
                    );
                }
                outcome
            }
            None => TriangleOutcome::InvalidVertex,
        };
        self.stats.record(outcome);
        outcome
    }

    /// Loads and draws every face of `mesh` with the same program.
    pub fn draw_mesh<S: Shader>(&mut self, program: &mut Program<S>, mesh: &Mesh) {
        for face in mesh.faces() {
            program.load_face(face);
            self.draw(program);
        }
    }

    /// Finishes the frame and returns what was drawn.
    pub fn end_frame(&mut self) -> FrameStats {
        let stats = self.stats;
        debug!(
            "frame: {} triangle(s), {} drawn, {} degenerate, {} invalid, {} fragment(s) written",
            stats.triangles, stats.drawn, stats.degenerate, stats.invalid, stats.fragments_written
        );
        stats
    }

    pub fn backbuffer(&self) -> &Backbuffer {
        &self.backbuffer
    }

    pub fn backbuffer_mut(&mut self) -> &mut Backbuffer {
        &mut self.backbuffer
    }

    pub fn viewport(&self) -> &Mat4 {
        &self.viewport
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Changing `depth_range` here takes effect at the next [`resize`](Self::resize).
    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn width(&self) -> u32 {
        self.backbuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.backbuffer.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::vec2::Vec2;
    use crate::math::vec3::Vec3;
    use crate::mesh::Vertex;
    use crate::shaders::flat::{FlatShader, FlatUniforms};

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), Vec2::ZERO, Vec3::ZERO)
    }

    /// Two faces covering the lower-left half of NDC, one of them degenerate.
    fn mesh() -> Mesh {
        Mesh::new(vec![
            vertex(-1.0, -1.0, 0.0),
            vertex(1.0, -1.0, 0.0),
            vertex(-1.0, 1.0, 0.0),
            vertex(0.0, 0.0, 0.0),
            vertex(0.5, 0.5, 0.0),
            vertex(1.0, 1.0, 0.0),
        ])
    }

    fn white() -> Program<FlatShader> {
        Program::with_uniforms(
            FlatShader,
            FlatUniforms {
                mvp: Mat4::identity(),
                color: Vec3::splat(255.0),
            },
        )
    }

    #[test]
    fn viewport_tracks_resize() {
        let mut ctx = RenderContext::new(800, 600, RenderSettings::default());
        let corner = *ctx.viewport() * Vec3::new(1.0, 1.0, 1.0);
        assert_eq!((corner.x, corner.y), (800.0, 600.0));

        ctx.resize(320, 200);
        assert_eq!((ctx.width(), ctx.height()), (320, 200));
        assert_eq!(ctx.backbuffer().colors().len(), 320 * 200);
        let corner = *ctx.viewport() * Vec3::new(1.0, 1.0, 1.0);
        assert_eq!((corner.x, corner.y), (320.0, 200.0));
    }

    #[test]
    fn draw_mesh_counts_every_face() {
        let mut ctx = RenderContext::new(16, 16, RenderSettings::default());
        ctx.begin_frame();
        ctx.draw_mesh(&mut white(), &mesh());
        let stats = ctx.end_frame();

        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.degenerate, 1);
        let lit = ctx
            .backbuffer()
            .colors()
            .iter()
            .filter(|&&c| c == colors::WHITE)
            .count() as u64;
        assert_eq!(stats.fragments_written, lit);
        assert_eq!(ctx.backbuffer().pixel(0, 0), Some(colors::WHITE));
        assert_eq!(ctx.backbuffer().pixel(15, 15), Some(colors::BLACK));
    }

    #[test]
    fn begin_frame_clears_previous_frame() {
        let mut ctx = RenderContext::new(8, 8, RenderSettings::default());
        ctx.begin_frame();
        ctx.draw_mesh(&mut white(), &mesh());
        ctx.end_frame();

        ctx.settings_mut().clear_color = 0x102030;
        ctx.begin_frame();
        assert!(ctx.backbuffer().colors().iter().all(|&c| c == 0x102030));
        assert_eq!(ctx.end_frame(), FrameStats::default());
    }

    #[test]
    fn wireframe_outlines_drawn_triangles() {
        let settings = RenderSettings {
            wireframe: true,
            ..RenderSettings::default()
        };
        let mut ctx = RenderContext::new(16, 16, settings);
        ctx.begin_frame();
        ctx.draw_mesh(&mut white(), &mesh());
        assert_eq!(ctx.backbuffer().pixel(0, 0), Some(colors::WIREFRAME));
        assert_eq!(ctx.backbuffer().pixel(3, 3), Some(colors::WHITE));
    }

    #[test]
    fn zero_w_is_reported_as_invalid() {
        let mut ctx = RenderContext::new(8, 8, RenderSettings::default());
        let mut program = Program::with_uniforms(
            FlatShader,
            FlatUniforms {
                mvp: Mat4::new([[0.0; 4]; 4]),
                color: Vec3::splat(255.0),
            },
        );
        program.load_face(&[vertex(0.0, 0.0, 0.0); 3]);
        assert_eq!(ctx.draw(&mut program), TriangleOutcome::InvalidVertex);
        assert_eq!(ctx.end_frame().invalid, 1);
    }

    #[test]
    fn wireframe_survives_a_corner_near_w_zero() {
        let settings = RenderSettings {
            wireframe: true,
            ..RenderSettings::default()
        };
        let mut ctx = RenderContext::new(16, 16, settings);
        // clip = (x, y, 0, z): the middle corner ends up billions of pixels away
        let mut program = Program::with_uniforms(
            FlatShader,
            FlatUniforms {
                mvp: Mat4::new([
                    [1.0, 0.0, 0.0, 0.0],
                    [0.0, 1.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 0.0],
                    [0.0, 0.0, 1.0, 0.0],
                ]),
                color: Vec3::splat(255.0),
            },
        );
        for w in [1e-9, 1e-12] {
            program.load_face(&[
                vertex(-1.0, -1.0, 1.0),
                vertex(1.0, 0.2, w),
                vertex(-1.0, 1.0, 1.0),
            ]);
            ctx.begin_frame();
            let outcome = ctx.draw(&mut program);
            assert!(matches!(outcome, TriangleOutcome::Drawn { .. }), "{outcome:?}");
            assert_eq!(ctx.backbuffer().pixel(0, 0), Some(colors::WIREFRAME));
        }
    }

    #[test]
    fn fragment_counters_do_not_overflow() {
        let mut stats = FrameStats::default();
        let huge = TriangleOutcome::Drawn {
            covered: u32::MAX,
            written: u32::MAX,
        };
        stats.record(huge);
        stats.record(huge);
        assert_eq!(stats.fragments_covered, 2 * u64::from(u32::MAX));
        assert_eq!(stats.fragments_written, 2 * u64::from(u32::MAX));
        assert_eq!(stats.drawn, 2);
    }
}
