//! Triangle rasterization.
//!
//! Drawing one triangle goes through these stages:
//! 1. Run the vertex stage for each corner and divide by w
//! 2. Map the resulting NDC through the viewport into screen space
//! 3. Walk the clamped bounding box and test each pixel center
//! 4. Interpolate depth and run the depth test
//! 5. Interpolate varyings, run the fragment stage and write the pixel

mod barycentric;
pub mod shader;

use std::fmt;
use std::str::FromStr;

use log::trace;

pub use barycentric::{barycentric, is_inside, TriangleSetup};
pub use shader::{blend, Program, Shader, Varyings};

use super::framebuffer::Backbuffer;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// How varyings are interpolated across a triangle.
///
/// Depth is always interpolated linearly in screen space; this only affects
/// the weights handed to [`Varyings::interpolate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Screen-space weights divided by each corner's clip-space w and
    /// renormalized. Textures stay straight on surfaces seen at an angle.
    #[default]
    PerspectiveCorrect,
    /// Raw screen-space barycentric weights. Cheaper, but textures swim on
    /// large or oblique triangles.
    ScreenSpace,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::PerspectiveCorrect => write!(f, "perspective"),
            Interpolation::ScreenSpace => write!(f, "screen"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perspective" | "perspective-correct" => Ok(Interpolation::PerspectiveCorrect),
            "screen" | "screen-space" | "linear" => Ok(Interpolation::ScreenSpace),
            other => Err(format!(
                "unknown interpolation '{other}', expected 'perspective' or 'screen'"
            )),
        }
    }
}

/// A corner after perspective divide and viewport transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenVertex {
    /// x, y in pixels; z in the viewport's depth range.
    pub position: Vec3,
    /// Reciprocal of the clip-space w, used for perspective correction.
    pub inv_w: f32,
}

impl ScreenVertex {
    pub const fn new(position: Vec3, inv_w: f32) -> Self {
        Self { position, inv_w }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.y)
    }
}

/// What happened to a triangle handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleOutcome {
    /// The triangle was scanned. `covered` pixels passed the inside test and
    /// `written` of those also passed the depth test.
    Drawn { covered: u32, written: u32 },
    /// Zero area in screen space; nothing was drawn.
    Degenerate,
    /// A corner had w == 0 or produced non-finite coordinates; nothing was
    /// drawn.
    InvalidVertex,
}

/// Integer pixel bounds of a triangle, clamped to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Returns `None` when the triangle lies entirely outside the buffer.
    pub fn new(points: [Vec2; 3], width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let [p0, p1, p2] = points;
        // Float to int casts saturate, so far off-screen corners still clamp
        let min_x = (p0.x.min(p1.x).min(p2.x).floor() as i32).max(0);
        let max_x = (p0.x.max(p1.x).max(p2.x).ceil() as i32).min(width as i32 - 1);
        let min_y = (p0.y.min(p1.y).min(p2.y).floor() as i32).max(0);
        let max_y = (p0.y.max(p1.y).max(p2.y).ceil() as i32).min(height as i32 - 1);

        (min_x <= max_x && min_y <= max_y).then_some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

/// Runs the vertex stage for all three corners and maps them to screen space.
///
/// Returns `None` if any corner cannot be projected (w == 0 or non-finite
/// results).
pub fn project_triangle<S: Shader>(
    program: &mut Program<S>,
    viewport: &Mat4,
) -> Option<[ScreenVertex; 3]> {
    let mut screen = [ScreenVertex::default(); 3];
    for (corner, out) in screen.iter_mut().enumerate() {
        let clip = program
            .shader
            .vertex(corner, &mut program.varyings, &program.uniforms);
        let Some(ndc) = clip.perspective_divide() else {
            trace!("corner {corner} has unusable clip w {}", clip.w);
            return None;
        };
        let position = (*viewport * ndc).xyz();
        if !position.is_finite() {
            trace!("corner {corner} left the finite range after viewport");
            return None;
        }
        *out = ScreenVertex::new(position, 1.0 / clip.w);
    }
    Some(screen)
}

/// Scans a screen-space triangle into `buffer`.
///
/// The varyings in `program` must hold the vertex-stage outputs for the
/// same three corners as `screen`.
pub fn rasterize<S: Shader>(
    screen: &[ScreenVertex; 3],
    program: &mut Program<S>,
    buffer: &mut Backbuffer,
    interpolation: Interpolation,
) -> TriangleOutcome {
    let points = [screen[0].xy(), screen[1].xy(), screen[2].xy()];
    let Some(setup) = TriangleSetup::new(points[0], points[1], points[2]) else {
        return TriangleOutcome::Degenerate;
    };
    let Some(bbox) = BoundingBox::new(points, buffer.width(), buffer.height()) else {
        return TriangleOutcome::Drawn {
            covered: 0,
            written: 0,
        };
    };

    let depths = [
        screen[0].position.z,
        screen[1].position.z,
        screen[2].position.z,
    ];
    let inv_w = [screen[0].inv_w, screen[1].inv_w, screen[2].inv_w];

    let mut covered = 0;
    let mut written = 0;

    for y in bbox.min_y..=bbox.max_y {
        for x in bbox.min_x..=bbox.max_x {
            // Sample at pixel center
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(weights) = setup.weights(p) else {
                continue;
            };
            covered += 1;

            let depth = blend(&depths, weights);
            if !buffer.depth_test(x, y, depth) {
                continue;
            }

            let weights = match interpolation {
                Interpolation::ScreenSpace => weights,
                Interpolation::PerspectiveCorrect => perspective_weights(weights, inv_w),
            };
            program.varyings.interpolate(weights);
            let color = program.shader.fragment(&program.varyings, &program.uniforms);

            buffer.set_pixel(x, y, color);
            buffer.write_depth(x, y, depth);
            written += 1;
        }
    }

    TriangleOutcome::Drawn { covered, written }
}

/// Projects and rasterizes the triangle currently loaded in `program`.
pub fn draw_triangle<S: Shader>(
    program: &mut Program<S>,
    viewport: &Mat4,
    buffer: &mut Backbuffer,
    interpolation: Interpolation,
) -> TriangleOutcome {
    match project_triangle(program, viewport) {
        Some(screen) => rasterize(&screen, program, buffer, interpolation),
        None => TriangleOutcome::InvalidVertex,
    }
}

/// Turns screen-space weights into perspective-correct ones.
///
/// Attributes vary linearly in clip space, not in screen space; dividing by
/// w and renormalizing undoes the projection's foreshortening.
#[inline]
fn perspective_weights(weights: [f32; 3], inv_w: [f32; 3]) -> [f32; 3] {
    let scaled = [
        weights[0] * inv_w[0],
        weights[1] * inv_w[1],
        weights[2] * inv_w[2],
    ];
    let sum = scaled[0] + scaled[1] + scaled[2];
    if sum == 0.0 || !sum.is_finite() {
        return weights;
    }
    [scaled[0] / sum, scaled[1] / sum, scaled[2] / sum]
}
