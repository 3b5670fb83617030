//! Command-line options for the viewer binary.

use std::path::PathBuf;

use clap::Parser;

use crate::math::vec3::Vec3;
use crate::render::{Interpolation, RenderSettings};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input OBJ file
    #[arg(long, default_value = "assets/african_head.obj")]
    pub obj: PathBuf,

    /// Diffuse (base color) texture
    #[arg(long)]
    pub diffuse: Option<PathBuf>,

    /// Tangent-free normal map, required for Phong shading
    #[arg(long)]
    pub normal: Option<PathBuf>,

    /// Specular map; the blue channel is used as the shininess exponent
    #[arg(long)]
    pub specular: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Camera position as "x,y,z"
    #[arg(long, default_value = "1,1,3", allow_negative_numbers = true, value_parser = parse_vec3)]
    pub eye: Vec3,

    /// Light position as "x,y,z"
    #[arg(long, default_value = "1,1,1", allow_negative_numbers = true, value_parser = parse_vec3)]
    pub light: Vec3,

    /// Attribute interpolation: "perspective" or "screen"
    #[arg(long, default_value_t = Interpolation::PerspectiveCorrect)]
    pub interpolation: Interpolation,

    /// Outline every triangle on top of the shaded image
    #[arg(long, default_value_t = false)]
    pub wireframe: bool,
}

impl Args {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            interpolation: self.interpolation,
            wireframe: self.wireframe,
            ..RenderSettings::default()
        }
    }
}

/// Parses `"x,y,z"` into a vector. Whitespace around components is allowed.
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid number '{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected 3 comma-separated values, got {}", parts.len())),
    }
}
