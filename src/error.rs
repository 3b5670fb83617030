//! Errors raised while loading meshes and textures.
//!
//! Rendering itself never fails: bad triangles and pixels are skipped.

use std::fmt;

#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    Image(image::ImageError),
    /// The OBJ file parsed but holds no triangles.
    EmptyMesh,
    /// Raw texel data that does not describe a usable texture.
    InvalidTexture {
        width: u32,
        height: u32,
        channels: usize,
        len: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to load OBJ: {e}"),
            LoadError::Image(e) => write!(f, "failed to decode image: {e}"),
            LoadError::EmptyMesh => write!(f, "mesh contains no triangles"),
            LoadError::InvalidTexture {
                width,
                height,
                channels,
                len,
            } => write!(
                f,
                "invalid texture: {width}x{height} with {channels} channel(s) needs {} bytes, got {len}",
                *width as usize * *height as usize * channels
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Image(e) => Some(e),
            LoadError::EmptyMesh | LoadError::InvalidTexture { .. } => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}
