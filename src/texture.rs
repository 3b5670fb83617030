use std::path::Path;

use log::info;

use crate::error::LoadError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Byte order of the color channels inside one texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Blue, green, red (then alpha). The layout of raw TGA pixel data.
    Bgr,
    /// Red, green, blue (then alpha). The layout `image` decodes into.
    Rgb,
}

/// A decoded image sampled by fragment shaders.
///
/// Texels are stored row-major with row 0 at the bottom, so `v = 0` in a
/// texture coordinate addresses the first row.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: usize,
    order: ChannelOrder,
}

impl Texture {
    /// Wraps already decoded texel bytes.
    ///
    /// `channels` must be 1, 3 or 4 and `data` must hold exactly
    /// `width * height * channels` bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: usize,
        order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * channels;
        if width == 0 || height == 0 || !matches!(channels, 1 | 3 | 4) || data.len() != expected
        {
            return Err(LoadError::InvalidTexture {
                width,
                height,
                channels,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            order,
        })
    }

    /// Load a texture from an image file (TGA, PNG, JPG, etc.)
    ///
    /// Grayscale images keep one channel, images with alpha keep four and
    /// everything else is converted to three. Rows are flipped so that row 0
    /// is the bottom of the picture.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.flipv();
        let (width, height) = (img.width(), img.height());

        let (channels, data) = match img.color().channel_count() {
            1 | 2 => (1, img.into_luma8().into_raw()),
            4 => (4, img.into_rgba8().into_raw()),
            _ => (3, img.into_rgb8().into_raw()),
        };

        info!(
            "loaded texture {} ({}x{}, {} channel(s))",
            path.display(),
            width,
            height,
            channels
        );
        Self::from_raw(width, height, channels, ChannelOrder::Rgb, data)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// UVs are normalized: `(0, 0)` is the bottom-left corner and `(1, 1)`
    /// the top-right. Coordinates outside `[0, 1)` wrap around.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        let x = (uv.u() * self.width as f32).floor();
        let y = (uv.v() * self.height as f32).floor();
        // Saturating casts keep NaN and huge values inside i32 before wrapping
        self.texel(x as i32, y as i32)
    }

    /// Reads the texel at pixel coordinates `(x, y)` as RGB.
    ///
    /// Out-of-range coordinates wrap. One-channel textures return their
    /// value in all three channels and alpha is ignored.
    #[inline]
    pub fn texel(&self, x: i32, y: i32) -> Vec3 {
        let x = x.rem_euclid(self.width as i32) as usize;
        let y = y.rem_euclid(self.height as i32) as usize;
        let index = (y * self.width as usize + x) * self.channels;
        let texel = &self.data[index..index + self.channels];

        match (self.channels, self.order) {
            (1, _) => Vec3::splat(texel[0] as f32),
            (_, ChannelOrder::Bgr) => Vec3::new(texel[2] as f32, texel[1] as f32, texel[0] as f32),
            (_, ChannelOrder::Rgb) => Vec3::new(texel[0] as f32, texel[1] as f32, texel[2] as f32),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }
}
