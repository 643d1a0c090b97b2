//! Source image loading and downsampling to the character grid.

use crate::options::MAX_HEIGHT;
use crate::{AsciixError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Decoded RGBA raster, immutable once loaded.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbaImage,
}

impl SourceImage {
    /// Decode any raster format the `image` crate understands.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AsciixError::InvalidInput("image data is empty".into()));
        }
        Self::from_dynamic(image::load_from_memory(bytes)?)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let image = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            AsciixError::InvalidInput(format!("RGBA data does not match {width}x{height}"))
        })?;
        Self::from_image(image)
    }

    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        Self::from_image(image.into_rgba8())
    }

    pub fn from_image(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AsciixError::InvalidInput("image has no pixels".into()));
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

/// Grid height for `cols` characters, corrected for the glyph aspect.
pub fn grid_height(source_w: u32, source_h: u32, cols: u32, char_aspect: f32) -> u32 {
    let scale = cols as f32 / source_w as f32;
    (source_h as f32 * scale * char_aspect).round().max(1.0) as u32
}

/// Downsample the source to a `cols`-wide working buffer with a bilinear filter.
pub fn resample(source: &SourceImage, cols: u32, char_aspect: f32) -> Result<RgbaImage> {
    if cols == 0 {
        return Err(AsciixError::InvalidInput("width must be positive".into()));
    }
    if !(char_aspect.is_finite() && char_aspect > 0.0) {
        return Err(AsciixError::InvalidInput(format!(
            "character aspect must be positive, got {char_aspect}"
        )));
    }

    let rows = grid_height(source.width(), source.height(), cols, char_aspect);
    if rows > MAX_HEIGHT {
        return Err(AsciixError::InvalidInput(format!(
            "{cols} columns would need {rows} rows, more than {MAX_HEIGHT}; use a smaller width"
        )));
    }
    tracing::debug!(
        src_w = source.width(),
        src_h = source.height(),
        cols,
        rows,
        "resampling"
    );
    Ok(imageops::resize(source.pixels(), cols, rows, FilterType::Triangle))
}
