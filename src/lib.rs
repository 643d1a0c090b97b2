//! Image and text to ASCII art converter.
//!
//! The image path is a single pipeline:
//! resample → adjust → sharpen → quantize.

pub mod adjust;
pub mod glyph;
pub mod grid;
pub mod luminance;
pub mod options;
pub mod resample;
pub mod session;
pub mod sharpen;
pub mod text;

#[cfg(not(target_arch = "wasm32"))]
pub mod bitmap;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use glyph::Gradient;
pub use grid::AsciiGrid;
pub use luminance::LumaWeights;
pub use options::RenderOptions;
pub use resample::SourceImage;
pub use session::{RenderJob, RunTicket, Session};
pub use text::FontLibrary;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsciixError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unsupported font: {0}")]
    UnsupportedFont(String),
    #[error("Decode failure: {0}")]
    DecodeFailure(#[from] image::ImageError),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Options error: {0}")]
    Options(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AsciixError>;

/// Run the full image pipeline on one source image.
///
/// Every call works on its own buffer, so identical inputs always give
/// identical grids.
pub fn convert(source: &SourceImage, options: &RenderOptions) -> Result<AsciiGrid> {
    options.validate()?;
    let gradient = Gradient::new(&options.gradient)?;

    let mut buffer = resample::resample(source, options.width, options.char_aspect)?;
    adjust::apply(&mut buffer, options);
    sharpen::apply(&mut buffer, options.sharpen);

    let grid = glyph::quantize(&buffer, &gradient, options);
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        "rendered ascii grid"
    );
    Ok(grid)
}

/// Builder-style converter holding one options snapshot.
pub struct Converter {
    options: RenderOptions,
}

impl Converter {
    pub fn new() -> Self {
        Self { options: RenderOptions::default() }
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.options.width = width;
        self
    }

    pub fn with_gradient(mut self, gradient: impl Into<String>) -> Self {
        self.options.gradient = gradient.into();
        self
    }

    pub fn with_circle_mask(mut self, enabled: bool) -> Self {
        self.options.circle_mask = enabled;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn convert(&self, source: &SourceImage) -> Result<AsciiGrid> {
        convert(source, &self.options)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
