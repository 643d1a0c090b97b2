//! Render options snapshot and validation.

use crate::luminance::LumaWeights;
use crate::{AsciixError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 110;
pub const MAX_WIDTH: u32 = 1000;
/// Upper bound on resampled rows; very tall sources at wide widths are refused.
pub const MAX_HEIGHT: u32 = 1000;
pub const DEFAULT_GRADIENT: &str = "@#%*+=-:. ";
/// Glyph cells are roughly twice as tall as wide.
pub const DEFAULT_CHAR_ASPECT: f32 = 0.5;
pub const MAX_BRIGHTNESS: i32 = 255;
/// Contrast must stay strictly inside (-255, 259).
pub const CONTRAST_MIN: f32 = -255.0;
pub const CONTRAST_MAX: f32 = 259.0;
pub const MAX_SHARPEN: u32 = 10;
pub const MAX_SPACE_DENSITY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output width in characters
    pub width: u32,
    /// Added to every channel before contrast
    pub brightness: i32,
    pub contrast: f32,
    pub sharpen: u32,
    /// 0 disables density spaces
    pub space_density: u32,
    pub grayscale: bool,
    pub invert: bool,
    /// Characters ordered dark to light
    pub gradient: String,
    pub circle_mask: bool,
    pub luma: LumaWeights,
    pub char_aspect: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            brightness: 0,
            contrast: 0.0,
            sharpen: 0,
            space_density: 0,
            grayscale: false,
            invert: false,
            gradient: DEFAULT_GRADIENT.to_string(),
            circle_mask: false,
            luma: LumaWeights::default(),
            char_aspect: DEFAULT_CHAR_ASPECT,
        }
    }
}

impl RenderOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field on its own; the first violation is reported.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(invalid(format!(
                "width must be between 1 and {MAX_WIDTH}, got {}",
                self.width
            )));
        }
        if !(-MAX_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&self.brightness) {
            return Err(invalid(format!(
                "brightness must be between -{MAX_BRIGHTNESS} and {MAX_BRIGHTNESS}, got {}",
                self.brightness
            )));
        }
        if !(self.contrast > CONTRAST_MIN && self.contrast < CONTRAST_MAX) {
            return Err(invalid(format!(
                "contrast must be strictly between {CONTRAST_MIN} and {CONTRAST_MAX}, got {}",
                self.contrast
            )));
        }
        if self.sharpen > MAX_SHARPEN {
            return Err(invalid(format!(
                "sharpen must be between 0 and {MAX_SHARPEN}, got {}",
                self.sharpen
            )));
        }
        if self.space_density > MAX_SPACE_DENSITY {
            return Err(invalid(format!(
                "space density must be between 0 and {MAX_SPACE_DENSITY}, got {}",
                self.space_density
            )));
        }
        if self.gradient.is_empty() {
            return Err(invalid("gradient must contain at least one character".into()));
        }
        if !(self.char_aspect.is_finite() && self.char_aspect > 0.0) {
            return Err(invalid(format!(
                "character aspect must be positive, got {}",
                self.char_aspect
            )));
        }
        Ok(())
    }

    /// `259(c+255) / (255(259-c))`
    pub fn contrast_factor(&self) -> f32 {
        let c = self.contrast;
        (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
    }
}

fn invalid(msg: String) -> AsciixError {
    AsciixError::InvalidInput(msg)
}
