//! Luminance to gradient character quantization.

use crate::grid::AsciiGrid;
use crate::luminance::LumaWeights;
use crate::options::RenderOptions;
use crate::{AsciixError, Result};
use image::RgbaImage;

/// Luminance drop per density step for the space threshold.
const DENSITY_STEP: f32 = 45.0;

/// Ordered character palette, densest ink first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    chars: Vec<char>,
}

impl Gradient {
    /// Build from a dark-to-light string, keeping the first occurrence of each char.
    pub fn new(chars: &str) -> Result<Self> {
        let mut unique: Vec<char> = Vec::with_capacity(chars.len());
        for c in chars.chars() {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.is_empty() {
            return Err(AsciixError::InvalidInput("gradient is empty".into()));
        }
        Ok(Self { chars: unique })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Black maps to the first char, white to the last.
    pub fn index_for(&self, luminance: f32) -> usize {
        let last = self.chars.len() - 1;
        let idx = (luminance.clamp(0.0, 255.0) / 255.0 * last as f32).floor() as usize;
        idx.min(last)
    }

    pub fn char_for(&self, luminance: f32) -> char {
        self.chars[self.index_for(luminance)]
    }
}

/// Luminance above which a pixel becomes a space, or `None` when density is off.
pub fn space_threshold(space_density: u32) -> Option<f32> {
    (space_density > 0).then(|| 255.0 - space_density as f32 * DENSITY_STEP)
}

/// Inscribed circle of a `width`×`height` grid.
#[derive(Debug, Clone, Copy)]
pub struct CircleMask {
    cx: f32,
    cy: f32,
    radius_sq: f32,
}

impl CircleMask {
    pub fn new(width: u32, height: u32) -> Self {
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let radius = cx.min(cy);
        Self { cx, cy, radius_sq: radius * radius }
    }

    pub fn excludes(&self, x: u32, y: u32) -> bool {
        let dx = x as f32 - self.cx;
        let dy = y as f32 - self.cy;
        dx * dx + dy * dy > self.radius_sq
    }
}

/// Map one RGB pixel to a character, ignoring masking.
pub fn map_pixel(
    rgb: [u8; 3],
    gradient: &Gradient,
    luma: LumaWeights,
    threshold: Option<f32>,
) -> char {
    let lum = luma.luminance_u8(rgb);
    match threshold {
        Some(t) if lum > t => ' ',
        _ => gradient.char_for(lum),
    }
}

/// Turn the adjusted buffer into a grid, one character per pixel.
pub fn quantize(buffer: &RgbaImage, gradient: &Gradient, options: &RenderOptions) -> AsciiGrid {
    let (w, h) = buffer.dimensions();
    let mask = options.circle_mask.then(|| CircleMask::new(w, h));
    let threshold = space_threshold(options.space_density);

    let rows = (0..h)
        .map(|y| {
            (0..w)
                .map(|x| {
                    if mask.is_some_and(|m| m.excludes(x, y)) {
                        return ' ';
                    }
                    let p = buffer.get_pixel(x, y);
                    map_pixel([p[0], p[1], p[2]], gradient, options.luma, threshold)
                })
                .collect::<String>()
        })
        .collect();

    AsciiGrid::from_rows(w, rows)
}
