//! Rasterize an ASCII grid to an image with a monospace font.

use crate::grid::AsciiGrid;
use crate::{AsciixError, Result};
use fontdue::{Font, FontSettings};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Glyph cell width as a fraction of the font size.
const CELL_WIDTH_RATIO: f32 = 0.6;

#[derive(Debug, Clone, Copy)]
pub struct BitmapStyle {
    pub font_size: f32,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
}

impl Default for BitmapStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            background: [0x0b, 0x0b, 0x0b],
            foreground: [0xdd, 0xdd, 0xdd],
        }
    }
}

impl BitmapStyle {
    pub fn cell_size(&self) -> (u32, u32) {
        let w = (self.font_size * CELL_WIDTH_RATIO).ceil().max(1.0) as u32;
        let h = self.font_size.ceil().max(1.0) as u32;
        (w, h)
    }
}

pub fn load_font(bytes: Vec<u8>) -> Result<Font> {
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| AsciixError::UnsupportedFont(e.to_string()))
}

pub fn open_font(path: impl AsRef<Path>) -> Result<Font> {
    load_font(std::fs::read(path)?)
}

/// Pixel size of the rendered grid.
pub fn canvas_size(grid: &AsciiGrid, style: &BitmapStyle) -> Result<(u32, u32)> {
    if grid.is_empty() || grid.width() == 0 {
        return Err(AsciixError::InvalidInput("nothing to render".into()));
    }
    if !(style.font_size.is_finite() && style.font_size > 0.0) {
        return Err(AsciixError::InvalidInput(format!(
            "font size must be positive, got {}",
            style.font_size
        )));
    }
    let (cw, ch) = style.cell_size();
    Ok((grid.width() * cw, grid.height() * ch))
}

/// Coverage bitmap of one glyph, placed relative to the baseline.
#[derive(Debug, Clone, Default)]
pub struct GlyphBitmap {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// Anything that can rasterize single characters at a pixel size.
pub trait GlyphRaster {
    /// Distance from the top of a line to the baseline.
    fn ascent(&self, size: f32) -> Option<f32>;
    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap;
}

impl GlyphRaster for Font {
    fn ascent(&self, size: f32) -> Option<f32> {
        self.horizontal_line_metrics(size).map(|m| m.ascent)
    }

    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap {
        let (metrics, coverage) = Font::rasterize(self, ch, size);
        GlyphBitmap {
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            coverage,
        }
    }
}

pub fn render(
    grid: &AsciiGrid,
    font: &impl GlyphRaster,
    style: &BitmapStyle,
) -> Result<RgbImage> {
    let (width, height) = canvas_size(grid, style)?;
    let (cell_w, cell_h) = style.cell_size();
    let mut img = RgbImage::from_pixel(width, height, Rgb(style.background));

    let baseline = font
        .ascent(style.font_size)
        .unwrap_or(style.font_size * 0.8)
        .round() as i32;

    for (row, line) in grid.rows().iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let glyph = font.rasterize(ch, style.font_size);
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let x_offset = (col as u32 * cell_w) as i32 + glyph.xmin;
            let y_offset =
                (row as u32 * cell_h) as i32 + baseline - glyph.height as i32 - glyph.ymin;

            for sy in 0..glyph.height {
                for sx in 0..glyph.width {
                    let tx = x_offset + sx as i32;
                    let ty = y_offset + sy as i32;
                    if tx < 0 || ty < 0 || tx >= width as i32 || ty >= height as i32 {
                        continue;
                    }
                    let alpha = glyph.coverage.get(sy * glyph.width + sx).copied().unwrap_or(0);
                    if alpha > 0 {
                        img.put_pixel(tx as u32, ty as u32, blend(style, alpha));
                    }
                }
            }
        }
    }

    Ok(img)
}

pub fn save_png(
    grid: &AsciiGrid,
    font: &impl GlyphRaster,
    style: &BitmapStyle,
    path: impl AsRef<Path>,
) -> Result<()> {
    let img = render(grid, font, style)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| AsciixError::Encode(e.to_string()))
}

fn blend(style: &BitmapStyle, alpha: u8) -> Rgb<u8> {
    let a = alpha as f32 / 255.0;
    let mix = |bg: u8, fg: u8| (bg as f32 + (fg as f32 - bg as f32) * a).round() as u8;
    Rgb([
        mix(style.background[0], style.foreground[0]),
        mix(style.background[1], style.foreground[1]),
        mix(style.background[2], style.foreground[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> AsciiGrid {
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        AsciiGrid::from_rows(width, rows.iter().map(|r| r.to_string()).collect())
    }

    /// Fills a `w`×`h` box sitting on the baseline with one coverage value,
    /// except `'.'` which is a single pixel pushed far outside its cell.
    struct BlockFont {
        w: usize,
        h: usize,
        alpha: u8,
    }

    impl GlyphRaster for BlockFont {
        fn ascent(&self, _size: f32) -> Option<f32> {
            Some(7.0)
        }

        fn rasterize(&self, ch: char, _size: f32) -> GlyphBitmap {
            if ch == '.' {
                return GlyphBitmap {
                    xmin: -100,
                    ymin: -100,
                    width: 1,
                    height: 1,
                    coverage: vec![255],
                };
            }
            GlyphBitmap {
                xmin: 0,
                ymin: 0,
                width: self.w,
                height: self.h,
                coverage: vec![self.alpha; self.w * self.h],
            }
        }
    }

    #[test]
    fn test_render_places_glyphs_in_their_cells() {
        let style = BitmapStyle::default();
        let font = BlockFont { w: 6, h: 7, alpha: 255 };
        let img = render(&grid(&["@ ", " @"]), &font, &style).unwrap();
        assert_eq!(img.dimensions(), (12, 18));

        let fg = Rgb(style.foreground);
        let bg = Rgb(style.background);
        // Baseline 7: glyph rows 0..7 in each cell, rows 7..9 stay blank.
        for y in 0..9 {
            for x in 0..6 {
                let expected = if y < 7 { fg } else { bg };
                assert_eq!(*img.get_pixel(x, y), expected, "top-left cell at ({x}, {y})");
                assert_eq!(*img.get_pixel(x + 6, y), bg, "blank top-right at ({x}, {y})");
                assert_eq!(*img.get_pixel(x, y + 9), bg, "blank bottom-left at ({x}, {y})");
                let bottom_right = *img.get_pixel(x + 6, y + 9);
                assert_eq!(bottom_right, expected, "bottom-right at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_blends_partial_coverage() {
        let style = BitmapStyle::default();
        let font = BlockFont { w: 2, h: 2, alpha: 128 };
        let img = render(&grid(&["#"]), &font, &style).unwrap();
        let px = img.get_pixel(0, 5);
        assert_eq!(*px, blend(&style, 128));
        assert!(px[0] > style.background[0] && px[0] < style.foreground[0]);
    }

    #[test]
    fn test_render_clips_glyphs_outside_canvas() {
        let style = BitmapStyle::default();
        let font = BlockFont { w: 20, h: 30, alpha: 255 };
        let img = render(&grid(&["@."]), &font, &style).unwrap();
        assert_eq!(img.dimensions(), (12, 9));
        // Oversized glyph covers what it can; the off-canvas '.' draws nothing.
        assert_eq!(*img.get_pixel(11, 0), Rgb(style.foreground));
    }

    #[test]
    fn test_default_cell_size() {
        assert_eq!(BitmapStyle::default().cell_size(), (6, 9));
    }

    #[test]
    fn test_canvas_size_follows_grid() {
        let style = BitmapStyle::default();
        let size = canvas_size(&grid(&["@@@@", "....", "::::"]), &style).unwrap();
        assert_eq!(size, (24, 27));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let err = canvas_size(&AsciiGrid::default(), &BitmapStyle::default()).unwrap_err();
        assert!(matches!(err, AsciixError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_font_size_rejected() {
        let style = BitmapStyle { font_size: 0.0, ..Default::default() };
        assert!(canvas_size(&grid(&["@"]), &style).is_err());
    }

    #[test]
    fn test_garbage_font_is_unsupported() {
        let err = load_font(b"not a font".to_vec()).unwrap_err();
        assert!(matches!(err, AsciixError::UnsupportedFont(_)));
    }

    #[test]
    fn test_blend_extremes() {
        let style = BitmapStyle::default();
        assert_eq!(blend(&style, 0), Rgb(style.background));
        assert_eq!(blend(&style, 255), Rgb(style.foreground));
    }
}
