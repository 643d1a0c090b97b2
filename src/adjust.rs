//! Per-pixel brightness, contrast, grayscale and invert.

use crate::options::RenderOptions;
use image::RgbaImage;

/// Adjust every pixel of the working buffer in place. Alpha is left alone.
pub fn apply(buffer: &mut RgbaImage, options: &RenderOptions) {
    let brightness = options.brightness as f32;
    let factor = options.contrast_factor();

    for pixel in buffer.pixels_mut() {
        let [r, g, b] = adjust_rgb([pixel[0], pixel[1], pixel[2]], brightness, factor, options);
        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
    }
}

fn adjust_rgb(rgb: [u8; 3], brightness: f32, factor: f32, options: &RenderOptions) -> [u8; 3] {
    let mut channels = rgb.map(|c| factor * (c as f32 + brightness - 128.0) + 128.0);

    if options.grayscale {
        let [r, g, b] = channels;
        channels = [options.luma.luminance(r, g, b); 3];
    }
    if options.invert {
        channels = channels.map(|c| 255.0 - c);
    }

    channels.map(to_channel)
}

pub(crate) fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn single(rgb: [u8; 3], options: &RenderOptions) -> [u8; 3] {
        let mut buf = RgbaImage::from_pixel(1, 1, Rgba([rgb[0], rgb[1], rgb[2], 77]));
        apply(&mut buf, options);
        let p = buf.get_pixel(0, 0);
        assert_eq!(p[3], 77, "alpha must be untouched");
        [p[0], p[1], p[2]]
    }

    #[test]
    fn test_defaults_are_identity() {
        let opts = RenderOptions::default();
        for rgb in [[0, 0, 0], [12, 200, 99], [255, 255, 255]] {
            assert_eq!(single(rgb, &opts), rgb);
        }
    }

    #[test]
    fn test_brightness_offsets_and_clamps() {
        let opts = RenderOptions { brightness: 50, ..Default::default() };
        assert_eq!(single([10, 100, 230], &opts), [60, 150, 255]);

        let opts = RenderOptions { brightness: -50, ..Default::default() };
        assert_eq!(single([10, 100, 230], &opts), [0, 50, 180]);
    }

    #[test]
    fn test_contrast_spreads_around_midpoint() {
        let opts = RenderOptions { contrast: 100.0, ..Default::default() };
        let [dark, mid, light] = single([100, 128, 156], &opts);
        assert!(dark < 100);
        assert_eq!(mid, 128);
        assert!(light > 156);
    }

    #[test]
    fn test_negative_contrast_flattens() {
        let opts = RenderOptions { contrast: -200.0, ..Default::default() };
        let [dark, _, light] = single([0, 128, 255], &opts);
        assert!(dark > 0 && light < 255);
    }

    #[test]
    fn test_grayscale_uses_configured_weights() {
        let opts = RenderOptions { grayscale: true, ..Default::default() };
        // 0.299 * 255 = 76.2
        assert_eq!(single([255, 0, 0], &opts), [76, 76, 76]);
    }

    #[test]
    fn test_invert_runs_after_grayscale() {
        let opts = RenderOptions { grayscale: true, invert: true, ..Default::default() };
        assert_eq!(single([255, 0, 0], &opts), [179, 179, 179]);
    }

    #[test]
    fn test_brightness_is_monotonic() {
        let rgb = [40, 120, 200];
        let mut prev = [0u8; 3];
        for b in (-255..=255).step_by(15) {
            let opts = RenderOptions { brightness: b, contrast: 60.0, ..Default::default() };
            let out = single(rgb, &opts);
            for i in 0..3 {
                assert!(out[i] >= prev[i], "brightness {b} darkened channel {i}");
            }
            prev = out;
        }
    }
}
