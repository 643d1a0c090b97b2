//! Unsharp mask: amplify the difference between the buffer and a blurred copy.

use crate::adjust::to_channel;
use image::{imageops, RgbaImage};

/// Blur sigma for strength `s`: `1 + min(3, s)`.
pub fn blur_sigma(strength: u32) -> f32 {
    1.0 + strength.min(3) as f32
}

/// Sharpening gain for strength `s`: `0.8 * s`.
pub fn amount(strength: u32) -> f32 {
    0.8 * strength as f32
}

/// Sharpen the buffer in place. Strength 0 leaves it untouched.
pub fn apply(buffer: &mut RgbaImage, strength: u32) {
    if strength == 0 {
        return;
    }

    let blurred = imageops::blur(&*buffer, blur_sigma(strength));
    let amount = amount(strength);

    for (pixel, soft) in buffer.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let orig = pixel[c] as f32;
            pixel[c] = to_channel(orig + amount * (orig - soft[c] as f32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Left half dark, right half light.
    fn step_edge(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            let v = if x < width / 2 { 80 } else { 170 };
            Rgba([v, v, v, 255])
        })
    }

    #[test]
    fn test_strength_zero_is_noop() {
        let original = step_edge(16, 4);
        let mut buf = original.clone();
        apply(&mut buf, 0);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_sharpen_increases_edge_contrast() {
        let mut buf = step_edge(32, 8);
        apply(&mut buf, 1);
        let dark = buf.get_pixel(15, 4)[0];
        let light = buf.get_pixel(16, 4)[0];
        assert!(dark < 80, "dark side of edge should get darker, got {dark}");
        assert!(light > 170, "light side of edge should get lighter, got {light}");
    }

    #[test]
    fn test_stronger_sharpen_is_not_weaker() {
        let mut weak = step_edge(32, 8);
        let mut strong = step_edge(32, 8);
        apply(&mut weak, 1);
        apply(&mut strong, 3);
        let spread = |b: &RgbaImage| b.get_pixel(16, 4)[0] as i32 - b.get_pixel(15, 4)[0] as i32;
        assert!(spread(&strong) >= spread(&weak));
    }

    #[test]
    fn test_alpha_untouched() {
        let mut buf = step_edge(16, 4);
        apply(&mut buf, 2);
        assert!(buf.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_sigma_caps_at_four() {
        assert_eq!(blur_sigma(1), 2.0);
        assert_eq!(blur_sigma(3), 4.0);
        assert_eq!(blur_sigma(9), 4.0);
    }
}
