//! RGB to perceptual brightness.

use serde::{Deserialize, Serialize};

/// Luminance weight set applied to RGB channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LumaWeights {
    /// ITU-R BT.601: 0.299 R + 0.587 G + 0.114 B
    #[default]
    Bt601,
    /// ITU-R BT.709: 0.2126 R + 0.7152 G + 0.0722 B
    Bt709,
}

impl LumaWeights {
    pub fn coefficients(self) -> [f32; 3] {
        match self {
            Self::Bt601 => [0.299, 0.587, 0.114],
            Self::Bt709 => [0.2126, 0.7152, 0.0722],
        }
    }

    /// Weighted luminance in 0..=255 for channels already in 0..=255.
    pub fn luminance(self, r: f32, g: f32, b: f32) -> f32 {
        let [wr, wg, wb] = self.coefficients();
        wr * r + wg * g + wb * b
    }

    /// Fixed-point weights scaled by 10 000, so white lands on exactly 255.
    fn fixed_point(self) -> [u32; 3] {
        match self {
            Self::Bt601 => [2990, 5870, 1140],
            Self::Bt709 => [2126, 7152, 722],
        }
    }

    /// Luminance of an 8-bit pixel. Integer accumulation keeps the
    /// extremes exact.
    pub fn luminance_u8(self, rgb: [u8; 3]) -> f32 {
        let [wr, wg, wb] = self.fixed_point();
        let sum = wr * rgb[0] as u32 + wg * rgb[1] as u32 + wb * rgb[2] as u32;
        sum as f32 / 10_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        for weights in [LumaWeights::Bt601, LumaWeights::Bt709] {
            let sum: f32 = weights.coefficients().iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "{weights:?} sums to {sum}");
        }
    }

    #[test]
    fn test_white_and_black() {
        for weights in [LumaWeights::Bt601, LumaWeights::Bt709] {
            assert_eq!(weights.luminance_u8([255, 255, 255]), 255.0);
            assert_eq!(weights.luminance_u8([0, 0, 0]), 0.0);
        }
    }

    #[test]
    fn test_green_dominates() {
        let w = LumaWeights::Bt601;
        let red = w.luminance_u8([255, 0, 0]);
        let green = w.luminance_u8([0, 255, 0]);
        let blue = w.luminance_u8([0, 0, 255]);
        assert!(green > red && red > blue);
    }

    #[test]
    fn test_bt709_weights_green_more() {
        let green = [0, 255, 0];
        assert!(LumaWeights::Bt709.luminance_u8(green) > LumaWeights::Bt601.luminance_u8(green));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LumaWeights::Bt709).unwrap();
        assert_eq!(json, "\"bt709\"");
        let parsed: LumaWeights = serde_json::from_str("\"bt601\"").unwrap();
        assert_eq!(parsed, LumaWeights::Bt601);
    }
}
