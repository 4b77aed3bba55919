use image::{GrayImage, Luma, RgbImage};

use super::{is_empty, nonzero_ratio, SignalReading};

/// Inclusive HSV band in the 8-bit convention (H in 0..=180).
#[derive(Debug, Clone, Copy)]
struct HsvRange {
    lower: [u8; 3],
    upper: [u8; 3],
}

impl HsvRange {
    fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }
}

/// Low saturation, high value.
const WHITE: HsvRange = HsvRange {
    lower: [0, 0, 180],
    upper: [180, 40, 255],
};

/// Warning yellow through orange-yellow.
const YELLOW: HsvRange = HsvRange {
    lower: [10, 60, 80],
    upper: [40, 255, 255],
};

/// Converts one RGB pixel to HSV with hue halved into `0..180` and
/// saturation and value scaled to `0..=255`.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(|c| c as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };

    let mut h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    [
        ((h / 2.0).round() as u8).min(180),
        s.round() as u8,
        v as u8,
    ]
}

/// Binary mask (255 = hit) of pixels that look like a white or yellow shell.
pub fn color_mask(region: &RgbImage) -> GrayImage {
    GrayImage::from_fn(region.width(), region.height(), |x, y| {
        let hsv = rgb_to_hsv(region.get_pixel(x, y).0);
        if WHITE.contains(hsv) || YELLOW.contains(hsv) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Fraction of white-or-yellow pixels in the region.
pub fn classify_color(region: &RgbImage, threshold: f32) -> SignalReading {
    if is_empty(region) {
        return SignalReading::default();
    }
    SignalReading::new(nonzero_ratio(&color_mask(region)), threshold)
}
