use image::{GrayImage, RgbImage};
use imageproc::edges::canny;

use super::{is_empty, nonzero_ratio, to_gray, SignalReading};

pub const CANNY_LOW: f32 = 50.0;
pub const CANNY_HIGH: f32 = 150.0;

/// Canny edge map of the region.
pub fn edge_map(region: &RgbImage) -> GrayImage {
    canny(&to_gray(region), CANNY_LOW, CANNY_HIGH)
}

/// Edge density of the region. Diagnostic only: no fusion rule reads it.
pub fn classify_edge(region: &RgbImage, threshold: f32) -> SignalReading {
    if is_empty(region) {
        return SignalReading::default();
    }
    SignalReading::new(nonzero_ratio(&edge_map(region)), threshold)
}
