//! Classical-vision helmet cues evaluated on a cropped head region.
//!
//! Each classifier is a pure function of the region and its threshold. An
//! empty region always reads as `(false, 0.0)`.

pub mod color;
pub mod edge;
pub mod hough;
pub mod shape;

use image::{GrayImage, RgbImage};

pub use color::classify_color;
pub use edge::classify_edge;
pub use shape::classify_shape;

/// Output of one classifier for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalReading {
    pub triggered: bool,
    pub confidence: f32,
}

impl SignalReading {
    pub fn new(confidence: f32, threshold: f32) -> Self {
        Self {
            triggered: confidence > threshold,
            confidence,
        }
    }
}

/// The three cues for one head region. Cues a strategy does not evaluate
/// stay at the default, non-triggered reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HelmetSignals {
    pub color: SignalReading,
    pub shape: SignalReading,
    pub edge: SignalReading,
}

pub(crate) fn is_empty(region: &RgbImage) -> bool {
    region.width() == 0 || region.height() == 0
}

pub(crate) fn to_gray(region: &RgbImage) -> GrayImage {
    image::imageops::grayscale(region)
}

pub(crate) fn nonzero_ratio(mask: &GrayImage) -> f32 {
    let total = mask.width() as usize * mask.height() as usize;
    if total == 0 {
        return 0.0;
    }
    let hits = mask.as_raw().iter().filter(|&&v| v != 0).count();
    hits as f32 / total as f32
}
