//! Presentation-only rendering of per-frame verdicts.

pub mod rectangle;

use image::{imageops::FilterType, Rgb, RgbImage};

use crate::detection::bbox::{scale_to_canvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sink::DetectionResult;
use rectangle::draw_rectangle;

pub const SAFE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const UNSAFE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const HEAD_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Resizes the frame onto the display canvas and outlines each subject in
/// green (helmet) or red (no helmet), with its head region in yellow.
pub fn annotate(frame: &RgbImage, results: &[DetectionResult]) -> RgbImage {
    let mut canvas =
        image::imageops::resize(frame, CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Triangle);
    let (width, height) = frame.dimensions();

    for result in results {
        let color = if result.is_safe { SAFE_COLOR } else { UNSAFE_COLOR };
        let person = scale_to_canvas(&result.bbox, width, height);
        let head = scale_to_canvas(&result.head_roi, width, height);
        draw_rectangle(&mut canvas, &person, color, 2);
        draw_rectangle(&mut canvas, &head, HEAD_COLOR, 1);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::bbox::BoundingBox;
    use crate::helmet::HelmetSignals;
    use crate::sink::Label;

    #[test]
    fn verdict_colors_land_on_scaled_boxes() {
        let frame = RgbImage::from_pixel(400, 300, Rgb([0, 0, 0]));
        let results = [
            DetectionResult {
                label: Label::Person,
                is_safe: true,
                bbox: BoundingBox::new(10, 10, 50, 100),
                confidence: 0.9,
                head_roi: BoundingBox::new(10, 10, 50, 28),
                signals: HelmetSignals::default(),
            },
            DetectionResult {
                label: Label::Person,
                is_safe: false,
                bbox: BoundingBox::new(200, 50, 50, 100),
                confidence: 0.7,
                head_roi: BoundingBox::new(200, 50, 50, 28),
                signals: HelmetSignals::default(),
            },
        ];

        let canvas = annotate(&frame, &results);
        assert_eq!(canvas.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(*canvas.get_pixel(20, 150), SAFE_COLOR);
        assert_eq!(*canvas.get_pixel(400, 250), UNSAFE_COLOR);
    }
}
