use image::{GrayImage, RgbImage};
use imageproc::contrast::equalize_histogram;
use imageproc::filter::separable_filter_equal;

use super::hough::{hough_circles, Circle, HoughParams};
use super::{is_empty, to_gray, SignalReading};

const BLUR_SIGMA: f32 = 1.2;
const BLUR_TAPS: usize = 5;
const CANNY_HIGH: f32 = 100.0;
const VOTE_THRESHOLD: u32 = 22;

fn gaussian_kernel(taps: usize, sigma: f32) -> Vec<f32> {
    let half = (taps / 2) as f32;
    let weights: Vec<f32> = (0..taps)
        .map(|i| {
            let d = i as f32 - half;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Equalized and lightly blurred grayscale used for circle search.
pub fn prepare(region: &RgbImage) -> GrayImage {
    let equalized = equalize_histogram(&to_gray(region));
    separable_filter_equal(&equalized, &gaussian_kernel(BLUR_TAPS, BLUR_SIGMA))
}

/// Looks for a helmet-sized dome in the region.
///
/// Confidence is the strongest circle's diameter relative to the smaller
/// region side. The reading triggers only when that circle's centre is away
/// from the left and right crop edges.
pub fn classify_shape(region: &RgbImage, threshold: f32) -> SignalReading {
    if is_empty(region) {
        return SignalReading::default();
    }

    let (cols, rows) = region.dimensions();
    let params = HoughParams {
        min_dist: (rows / 4) as f32,
        canny_high: CANNY_HIGH,
        vote_threshold: VOTE_THRESHOLD,
        min_radius: rows / 12,
        max_radius: rows / 2,
    };
    let circles = hough_circles(&prepare(region), &params);

    judge(circles.first(), cols, rows, threshold)
}

fn judge(strongest: Option<&Circle>, cols: u32, rows: u32, threshold: f32) -> SignalReading {
    let Some(c) = strongest else {
        return SignalReading::default();
    };
    let confidence = 2.0 * c.radius / cols.min(rows) as f32;
    let centred = c.x > cols as f32 * 0.1 && c.x < cols as f32 * 0.9;
    SignalReading {
        triggered: centred && confidence > threshold,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use imageproc::drawing::draw_filled_circle_mut;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(5, 1.2);
        assert_eq!(k.len(), 5);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!((k[0] - k[4]).abs() < 1e-6);
        assert!(k[2] > k[1] && k[1] > k[0]);
    }

    #[test]
    fn centred_dome_triggers() {
        let mut region = RgbImage::from_pixel(120, 120, Rgb([35, 35, 35]));
        draw_filled_circle_mut(&mut region, (60, 60), 35, Rgb([200, 200, 200]));

        let reading = classify_shape(&region, 0.3);
        assert!(reading.triggered, "{reading:?}");
        assert!(reading.confidence > 0.5 && reading.confidence < 0.7);
    }

    fn circle_at(x: f32, radius: f32) -> Circle {
        Circle {
            x,
            y: 20.0,
            radius,
            support: 40,
        }
    }

    #[test]
    fn circle_clipped_at_crop_edge_does_not_trigger() {
        let left = judge(Some(&circle_at(9.0, 15.0)), 100, 40, 0.3);
        assert!((left.confidence - 0.75).abs() < 1e-6);
        assert!(!left.triggered);

        let right = judge(Some(&circle_at(91.0, 15.0)), 100, 40, 0.3);
        assert!(!right.triggered);

        let centred = judge(Some(&circle_at(50.0, 15.0)), 100, 40, 0.3);
        assert!(centred.triggered);
    }

    #[test]
    fn small_circle_does_not_trigger() {
        let reading = judge(Some(&circle_at(50.0, 5.0)), 100, 40, 0.3);
        assert!((reading.confidence - 0.25).abs() < 1e-6);
        assert!(!reading.triggered);
    }

    #[test]
    fn flat_region_reads_nothing() {
        let region = RgbImage::from_pixel(60, 40, Rgb([70, 70, 70]));
        assert_eq!(classify_shape(&region, 0.3), SignalReading::default());
    }

    #[test]
    fn empty_region_reads_nothing() {
        assert_eq!(classify_shape(&RgbImage::new(0, 0), 0.3), SignalReading::default());
    }
}
