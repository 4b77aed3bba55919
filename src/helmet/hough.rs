//! Gradient-directed circular Hough transform.
//!
//! Edge pixels vote for centres along their gradient direction for every
//! radius in range; the best-supported radius is then picked for each centre
//! that survives the vote threshold and the minimum-distance rule.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Edge pixels lying on the circle at the chosen radius.
    pub support: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct HoughParams {
    /// Minimum distance between accepted centres.
    pub min_dist: f32,
    /// Canny high threshold; the low threshold is half of it.
    pub canny_high: f32,
    /// Minimum accumulator votes for a centre candidate.
    pub vote_threshold: u32,
    pub min_radius: u32,
    pub max_radius: u32,
}

/// Finds circles in a grayscale image, strongest centre first.
pub fn hough_circles(image: &GrayImage, params: &HoughParams) -> Vec<Circle> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || params.max_radius == 0 {
        return Vec::new();
    }
    let min_radius = params.min_radius.max(1);
    let max_radius = params.max_radius.max(min_radius);

    let edges = canny(image, params.canny_high / 2.0, params.canny_high);
    let gx = horizontal_sobel(image);
    let gy = vertical_sobel(image);

    let w = width as usize;
    let h = height as usize;
    let mut accumulator = vec![0u32; w * h];
    let mut edge_points = Vec::new();

    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        edge_points.push((x as f32, y as f32));

        let dx = gx.get_pixel(x, y)[0] as f32;
        let dy = gy.get_pixel(x, y)[0] as f32;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude == 0.0 {
            continue;
        }
        let (ux, uy) = (dx / magnitude, dy / magnitude);

        for sign in [1.0f32, -1.0] {
            for r in min_radius..=max_radius {
                let cx = (x as f32 + sign * ux * r as f32).round();
                let cy = (y as f32 + sign * uy * r as f32).round();
                if cx < 0.0 || cy < 0.0 || cx >= width as f32 || cy >= height as f32 {
                    break;
                }
                accumulator[cy as usize * w + cx as usize] += 1;
            }
        }
    }

    let mut centres = local_maxima(&accumulator, w, h, params.vote_threshold);
    centres.sort_by(|a, b| b.2.cmp(&a.2));

    let min_dist_sq = params.min_dist * params.min_dist;
    let mut circles: Vec<Circle> = Vec::new();

    for (cx, cy, _) in centres {
        let (cx, cy) = (cx as f32, cy as f32);
        let too_close = circles.iter().any(|c| {
            let (ddx, ddy) = (c.x - cx, c.y - cy);
            ddx * ddx + ddy * ddy < min_dist_sq
        });
        if too_close {
            continue;
        }

        if let Some((radius, support)) =
            best_radius(&edge_points, cx, cy, min_radius, max_radius)
        {
            if support >= params.vote_threshold {
                circles.push(Circle {
                    x: cx,
                    y: cy,
                    radius: radius as f32,
                    support,
                });
            }
        }
    }

    circles
}

fn local_maxima(acc: &[u32], w: usize, h: usize, threshold: u32) -> Vec<(usize, usize, u32)> {
    let mut out = Vec::new();
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let v = acc[y * w + x];
            if v <= threshold {
                continue;
            }
            let left = acc[y * w + x - 1];
            let right = acc[y * w + x + 1];
            let up = acc[(y - 1) * w + x];
            let down = acc[(y + 1) * w + x];
            if v > left && v >= right && v > up && v >= down {
                out.push((x, y, v));
            }
        }
    }
    out
}

fn best_radius(
    edge_points: &[(f32, f32)],
    cx: f32,
    cy: f32,
    min_radius: u32,
    max_radius: u32,
) -> Option<(u32, u32)> {
    let mut histogram = vec![0u32; (max_radius + 1) as usize];
    for &(x, y) in edge_points {
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt().round() as u32;
        if (min_radius..=max_radius).contains(&d) {
            histogram[d as usize] += 1;
        }
    }

    histogram
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(r, &count)| (r as u32, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::draw_filled_circle_mut;

    fn params_for(rows: u32) -> HoughParams {
        HoughParams {
            min_dist: rows as f32 / 4.0,
            canny_high: 100.0,
            vote_threshold: 22,
            min_radius: rows / 12,
            max_radius: rows / 2,
        }
    }

    #[test]
    fn finds_a_single_disc() {
        let mut image = GrayImage::from_pixel(120, 120, Luma([30]));
        draw_filled_circle_mut(&mut image, (60, 60), 35, Luma([220]));

        let circles = hough_circles(&image, &params_for(120));
        assert!(!circles.is_empty());
        let c = circles[0];
        assert!((c.x - 60.0).abs() <= 2.0, "{c:?}");
        assert!((c.y - 60.0).abs() <= 2.0, "{c:?}");
        assert!((c.radius - 35.0).abs() <= 3.0, "{c:?}");
    }

    #[test]
    fn flat_image_has_no_circles() {
        let image = GrayImage::from_pixel(64, 64, Luma([90]));
        assert!(hough_circles(&image, &params_for(64)).is_empty());
    }

    #[test]
    fn best_radius_prefers_the_most_supported_distance() {
        let points = [(10.0, 0.0), (0.0, 10.0), (-10.0, 0.0), (0.0, 5.0)];
        assert_eq!(best_radius(&points, 0.0, 0.0, 1, 20), Some((10, 3)));
        assert_eq!(best_radius(&points, 0.0, 0.0, 11, 20), None);
    }
}
