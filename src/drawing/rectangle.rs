use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detection::bbox::BoundingBox;

/// Draws a hollow box `thickness` pixels wide, growing inward from the
/// outline. Parts outside the image are skipped.
pub fn draw_rectangle(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, thickness: u32) {
    let bbox = bbox.clamp_to(image.width(), image.height());

    for inset in 0..thickness as i32 {
        let width = bbox.width - 2 * inset;
        let height = bbox.height - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(bbox.x + inset, bbox.y + inset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlines_box_and_leaves_inside() {
        let mut image = RgbImage::new(20, 20);
        let red = Rgb([255, 0, 0]);
        draw_rectangle(&mut image, &BoundingBox::new(2, 3, 10, 8), red, 2);

        assert_eq!(*image.get_pixel(2, 3), red);
        assert_eq!(*image.get_pixel(11, 10), red);
        assert_eq!(*image.get_pixel(3, 4), red);
        assert_eq!(*image.get_pixel(6, 6), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(12, 3), Rgb([0, 0, 0]));
    }

    #[test]
    fn box_outside_image_is_ignored() {
        let mut image = RgbImage::new(10, 10);
        draw_rectangle(&mut image, &BoundingBox::new(50, 50, 5, 5), Rgb([1, 2, 3]), 3);
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
