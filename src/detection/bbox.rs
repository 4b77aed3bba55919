/// Width of the fixed display canvas boxes are scaled into for presentation.
pub const CANVAS_WIDTH: u32 = 800;
/// Height of the fixed display canvas.
pub const CANVAS_HEIGHT: u32 = 600;

/// Axis-aligned box in frame pixel coordinates.
///
/// Width and height are never negative. An intersection without overlap
/// yields the all-zero box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Builds a box from two opposite corners given in any order.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: x1.abs_diff(x2).min(i32::MAX as u32) as i32,
            height: y1.abs_diff(y2).min(i32::MAX as u32) as i32,
        }
    }

    /// The full-frame rectangle `[0, width) x [0, height)`.
    pub fn frame(width: u32, height: u32) -> Self {
        Self::new(0, 0, to_i32(width), to_i32(height))
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn intersect(&self, other: &BoundingBox) -> BoundingBox {
        let x1 = (self.x as i64).max(other.x as i64);
        let y1 = (self.y as i64).max(other.y as i64);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return BoundingBox::default();
        }

        BoundingBox {
            x: x1 as i32,
            y: y1 as i32,
            width: (x2 - x1) as i32,
            height: (y2 - y1) as i32,
        }
    }

    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> BoundingBox {
        self.intersect(&BoundingBox::frame(frame_width, frame_height))
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && (x as i64) < self.right() && y >= self.y && (y as i64) < self.bottom()
    }
}

/// Rescales a box from source frame coordinates into the 800x600 display
/// canvas, each axis independently. Presentation only.
pub fn scale_to_canvas(bbox: &BoundingBox, source_width: u32, source_height: u32) -> BoundingBox {
    if source_width == 0 || source_height == 0 {
        return BoundingBox::default();
    }

    let sx = CANVAS_WIDTH as f32 / source_width as f32;
    let sy = CANVAS_HEIGHT as f32 / source_height as f32;

    BoundingBox::new(
        (bbox.x as f32 * sx) as i32,
        (bbox.y as f32 * sy) as i32,
        (bbox.width as f32 * sx) as i32,
        (bbox.height as f32 * sy) as i32,
    )
}

/// Grows a box by `pad_x` on the left and right and `pad_y` on the top and
/// bottom, then clips it to the frame. May return the empty box.
pub fn enlarge_fixed(
    bbox: &BoundingBox,
    pad_x: i32,
    pad_y: i32,
    frame_width: u32,
    frame_height: u32,
) -> BoundingBox {
    let grown = BoundingBox::new(
        bbox.x.saturating_sub(pad_x),
        bbox.y.saturating_sub(pad_y),
        bbox.width.saturating_add(pad_x.saturating_mul(2)),
        bbox.height.saturating_add(pad_y.saturating_mul(2)),
    );
    grown.clamp_to(frame_width, frame_height)
}

/// Top `fraction` of the box height, clipped to the frame.
pub fn head_region(
    bbox: &BoundingBox,
    fraction: f32,
    frame_width: u32,
    frame_height: u32,
) -> BoundingBox {
    let height = (bbox.height as f32 * fraction) as i32;
    BoundingBox::new(bbox.x, bbox.y, bbox.width, height).clamp_to(frame_width, frame_height)
}

fn to_i32(v: u32) -> i32 {
    v.min(i32::MAX as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_without_overlap_is_zero_box() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(20, 20, 5, 5);
        assert_eq!(a.intersect(&b), BoundingBox::default());
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn from_corners_normalizes_order() {
        let b = BoundingBox::from_corners(50, 80, 10, 20);
        assert_eq!(b, BoundingBox::new(10, 20, 40, 60));
    }

    #[test]
    fn enlarge_adds_padding_inside_frame() {
        let b = BoundingBox::new(100, 100, 50, 80);
        let out = enlarge_fixed(&b, 25, 60, 640, 480);
        assert_eq!(out, BoundingBox::new(75, 40, 100, 200));
    }

    #[test]
    fn enlarge_clips_at_frame_edges() {
        let b = BoundingBox::new(5, 10, 50, 80);
        let out = enlarge_fixed(&b, 25, 60, 60, 100);
        assert_eq!(out, BoundingBox::new(0, 0, 60, 100));
    }

    #[test]
    fn enlarge_outside_frame_is_empty() {
        let b = BoundingBox::new(-500, -500, 10, 10);
        assert!(enlarge_fixed(&b, 5, 5, 100, 100).is_empty());
    }

    #[test]
    fn enlarge_result_always_within_frame() {
        let frames = [(1u32, 1u32), (64, 48), (640, 480)];
        let coords = [-1000, -30, -1, 0, 7, 63, 200, 639, 5000];
        let sizes = [0, 1, 15, 120, 900];
        let pads = [(0, 0), (25, 60), (3, 0), (400, 400)];

        for &(fw, fh) in &frames {
            let frame = BoundingBox::frame(fw, fh);
            for &x in &coords {
                for &y in &coords {
                    for &w in &sizes {
                        for &h in &sizes {
                            for &(px, py) in &pads {
                                let out =
                                    enlarge_fixed(&BoundingBox::new(x, y, w, h), px, py, fw, fh);
                                if out.is_empty() {
                                    continue;
                                }
                                assert!(out.x >= 0 && out.y >= 0);
                                assert!(out.right() <= frame.right());
                                assert!(out.bottom() <= frame.bottom());
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn scale_to_canvas_scales_axes_independently() {
        let b = BoundingBox::new(160, 120, 320, 240);
        let out = scale_to_canvas(&b, 1600, 480);
        assert_eq!(out, BoundingBox::new(80, 150, 160, 300));
    }

    #[test]
    fn scale_to_canvas_zero_source_is_empty() {
        let b = BoundingBox::new(1, 2, 3, 4);
        assert!(scale_to_canvas(&b, 0, 100).is_empty());
    }

    #[test]
    fn head_region_takes_top_fraction() {
        let b = BoundingBox::new(10, 20, 100, 200);
        assert_eq!(head_region(&b, 0.25, 640, 480), BoundingBox::new(10, 20, 100, 50));
        assert_eq!(head_region(&b, 0.28, 640, 480), BoundingBox::new(10, 20, 100, 56));
    }
}
