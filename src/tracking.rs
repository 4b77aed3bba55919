use tracing::debug;

use crate::detection::bbox::BoundingBox;

/// Last accepted person box for one strategy instance.
///
/// A missed detection reuses the previous box so brief detector flicker does
/// not drop the subject. The state must be reset whenever the camera context
/// changes: a box from another scene is worse than no box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingState {
    last_box: BoundingBox,
    has_ever_detected: bool,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_box(&self) -> BoundingBox {
        self.last_box
    }

    pub fn has_ever_detected(&self) -> bool {
        self.has_ever_detected
    }

    /// Box to analyse this frame, or `None` when nothing was ever seen.
    pub fn resolve(&mut self, detection: Option<BoundingBox>) -> Option<BoundingBox> {
        match detection {
            Some(bbox) => {
                self.last_box = bbox;
                self.has_ever_detected = true;
                Some(bbox)
            }
            None if self.has_ever_detected => {
                debug!(last_box = ?self.last_box, "detector missed, reusing last box");
                Some(self.last_box)
            }
            None => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
