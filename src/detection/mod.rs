pub mod bbox;
pub mod model;
pub mod preprocessing;

use image::RgbImage;
use ndarray::Array2;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use bbox::BoundingBox;
use model::{InferenceEngine, DETECTION_COLUMNS};

/// Class index of "person" in the detector's VOC label scheme.
pub const PERSON_CLASS: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonDetection {
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Keeps the rows classified as a person with confidence above
/// `confidence_threshold`, scaled from normalized to pixel coordinates.
pub fn process_detections(
    rows: &Array2<f32>,
    frame_width: u32,
    frame_height: u32,
    confidence_threshold: f32,
) -> Vec<PersonDetection> {
    if rows.ncols() < DETECTION_COLUMNS {
        return Vec::new();
    }

    let width = frame_width as f32;
    let height = frame_height as f32;

    rows.rows()
        .into_iter()
        .filter(|row| row[1] as i32 == PERSON_CLASS && row[2] > confidence_threshold)
        .map(|row| {
            let x1 = (row[3] * width) as i32;
            let y1 = (row[4] * height) as i32;
            let x2 = (row[5] * width) as i32;
            let y2 = (row[6] * height) as i32;

            PersonDetection {
                confidence: row[2],
                bbox: BoundingBox::from_corners(x1, y1, x2, y2),
            }
        })
        .collect()
}

/// The highest-confidence detection; the earliest one wins a tie.
pub fn best_detection(detections: &[PersonDetection]) -> Option<PersonDetection> {
    detections.iter().fold(None, |best, d| match best {
        Some(b) if b.confidence >= d.confidence => Some(b),
        _ => Some(*d),
    })
}

/// Finds people in a frame with a single forward pass of the detector.
///
/// Absence of a detection is a normal outcome: empty frames and engine
/// failures both come back as "nobody found".
pub struct PersonLocator {
    engine: Box<dyn InferenceEngine>,
    config: EngineConfig,
}

impl PersonLocator {
    pub fn new(engine: Box<dyn InferenceEngine>, config: EngineConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn locate_all(
        &mut self,
        frame: &RgbImage,
        confidence_threshold: f32,
    ) -> Vec<PersonDetection> {
        if frame.width() == 0 || frame.height() == 0 {
            return Vec::new();
        }

        let input = match preprocessing::preprocess_frame(frame, &self.config) {
            Ok(input) => input,
            Err(e) => {
                warn!(error = %e, "failed to build detector input");
                return Vec::new();
            }
        };

        let rows = match self.engine.forward(input) {
            Ok(rows) => rows,
            Err(e) => {
                let engine = self.engine.name();
                warn!(engine, error = %e, "person detector produced no output");
                return Vec::new();
            }
        };

        let detections =
            process_detections(&rows, frame.width(), frame.height(), confidence_threshold);
        debug!(candidates = rows.nrows(), persons = detections.len(), "person detector ran");
        detections
    }

    pub fn locate_best(
        &mut self,
        frame: &RgbImage,
        confidence_threshold: f32,
    ) -> Option<PersonDetection> {
        best_detection(&self.locate_all(frame, confidence_threshold))
    }
}
