use crate::detection::bbox::BoundingBox;
use crate::helmet::HelmetSignals;

/// Result capacity historically exposed across the foreign-function bridge.
pub const BRIDGE_RESULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Person,
    Helmet,
}

/// Verdict for one subject in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub label: Label,
    pub is_safe: bool,
    pub bbox: BoundingBox,
    /// Detector confidence for the subject; 0 when the box came from tracking.
    pub confidence: f32,
    pub head_roi: BoundingBox,
    pub signals: HelmetSignals,
}

/// Results for the frame most recently processed.
#[derive(Debug, Clone, Default)]
pub struct ResultSink {
    results: Vec<DetectionResult>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: DetectionResult) {
        self.results.push(result);
    }

    pub fn as_slice(&self) -> &[DetectionResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DetectionResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// At most `capacity` results plus the number actually handed out, for
    /// callers that can only accept a fixed-size buffer.
    pub fn truncated(&self, capacity: usize) -> (&[DetectionResult], usize) {
        let count = self.results.len().min(capacity);
        (&self.results[..count], count)
    }
}

impl<'a> IntoIterator for &'a ResultSink {
    type Item = &'a DetectionResult;
    type IntoIter = std::slice::Iter<'a, DetectionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
