//! Ladder and platform detection strategies.
//!
//! The two contexts share one pipeline: locate a person (with tracking
//! fallback), shape the box, cut the head region, read the helmet cues and
//! fuse them. [`StrategyKind::params`] holds everything that differs between
//! them; the pipeline steps are free functions written once.

use std::fmt;
use std::str::FromStr;

use image::RgbImage;
use tracing::{debug, info};

use crate::config::{DetectorConfig, EngineConfig};
use crate::detection::bbox::{enlarge_fixed, head_region, BoundingBox};
use crate::detection::model::OrtEngine;
use crate::detection::PersonLocator;
use crate::error::Result;
use crate::helmet::{classify_color, classify_edge, classify_shape, HelmetSignals};
use crate::sink::{DetectionResult, Label, ResultSink};
use crate::tracking::TrackingState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Elevated ladder work area: one tracked worker, close framing.
    Ladder,
    /// Aerial work platform: every detected worker, wide framing.
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectPolicy {
    /// The single best detection, carried across missed frames.
    SingleTracked,
    /// Every qualifying detection, each evaluated on its own.
    EveryDetection,
}

/// What distinguishes one strategy from the other.
#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    pub subjects: SubjectPolicy,
    /// Grow the person box by the configured padding before cutting the head.
    pub enlarge: bool,
    pub evaluate_shape: bool,
    pub evaluate_edge: bool,
    pub fusion: fn(&HelmetSignals) -> bool,
}

/// Close framing makes the dome outline reliable enough to count.
pub fn ladder_fusion(signals: &HelmetSignals) -> bool {
    signals.color.triggered || signals.shape.triggered
}

/// Subjects are too small for the shape cue; only color is trusted.
pub fn platform_fusion(signals: &HelmetSignals) -> bool {
    signals.color.triggered
}

impl StrategyKind {
    pub fn params(self) -> StrategyParams {
        match self {
            StrategyKind::Ladder => StrategyParams {
                subjects: SubjectPolicy::SingleTracked,
                enlarge: true,
                evaluate_shape: true,
                evaluate_edge: true,
                fusion: ladder_fusion,
            },
            StrategyKind::Platform => StrategyParams {
                subjects: SubjectPolicy::EveryDetection,
                enlarge: false,
                evaluate_shape: false,
                evaluate_edge: false,
                fusion: platform_fusion,
            },
        }
    }

    pub fn default_config(self) -> DetectorConfig {
        match self {
            StrategyKind::Ladder => DetectorConfig::ladder(),
            StrategyKind::Platform => DetectorConfig::platform(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Ladder => "ladder",
            StrategyKind::Platform => "platform",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ladder" => Ok(StrategyKind::Ladder),
            "platform" => Ok(StrategyKind::Platform),
            other => Err(format!("unknown mode '{other}', expected ladder or platform")),
        }
    }
}

/// The box a subject is judged and reported by.
pub fn shape_person_box(
    raw: &BoundingBox,
    params: &StrategyParams,
    config: &DetectorConfig,
    frame_width: u32,
    frame_height: u32,
) -> BoundingBox {
    if params.enlarge {
        enlarge_fixed(raw, config.padding_x, config.padding_y, frame_width, frame_height)
    } else {
        raw.clamp_to(frame_width, frame_height)
    }
}

/// Reads the helmet cues for a head region of the frame. Regions that are
/// empty or not wider than `min_roi_width` leave every cue non-triggered.
pub fn evaluate_head(
    frame: &RgbImage,
    head_roi: &BoundingBox,
    params: &StrategyParams,
    config: &DetectorConfig,
) -> HelmetSignals {
    let head_roi = head_roi.clamp_to(frame.width(), frame.height());
    if head_roi.is_empty() || head_roi.width <= config.min_roi_width {
        debug!(?head_roi, min_width = config.min_roi_width, "head region too small, skipped");
        return HelmetSignals::default();
    }

    let head = image::imageops::crop_imm(
        frame,
        head_roi.x as u32,
        head_roi.y as u32,
        head_roi.width as u32,
        head_roi.height as u32,
    )
    .to_image();

    let mut signals = HelmetSignals {
        color: classify_color(&head, config.color_threshold),
        ..HelmetSignals::default()
    };
    if params.evaluate_shape {
        signals.shape = classify_shape(&head, config.shape_threshold);
    }
    if params.evaluate_edge {
        signals.edge = classify_edge(&head, config.edge_threshold);
    }
    signals
}

/// Full verdict for one subject box.
pub fn assess_subject(
    frame: &RgbImage,
    raw: &BoundingBox,
    confidence: f32,
    params: &StrategyParams,
    config: &DetectorConfig,
) -> DetectionResult {
    let (width, height) = frame.dimensions();
    let person = shape_person_box(raw, params, config, width, height);
    let head_roi = head_region(&person, config.head_fraction, width, height);
    let signals = evaluate_head(frame, &head_roi, params, config);
    let is_safe = (params.fusion)(&signals);

    debug!(
        ?person,
        ?head_roi,
        color = signals.color.confidence,
        shape = signals.shape.confidence,
        edge = signals.edge.confidence,
        is_safe,
        "subject assessed"
    );

    DetectionResult {
        label: Label::Person,
        is_safe,
        bbox: person,
        confidence,
        head_roi,
        signals,
    }
}

/// Runs one frame through the pipeline for `kind`, appending to `sink`.
pub fn process(
    frame: &RgbImage,
    kind: StrategyKind,
    config: &DetectorConfig,
    locator: &mut PersonLocator,
    tracking: &mut TrackingState,
    sink: &mut ResultSink,
) {
    if frame.width() == 0 || frame.height() == 0 {
        return;
    }

    let params = kind.params();
    match params.subjects {
        SubjectPolicy::SingleTracked => {
            let detection = locator.locate_best(frame, config.confidence_threshold);
            let confidence = detection.map_or(0.0, |d| d.confidence);
            if let Some(raw) = tracking.resolve(detection.map(|d| d.bbox)) {
                sink.push(assess_subject(frame, &raw, confidence, &params, config));
            }
        }
        SubjectPolicy::EveryDetection => {
            let detections = locator.locate_all(frame, config.confidence_threshold);
            let best = crate::detection::best_detection(&detections);
            if detections.is_empty() {
                if let Some(raw) = tracking.resolve(None) {
                    sink.push(assess_subject(frame, &raw, 0.0, &params, config));
                }
                return;
            }
            tracking.resolve(best.map(|d| d.bbox));
            for d in &detections {
                sink.push(assess_subject(frame, &d.bbox, d.confidence, &params, config));
            }
        }
    }
}

/// Owned handle for one camera context.
///
/// Holds the detector engine, the tracking memory and the results of the
/// last frame. Every operation takes `&mut self`; sharing one instance
/// between threads needs external serialization. The engine is released
/// when the handle is dropped.
pub struct SafetyDetector {
    kind: StrategyKind,
    config: DetectorConfig,
    locator: PersonLocator,
    tracking: TrackingState,
    sink: ResultSink,
}

impl SafetyDetector {
    pub fn new(kind: StrategyKind, config: DetectorConfig, locator: PersonLocator) -> Self {
        Self {
            kind,
            config,
            locator,
            tracking: TrackingState::new(),
            sink: ResultSink::new(),
        }
    }

    /// Loads the ONNX person detector. A load failure is fatal for this
    /// handle and is reported as [`crate::SafetyError::ModelLoad`].
    pub fn open(
        kind: StrategyKind,
        config: DetectorConfig,
        engine_config: &EngineConfig,
    ) -> Result<Self> {
        let engine = OrtEngine::new(engine_config)?;
        let locator = PersonLocator::new(Box::new(engine), engine_config.clone());
        info!(mode = %kind, engine = locator.engine_name(), "safety detector ready");
        Ok(Self::new(kind, config, locator))
    }

    /// Results of this frame replace those of the previous one.
    pub fn process_frame(&mut self, frame: &RgbImage) -> &[DetectionResult] {
        self.sink.clear();
        process(
            frame,
            self.kind,
            &self.config,
            &mut self.locator,
            &mut self.tracking,
            &mut self.sink,
        );
        self.sink.as_slice()
    }

    pub fn results(&self) -> &ResultSink {
        &self.sink
    }

    pub fn clear_results(&mut self) {
        self.sink.clear();
    }

    /// Forgets the tracked subject and any pending results.
    pub fn reset_state(&mut self) {
        self.tracking.reset();
        self.sink.clear();
    }

    pub fn switch_mode(&mut self, kind: StrategyKind, config: DetectorConfig) {
        info!(from = %self.kind, to = %kind, "switching detection mode");
        self.kind = kind;
        self.config = config;
        self.reset_state();
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn tracking(&self) -> &TrackingState {
        &self.tracking
    }
}
