//! Per-frame helmet-safety detection for fixed ladder and work-platform
//! cameras.
//!
//! A [`SafetyDetector`] finds a worker with a single-shot person detector,
//! cuts the head region out of the person box and decides from color and
//! shape cues whether a helmet is worn.

pub mod config;
pub mod detection;
pub mod drawing;
pub mod error;
pub mod helmet;
pub mod sink;
pub mod strategy;
pub mod tracking;

pub use config::{DetectorConfig, EngineConfig, Presets};
pub use detection::bbox::BoundingBox;
pub use detection::model::{InferenceEngine, OrtEngine};
pub use detection::{PersonDetection, PersonLocator};
pub use error::SafetyError;
pub use helmet::{HelmetSignals, SignalReading};
pub use sink::{DetectionResult, Label, ResultSink};
pub use strategy::{SafetyDetector, StrategyKind};
pub use tracking::TrackingState;
