use ndarray::{Array2, Array4};
use ort::{GraphOptimizationLevel, Session};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{Result, SafetyError};

/// Columns every detection row must expose:
/// `(image_id, class, confidence, x1, y1, x2, y2)`.
pub const DETECTION_COLUMNS: usize = 7;

/// Boundary to the neural inference engine.
///
/// `forward` takes the preprocessed NCHW blob and returns one row per
/// candidate detection with at least [`DETECTION_COLUMNS`] columns, box
/// corners normalized to `[0, 1]`.
pub trait InferenceEngine: Send {
    fn name(&self) -> &'static str;

    fn forward(&mut self, input: Array4<f32>) -> Result<Array2<f32>>;
}

/// Single-shot multibox detector running on ONNX Runtime.
pub struct OrtEngine {
    session: Session,
    input_name: String,
}

impl OrtEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let load = || -> std::result::Result<Session, ort::Error> {
            Session::builder()?
                .with_optimization_level(GraphOptimizationLevel::Level3)?
                .with_intra_threads(config.intra_threads)?
                .commit_from_file(&config.model_path)
        };
        let session = load().map_err(|source| SafetyError::ModelLoad {
            path: config.model_path.clone(),
            source,
        })?;

        info!(model = %config.model_path.display(), "detection model loaded");

        Ok(Self {
            session,
            input_name: config.input_name.clone(),
        })
    }
}

impl InferenceEngine for OrtEngine {
    fn name(&self) -> &'static str {
        "onnxruntime"
    }

    fn forward(&mut self, input: Array4<f32>) -> Result<Array2<f32>> {
        let inputs = ort::inputs![self.input_name.as_str() => input.view()]
            .map_err(|e| SafetyError::Inference(e.to_string()))?;
        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| SafetyError::Inference(e.to_string()))?;
        let tensor = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| SafetyError::Inference(e.to_string()))?;

        // The SSD head reports [1, 1, N, 7]; flatten everything but the row width.
        let cols = tensor.shape().last().copied().unwrap_or(0);
        if cols < DETECTION_COLUMNS {
            return Err(SafetyError::Inference(format!(
                "expected at least {DETECTION_COLUMNS} columns per detection, got {cols}"
            )));
        }
        let values: Vec<f32> = tensor.iter().copied().collect();
        let rows = values.len() / cols;

        Ok(Array2::from_shape_vec((rows, cols), values)?)
    }
}
