use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the helmet-safety pipeline.
///
/// Per-frame conditions such as an empty frame, a missed person or a head
/// region that is too small are not errors; they show up as an empty result
/// set or non-triggered signals instead.
#[derive(Debug, Error)]
pub enum SafetyError {
    /// The inference engine could not load its model. The detector that
    /// requested it must not be used.
    #[error("failed to load detection model from {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, SafetyError>;
