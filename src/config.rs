use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SafetyError};

/// Settings for the person detector's inference session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub model_path: PathBuf,
    pub input_size: u32,
    pub input_mean: f32,
    pub input_scale: f32,
    pub intra_threads: usize,
    pub input_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/mobilenet_ssd.onnx"),
            input_size: 300,
            input_mean: 127.5,
            input_scale: 0.007843,
            intra_threads: 4,
            input_name: "data".to_string(),
        }
    }
}

/// Thresholds and geometry for one camera context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Minimum detector confidence for a "person" candidate (exclusive).
    pub confidence_threshold: f32,
    /// Fraction of the person box height taken as the head region.
    pub head_fraction: f32,
    pub padding_x: i32,
    pub padding_y: i32,
    /// Head regions must be strictly wider than this to be classified.
    pub min_roi_width: i32,
    pub color_threshold: f32,
    pub shape_threshold: f32,
    pub edge_threshold: f32,
    /// Carried from the deployed presets; the boolean fusion rules do not read it.
    pub fusion_threshold: f32,
}

impl DetectorConfig {
    pub fn ladder() -> Self {
        Self {
            confidence_threshold: 0.15,
            head_fraction: 0.28,
            padding_x: 25,
            padding_y: 60,
            min_roi_width: 20,
            color_threshold: 0.04,
            shape_threshold: 0.3,
            edge_threshold: 0.04,
            fusion_threshold: 0.45,
        }
    }

    pub fn platform() -> Self {
        Self {
            confidence_threshold: 0.15,
            head_fraction: 0.25,
            padding_x: 0,
            padding_y: 0,
            min_roi_width: 10,
            color_threshold: 0.04,
            shape_threshold: 0.3,
            edge_threshold: 0.04,
            fusion_threshold: 0.5,
        }
    }

    fn apply(mut self, overrides: &DetectorConfigFile) -> Self {
        if let Some(v) = overrides.confidence_threshold {
            self.confidence_threshold = v;
        }
        if let Some(v) = overrides.head_fraction {
            self.head_fraction = v;
        }
        if let Some(v) = overrides.padding_x {
            self.padding_x = v;
        }
        if let Some(v) = overrides.padding_y {
            self.padding_y = v;
        }
        if let Some(v) = overrides.min_roi_width {
            self.min_roi_width = v;
        }
        if let Some(v) = overrides.color_threshold {
            self.color_threshold = v;
        }
        if let Some(v) = overrides.shape_threshold {
            self.shape_threshold = v;
        }
        if let Some(v) = overrides.edge_threshold {
            self.edge_threshold = v;
        }
        if let Some(v) = overrides.fusion_threshold {
            self.fusion_threshold = v;
        }
        self
    }
}

/// The two named presets selected by the mode switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presets {
    pub ladder: DetectorConfig,
    pub platform: DetectorConfig,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            ladder: DetectorConfig::ladder(),
            platform: DetectorConfig::platform(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PresetsFile {
    ladder: Option<DetectorConfigFile>,
    platform: Option<DetectorConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DetectorConfigFile {
    confidence_threshold: Option<f32>,
    head_fraction: Option<f32>,
    padding_x: Option<i32>,
    padding_y: Option<i32>,
    min_roi_width: Option<i32>,
    color_threshold: Option<f32>,
    shape_threshold: Option<f32>,
    edge_threshold: Option<f32>,
    fusion_threshold: Option<f32>,
}

/// Reads preset overrides from a TOML file. Fields absent from the file keep
/// their built-in preset values.
pub fn load_presets(path: &Path) -> Result<Presets> {
    let raw = std::fs::read_to_string(path).map_err(|e| SafetyError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_presets(&raw).map_err(|message| SafetyError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_presets(raw: &str) -> std::result::Result<Presets, String> {
    let file: PresetsFile = toml::from_str(raw).map_err(|e| e.to_string())?;
    let defaults = Presets::default();
    let presets = Presets {
        ladder: match &file.ladder {
            Some(overrides) => defaults.ladder.apply(overrides),
            None => defaults.ladder,
        },
        platform: match &file.platform {
            Some(overrides) => defaults.platform.apply(overrides),
            None => defaults.platform,
        },
    };
    validate(&presets.ladder, "ladder")?;
    validate(&presets.platform, "platform")?;
    Ok(presets)
}

fn validate(cfg: &DetectorConfig, name: &str) -> std::result::Result<(), String> {
    if !(0.0..=1.0).contains(&cfg.head_fraction) {
        return Err(format!("{name}.head_fraction must be within [0, 1]"));
    }
    if cfg.padding_x < 0 || cfg.padding_y < 0 {
        return Err(format!("{name} padding must not be negative"));
    }
    Ok(())
}
