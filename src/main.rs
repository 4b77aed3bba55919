use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ort::CPUExecutionProvider;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use helmet_safety::config::{load_presets, EngineConfig, Presets};
use helmet_safety::drawing::annotate;
use helmet_safety::{SafetyDetector, StrategyKind};

/// Checks the workers in a sequence of camera frames for safety helmets.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Camera context the frames come from: `ladder` or `platform`.
    #[arg(long, default_value_t = StrategyKind::Ladder)]
    mode: StrategyKind,

    /// ONNX export of the MobileNet-SSD person detector.
    #[arg(long, default_value = "models/mobilenet_ssd.onnx")]
    model: PathBuf,

    /// TOML file overriding the ladder/platform presets.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Directory to write annotated 800x600 frames into.
    #[arg(long)]
    annotate: Option<PathBuf>,

    /// Frames in playback order.
    #[arg(required = true)]
    frames: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    ort::init()
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .commit()?;

    let presets = match &args.config {
        Some(path) => load_presets(path)?,
        None => Presets::default(),
    };
    let kind = args.mode;
    let detector_config = match kind {
        StrategyKind::Ladder => presets.ladder,
        StrategyKind::Platform => presets.platform,
    };
    let engine_config = EngineConfig {
        model_path: args.model.clone(),
        intra_threads: args.threads,
        ..EngineConfig::default()
    };

    let mut detector = SafetyDetector::open(kind, detector_config, &engine_config)
        .context("could not start the detector; check the model path")?;

    if let Some(dir) = &args.annotate {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut unsafe_frames = 0usize;
    for path in &args.frames {
        let frame = match image::open(path) {
            Ok(img) => img.to_rgb8(),
            Err(e) => {
                warn!(frame = %path.display(), error = %e, "skipping unreadable frame");
                continue;
            }
        };

        let results = detector.process_frame(&frame);
        if results.iter().any(|r| !r.is_safe) {
            unsafe_frames += 1;
        }
        for r in results {
            println!(
                "{}\t{:?}\t{}\tx={} y={} w={} h={}\tcolor={:.3} shape={:.3} edge={:.3}",
                path.display(),
                r.label,
                if r.is_safe { "SAFE" } else { "NO HELMET" },
                r.bbox.x,
                r.bbox.y,
                r.bbox.width,
                r.bbox.height,
                r.signals.color.confidence,
                r.signals.shape.confidence,
                r.signals.edge.confidence,
            );
        }

        if let Some(dir) = &args.annotate {
            let name = path.file_stem().unwrap_or_default().to_string_lossy();
            let out = dir.join(format!("{name}.png"));
            annotate(&frame, results)
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
    }

    info!(
        frames = args.frames.len(),
        unsafe_frames,
        mode = %kind,
        "done"
    );

    Ok(())
}
