use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use edgefx::{canny, CannyParams, EdgeSummary, GradientNorm, GradientOperator, ImageU8};
use image::GrayImage;
use log::{debug, info, LevelFilter};

mod logging;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperatorArg {
    Sobel,
    Scharr,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NormArg {
    L1,
    L2,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Runs Canny edge detection on an image file and writes the mask as PNG.
#[derive(Parser, Debug)]
#[command(name = "edgefx", version, about)]
struct Args {
    /// Input image (any format the `image` crate decodes).
    input: PathBuf,
    /// Output PNG. Defaults to `<input stem>_edges.png` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON file with detector parameters; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    low: Option<f32>,
    #[arg(long)]
    high: Option<f32>,
    /// Sigma of an explicit Gaussian pre-blur.
    #[arg(long)]
    sigma: Option<f32>,
    #[arg(long, value_enum)]
    operator: Option<OperatorArg>,
    #[arg(long, value_enum)]
    norm: Option<NormArg>,
    /// Run the detector this many times and report throughput.
    #[arg(long, default_value_t = 1)]
    repeat: u32,
    /// Also run `imageproc`'s Canny and report pixel agreement.
    #[arg(long)]
    compare: bool,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    /// log4rs configuration file, replaces `--log-level`.
    #[arg(long)]
    log_config: Option<PathBuf>,
}

fn load_params(args: &Args) -> anyhow::Result<CannyParams> {
    let mut params = match &args.config {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => CannyParams::default(),
    };
    if let Some(low) = args.low {
        params.low_threshold = low;
    }
    if let Some(high) = args.high {
        params.high_threshold = high;
    }
    if args.sigma.is_some() {
        params.blur_sigma = args.sigma;
    }
    if let Some(operator) = args.operator {
        params.operator = match operator {
            OperatorArg::Sobel => GradientOperator::Sobel,
            OperatorArg::Scharr => GradientOperator::Scharr,
        };
    }
    if let Some(norm) = args.norm {
        params.norm = match norm {
            NormArg::L1 => GradientNorm::L1,
            NormArg::L2 => GradientNorm::L2,
        };
    }
    params.validate()?;
    Ok(params)
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_owned());
    input.with_file_name(format!("{stem}_edges.png"))
}

fn run_detector(
    gray: &GrayImage,
    mask: &mut [u8],
    params: &CannyParams,
    repeat: u32,
) -> anyhow::Result<EdgeSummary> {
    let (width, height) = gray.dimensions();
    let image = ImageU8::new(width as usize, height as usize, gray.as_raw())?;

    let mut summary = EdgeSummary::default();
    let mut total = Duration::ZERO;
    for _ in 0..repeat.max(1) {
        let start = Instant::now();
        summary = canny(image, mask, params)?;
        total += start.elapsed();
    }
    let mean = total / repeat.max(1);
    info!(
        "{}x{} frame: {:.3} ms/frame, {:.1} fps over {} run(s)",
        width,
        height,
        mean.as_secs_f64() * 1e3,
        1.0 / mean.as_secs_f64().max(f64::EPSILON),
        repeat.max(1)
    );
    Ok(summary)
}

fn compare_with_imageproc(gray: &GrayImage, mask: &[u8], params: &CannyParams) {
    let reference =
        imageproc::edges::canny(gray, params.low_threshold, params.high_threshold);
    let same = reference
        .as_raw()
        .iter()
        .zip(mask)
        .filter(|(a, b)| a == b)
        .count();
    let reference_edges = reference.as_raw().iter().filter(|&&v| v == 255).count();
    info!(
        "imageproc canny: {} edge pixels, agreement {:.2}%",
        reference_edges,
        100.0 * same as f64 / mask.len().max(1) as f64
    );
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.into(), args.log_config.as_deref())?;

    let params = load_params(&args)?;
    debug!("detector parameters: {params:?}");

    let gray = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .to_luma8();
    let (width, height) = gray.dimensions();
    ensure!(width > 0 && height > 0, "empty image {}", args.input.display());
    info!("loaded {} ({}x{})", args.input.display(), width, height);

    let mut mask = vec![0u8; width as usize * height as usize];
    let summary = run_detector(&gray, &mut mask, &params, args.repeat)?;
    info!(
        "{} edge pixels ({} strong, {} promoted by hysteresis)",
        summary.edges(),
        summary.strong,
        summary.promoted
    );

    if args.compare {
        compare_with_imageproc(&gray, &mask, &params);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));
    GrayImage::from_raw(width, height, mask)
        .context("mask size does not match image size")?
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}
