//! `cityvec` - vectorize a raster city map into an SVG line drawing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cityvec_cli::error::CliError;
use cityvec_cli::pipeline::{self, PipelineParams};

/// Vectorize a raster city map into an SVG line drawing.
#[derive(Parser, Debug)]
#[command(name = "cityvec", version, about)]
struct Args {
    /// Path to the input raster image (any format the `image` crate decodes).
    input: PathBuf,

    /// Output SVG path. Defaults to the input path with its extension
    /// replaced by `.svg`.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Black-layer threshold, one value per BGR channel.
    #[arg(long, value_delimiter = ',', num_args = 3, default_values_t = [128u8, 128, 128])]
    threshold: Vec<u8>,

    /// Drop components with area below `max_area / area_ratio`.
    #[arg(long, default_value_t = 10)]
    area_ratio: u32,

    /// Douglas-Peucker simplification tolerance, in pixels.
    #[arg(long, default_value_t = 1.0)]
    epsilon: f64,

    /// Minimum number of Hough lines to require before stopping threshold relaxation.
    #[arg(long, default_value_t = 1)]
    hough_min_lines: usize,

    /// Number of parallel lines stepped in each direction around a detected Hough line.
    #[arg(long, default_value_t = 5)]
    hough_cluster_k: usize,

    /// Spacing, in pixels, between parallel cluster lines.
    #[arg(long, default_value_t = 3.0)]
    hough_rho_step: f64,

    /// Fraction of the local window median area a jump must exceed to be a word boundary.
    #[arg(long, default_value_t = 0.5)]
    word_boundary_fraction: f64,

    /// Half-width of the window used to sample local stroke width.
    #[arg(long, default_value_t = 10)]
    stroke_window: u32,

    /// Recover filled colour regions from the source raster as an additional SVG layer.
    #[arg(long, default_value_t = false)]
    color_polygons: bool,

    /// Raise the log level to debug.
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Lower the log level to errors only.
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn configure_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> Result<(), CliError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("svg"));

    let threshold: [u8; 3] = [args.threshold[0], args.threshold[1], args.threshold[2]];

    let params = PipelineParams {
        threshold,
        area_ratio: args.area_ratio,
        epsilon: args.epsilon,
        hough_min_lines: args.hough_min_lines,
        hough_cluster_k: args.hough_cluster_k,
        hough_rho_step: args.hough_rho_step,
        word_boundary_fraction: args.word_boundary_fraction,
        stroke_window: args.stroke_window,
        color_polygons: args.color_polygons,
    };

    tracing::info!(input = %args.input.display(), output = %output.display(), "starting vectorization");

    let bgr = pipeline::load_bgr_bitmap(&args.input)?;
    let svg = pipeline::run(&bgr, &params)?;
    std::fs::write(&output, svg)?;

    tracing::info!(output = %output.display(), "vectorization complete");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    configure_logging(args.verbose, args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "vectorization failed");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
