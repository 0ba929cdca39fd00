//! Top-level error type, aggregating every crate's error into the exit-code
//! taxonomy the binary reports on.

use thiserror::Error;

/// Fatal errors the pipeline can produce, mapped to process exit codes by
/// [`crate::error::CliError::exit_code`].
#[derive(Debug, Error)]
pub enum CliError {
    /// The input path does not exist or could not be opened.
    #[error("input not found: {0}")]
    InputNotFound(std::path::PathBuf),

    /// The `image` crate could not decode the input as a raster image.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(#[from] image::ImageError),

    /// Failed to write the output SVG.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A connected component failed an internal consistency check (zero
    /// area, or an MBR that doesn't bound its own seed pixel). An
    /// invariant breach inside the pipeline, not a recoverable input
    /// problem.
    #[error("degenerate component: {0}")]
    DegenerateComponent(String),

    #[error("core error: {0}")]
    Core(#[from] cityvec_core::Error),

    #[error("region error: {0}")]
    Region(#[from] cityvec_region::RegionError),

    #[error("skeleton error: {0}")]
    Skeleton(#[from] cityvec_skeleton::SkeletonError),

    #[error("graph error: {0}")]
    Graph(#[from] cityvec_graph::GraphError),

    #[error("svg error: {0}")]
    Svg(#[from] cityvec_svg::SvgError),

    #[error("text error: {0}")]
    Text(#[from] cityvec_text::TextError),
}

impl CliError {
    /// Process exit code per the documented 3-tier scheme: `1` for a
    /// missing input file, `2` for an undecodable image, `3` for any
    /// other fatal pipeline error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InputNotFound(_) => 1,
            CliError::UnsupportedFormat(_) => 2,
            _ => 3,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
