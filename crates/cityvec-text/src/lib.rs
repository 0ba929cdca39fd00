//! cityvec-text - Collinear-grouping text detection and erasure for the
//! cityvec vectorization pipeline.
//!
//! - **Centroid canvas** - one black pixel per component's centroid
//! - **Hough** - standard line detection over the centroid canvas
//! - **Cluster** - parallel lines around a detected line to catch
//!   ascenders, descenders, and capitals
//! - **Word grouping** - area-discontinuity boundary detection
//! - **Erase** - flood-fill removal of classified text from the black
//!   layer
//! - **Colour polygon recovery** - optional, stand-alone colour fill
//!   extraction from the source raster

mod centroid;
mod cluster;
mod colorpoly;
mod detect;
mod erase;
mod error;
mod hough;
mod wordgroup;

pub use centroid::render_centroid_canvas;
pub use cluster::{DEFAULT_CLUSTER_K, cluster_lines};
pub use colorpoly::recover_color_polygons;
pub use detect::{TextDetectionParams, detect_and_erase_text};
pub use erase::erase_text;
pub use error::{TextError, TextResult};
pub use hough::{HoughLine, hough_lines};
pub use wordgroup::{DEFAULT_WORD_BOUNDARY_FRACTION, classify_text, is_word_boundary, local_area_diff};
