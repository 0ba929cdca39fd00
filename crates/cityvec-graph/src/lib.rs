//! cityvec-graph - Raster-to-polyline graph extraction, node fusion, and
//! polyline refinement for the cityvec vectorization pipeline.
//!
//! - **Extraction** - Moore-neighbourhood walk of the thinned skeleton
//! - **Fusion** - merge lines that physically touch into shared nodes
//! - **Simplification** - Douglas-Peucker polyline reduction
//! - **Stroke width** - local line-width estimate from the black layer

mod error;
pub mod extract;
pub mod fuse;
pub mod simplify;
pub mod stroke_width;
mod types;

pub use error::{GraphError, GraphResult};
pub use extract::{NodeToLine, extract_graph};
pub use fuse::fuse_nodes;
pub use simplify::douglas_peucker;
pub use stroke_width::{local_line_width, segment_stroke_width};
pub use types::{LineId, LinePool, Node, NodeId, NodePool, VectorLine};
