//! cityvec - raster-to-SVG city map vectorization pipeline
//!
//! Re-exports the pipeline's stage crates as one library for embedders
//! who want the full pipeline without driving each crate separately; the
//! `cityvec-cli` binary is a thin wrapper around the same stages.
//!
//! # Overview
//!
//! - Black-layer extraction, component labelling, and area filtering
//!   ([`region`])
//! - Zhang-Suen skeletonisation ([`skeleton`])
//! - Raster-to-polyline graph extraction, fusion, and refinement
//!   ([`graph`])
//! - Collinear-grouping text detection and optional colour polygon
//!   recovery ([`text`])
//! - SVG emission ([`svg`])
//!
//! # Example
//!
//! ```
//! use cityvec::{Bitmap, Channels};
//!
//! let bitmap = Bitmap::blank(640, 480, Channels::Bgr).unwrap();
//! assert_eq!(bitmap.width(), 640);
//! assert_eq!(bitmap.height(), 480);
//! ```

// Re-export the core data model directly; it's the type every stage
// crate below shares.
pub use cityvec_core::*;

pub mod region {
    pub use cityvec_region::*;
}

pub mod skeleton {
    pub use cityvec_skeleton::*;
}

pub mod graph {
    pub use cityvec_graph::*;
}

pub mod svg {
    pub use cityvec_svg::*;
}

pub mod text {
    pub use cityvec_text::*;
}
