//! cityvec - raster-to-SVG city map vectorization pipeline.
//!
//! The binary (`src/main.rs`) is a thin CLI wrapper around [`pipeline`];
//! exposing it as a library lets integration tests drive the pipeline
//! directly on in-memory bitmaps.

pub mod error;
pub mod pipeline;
