//! cityvec-svg - Minimal SVG 1.1 emission for the cityvec vectorization
//! pipeline.

mod error;
mod writer;

pub use error::{SvgError, SvgResult};
pub use writer::SvgWriter;
