//! cityvec-region - Connected-component labelling, area filtering, and
//! seed-based erasure for the cityvec vectorization pipeline.
//!
//! - **Black-layer extraction** - threshold a BGR raster into a binary bitmap
//! - **Connected component analysis** - two-pass union-find labelling
//! - **Area filtering** - drop components small relative to the largest
//! - **Erasure** - seed-based flood-fill clearing of a component

pub mod area_filter;
pub mod blacklayer;
pub mod conncomp;
pub mod erase;
pub mod error;

pub use area_filter::filter_by_area;
pub use blacklayer::{Threshold, extract_black_layer};
pub use conncomp::label_connected_components;
pub use erase::erase_component;
pub use error::{RegionError, RegionResult};
