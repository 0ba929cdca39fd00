//! cityvec-skeleton - Zhang-Suen skeletonisation for the cityvec
//! vectorization pipeline.
//!
//! Reduces the filtered black layer to a one-pixel-wide skeleton ready for
//! graph extraction.

mod error;
pub mod thin;

pub use error::{SkeletonError, SkeletonResult};
pub use thin::thin;
