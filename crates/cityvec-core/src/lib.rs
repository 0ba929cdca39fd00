//! cityvec-core - Core data structures for the city-map vectorization
//! pipeline.
//!
//! This crate provides the types every other crate in the workspace
//! builds on:
//!
//! - [`Bitmap`] / [`BitmapMut`] - row-major image containers
//! - [`Pixel`] - a row/column coordinate with row-major ordering
//! - [`Mbr`] - a minimum bounding rectangle over a set of pixels
//! - [`ConnectedComponent`] - a labelled connected component

mod bitmap;
mod colorpoly;
mod component;
pub mod error;
mod mbr;
mod pixel;

pub use bitmap::{Bitmap, BitmapMut, Channels};
pub use colorpoly::ColorPoly;
pub use component::ConnectedComponent;
pub use error::{Error, Result};
pub use mbr::Mbr;
pub use pixel::Pixel;
