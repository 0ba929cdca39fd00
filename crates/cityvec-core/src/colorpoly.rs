//! Closed, filled colour regions recovered by the optional colour
//! polygon recovery stage.

use crate::pixel::Pixel;

/// A closed contour with a single fill colour, produced by colour
/// polygon recovery and consumed only by SVG emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPoly {
    pub points: Vec<Pixel>,
    /// RGB, not BGR, matching the SVG colour convention.
    pub color: [u8; 3],
}

impl ColorPoly {
    pub fn new(points: Vec<Pixel>, color: [u8; 3]) -> Self {
        Self { points, color }
    }
}
