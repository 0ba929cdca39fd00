//! Minimum bounding rectangle over a set of pixels.

use crate::pixel::Pixel;

/// Minimum bounding rectangle, inclusive on both corners.
///
/// Stores inclusive min/max corners directly rather than a
/// width/height box, so the single-pixel case is exact (`min == max`)
/// rather than a width/height of 1 that callers have to remember is
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mbr {
    pub min: Pixel,
    pub max: Pixel,
}

impl Mbr {
    /// An MBR containing exactly one pixel.
    pub fn from_point(p: Pixel) -> Self {
        Self { min: p, max: p }
    }

    pub fn width(&self) -> u32 {
        self.max.col - self.min.col + 1
    }

    pub fn height(&self) -> u32 {
        self.max.row - self.min.row + 1
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Approximate centroid: the MBR's geometric center. Used wherever a
    /// component's true pixel centroid is unavailable or unnecessary
    /// (e.g. seeding the Hough centroid canvas).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min.row as f64 + self.max.row as f64) / 2.0,
            (self.min.col as f64 + self.max.col as f64) / 2.0,
        )
    }

    pub fn contains(&self, p: Pixel) -> bool {
        p.row >= self.min.row && p.row <= self.max.row && p.col >= self.min.col && p.col <= self.max.col
    }

    /// Expand this MBR, if necessary, to also contain `p`.
    pub fn absorb(&mut self, p: Pixel) {
        self.min.row = self.min.row.min(p.row);
        self.min.col = self.min.col.min(p.col);
        self.max.row = self.max.row.max(p.row);
        self.max.col = self.max.col.max(p.col);
    }

    /// The smallest MBR containing both `self` and `other`.
    pub fn union(&self, other: &Mbr) -> Mbr {
        Mbr {
            min: Pixel::new(self.min.row.min(other.min.row), self.min.col.min(other.min.col)),
            max: Pixel::new(self.max.row.max(other.max.row), self.max.col.max(other.max.col)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel_mbr() {
        let m = Mbr::from_point(Pixel::new(3, 4));
        assert_eq!(m.width(), 1);
        assert_eq!(m.height(), 1);
        assert_eq!(m.area(), 1);
    }

    #[test]
    fn absorb_expands() {
        let mut m = Mbr::from_point(Pixel::new(5, 5));
        m.absorb(Pixel::new(2, 8));
        assert_eq!(m.min, Pixel::new(2, 5));
        assert_eq!(m.max, Pixel::new(5, 8));
    }
}
