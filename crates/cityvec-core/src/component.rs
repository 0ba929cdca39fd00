//! Connected component records produced by the labelling pass.

use crate::mbr::Mbr;
use crate::pixel::Pixel;

/// A connected component: one maximal run of 8-connected foreground
/// pixels, as found by [`crate::Mbr`]-tracking union-find labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Canonical label assigned during the labelling pass. Not
    /// meaningful across separate labelling runs.
    pub label: u32,
    /// First pixel seen for this component in row-major scan order.
    /// Used as the flood-fill seed when erasing the component.
    pub seed: Pixel,
    pub mbr: Mbr,
    pub area: u32,
}

impl ConnectedComponent {
    /// Approximate centroid, taken as the MBR's geometric center per the
    /// data model (a full area-weighted centroid is unnecessary for
    /// collinear grouping's precision requirements).
    pub fn centroid(&self) -> (f64, f64) {
        self.mbr.center()
    }
}
