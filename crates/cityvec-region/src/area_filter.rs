//! Area-based component filtering.
//!
//! Drops components whose pixel count is small relative to the largest
//! component found, on the theory that in a line drawing the dominant
//! connected regions are drafting lines and the small ones are noise or
//! isolated marks -- not, at this stage, a text/graphics classifier.

use cityvec_core::ConnectedComponent;

/// Keep only components with `area >= max_area / ratio`.
///
/// `ratio` of `0` or `1` keeps everything (division would either panic or
/// be a no-op; both are treated as "no filtering").
pub fn filter_by_area(components: &[ConnectedComponent], ratio: u32) -> Vec<ConnectedComponent> {
    if ratio <= 1 {
        return components.to_vec();
    }

    let max_area = components.iter().map(|c| c.area).max().unwrap_or(0);
    let threshold = max_area / ratio;

    components
        .iter()
        .filter(|c| c.area >= threshold)
        .copied()
        .collect()
}
