//! Parallel-line clustering around a detected Hough line.

use crate::hough::HoughLine;

/// Default number of parallel lines stepped in each direction.
pub const DEFAULT_CLUSTER_K: usize = 5;

/// Generate a cluster of `2*k + 1` parallel lines around `line`, stepped
/// by `rho_step` in each direction. Captures centroids of
/// ascenders/descenders/capitals whose MBR midpoints sit slightly off
/// the baseline.
pub fn cluster_lines(line: HoughLine, k: usize, rho_step: f64) -> Vec<HoughLine> {
    let mut lines = Vec::with_capacity(2 * k + 1);
    for step in -(k as i64)..=(k as i64) {
        lines.push(HoughLine {
            rho: line.rho + step as f64 * rho_step,
            theta: line.theta,
        });
    }
    lines
}
