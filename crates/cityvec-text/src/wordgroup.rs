//! Word-boundary detection via local area discontinuities.
//!
//! Text components sitting in the same word tend to have similar areas;
//! a sharp jump in area between neighbours in a rho-sorted cluster is
//! taken as a sign that one side is graphics, not text.

use cityvec_core::ConnectedComponent;

/// Default fraction of the window median area a jump must exceed to be
/// treated as a word boundary.
pub const DEFAULT_WORD_BOUNDARY_FRACTION: f64 = 0.5;

/// Largest area increase between successive entries in a sliding window
/// of up to 5 neighbours (2 on the inspected side if the cluster has at
/// least 5 members, else 1), looking forward from `pos` when `rev` is
/// `false` or backward when `true`.
///
/// Returns `-1` if the window contains no adjacent pair to compare.
pub fn local_area_diff(cluster: &[ConnectedComponent], pos: usize, rev: bool) -> i64 {
    if cluster.is_empty() {
        return -1;
    }
    let n = if cluster.len() >= 5 { 2 } else { 1 };

    let (start, end) = if !rev {
        let end = if pos + n >= cluster.len() { cluster.len() - 1 } else { pos + n };
        (pos, end)
    } else {
        let start = pos.saturating_sub(n);
        (start, pos)
    };

    let mut max_diff: i64 = -1;
    for i in start..end {
        let diff = cluster[i + 1].area as i64 - cluster[i].area as i64;
        max_diff = max_diff.max(diff);
    }
    max_diff
}

fn window_median_area(cluster: &[ConnectedComponent], pos: usize) -> f64 {
    let n = if cluster.len() >= 5 { 2 } else { 1 };
    let start = pos.saturating_sub(n);
    let end = (pos + n).min(cluster.len().saturating_sub(1));
    let mut areas: Vec<u32> = cluster[start..=end].iter().map(|c| c.area).collect();
    areas.sort_unstable();
    let mid = areas.len() / 2;
    if areas.len() % 2 == 0 {
        (areas[mid - 1] as f64 + areas[mid] as f64) / 2.0
    } else {
        areas[mid] as f64
    }
}

/// True if the area jump at `pos` (looking both forward and backward)
/// exceeds `fraction` of its local window's median area.
pub fn is_word_boundary(cluster: &[ConnectedComponent], pos: usize, fraction: f64) -> bool {
    if cluster.len() < 2 {
        return false;
    }
    let forward = local_area_diff(cluster, pos, false);
    let backward = local_area_diff(cluster, pos, true);
    let diff = forward.max(backward);
    if diff <= 0 {
        return false;
    }
    let median = window_median_area(cluster, pos);
    median > 0.0 && diff as f64 > fraction * median
}

/// Classify every component in a rho-sorted cluster as text (`true`) or
/// not (`false`): a component adjacent to a word-boundary-sized area
/// jump is excluded as a likely graphics outlier.
pub fn classify_text(cluster: &[ConnectedComponent], fraction: f64) -> Vec<bool> {
    (0..cluster.len()).map(|i| !is_word_boundary(cluster, i, fraction)).collect()
}
