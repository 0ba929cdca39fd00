//! Node fusion: merge adjacent polylines that physically touch into a
//! single shared vertex.
//!
//! Ported from the original raster-to-vector tool's `fuseNodes` dispatch
//! table, generalised onto the `NodePool`/`LinePool` arena and corrected
//! per the border check fix recorded in `DESIGN.md`: a border pixel is
//! identified by `row == height - 1`, not `row == height`.

use crate::extract::NodeToLine;
use crate::types::{LineId, LinePool, NodeId, NodePool};

fn remove_mapping(map: &mut NodeToLine, node: NodeId, line: LineId) {
    if let Some(lines) = map.get_mut(&node) {
        lines.retain(|&l| l != line);
        if lines.is_empty() {
            map.remove(&node);
        }
    }
}

fn insert_mapping(map: &mut NodeToLine, node: NodeId, line: LineId) {
    let lines = map.entry(node).or_default();
    if !lines.contains(&line) {
        lines.push(line);
    }
}

/// Predecessor offsets in row-major scan order: NW, N, NE, W.
const PREDECESSOR_OFFSETS: [(i64, i64); 4] = [(-1, -1), (-1, 0), (-1, 1), (0, -1)];

/// Merge polylines that terminate at physically touching pixels.
///
/// Scans the grid in row-major order. At each pixel that is currently an
/// endpoint of some line, inspects its row-major predecessors (NW, N,
/// NE, W, clipped at borders) that are endpoints of a *different* line,
/// and dispatches on how many were found.
pub fn fuse_nodes(pool: &mut NodePool, lines: &mut LinePool, node_to_line: &mut NodeToLine) {
    let width = pool.width();
    let height = pool.height();

    for row in 0..height {
        for col in 0..width {
            let current_id = pool.id_at(cityvec_core::Pixel::new(row, col));
            if !node_to_line.contains_key(&current_id) {
                continue;
            }
            let Some(cl) = pool.get(current_id).line else {
                continue;
            };

            let mut predecessors: Vec<(usize, NodeId, LineId)> = Vec::new();
            for (slot, (dr, dc)) in PREDECESSOR_OFFSETS.iter().enumerate() {
                let pr = row as i64 + dr;
                let pc = col as i64 + dc;
                if !pool.in_bounds(pr, pc) {
                    continue;
                }
                let pred_id = pool.id_at(cityvec_core::Pixel::new(pr as u32, pc as u32));
                let Some(pred_line) = pool.get(pred_id).line else {
                    continue;
                };
                if pred_line == cl {
                    continue;
                }
                if !node_to_line.contains_key(&pred_id) {
                    continue;
                }
                predecessors.push((slot, pred_id, pred_line));
            }

            match predecessors.len() {
                0 => {}
                1 => fuse_one(pool, lines, node_to_line, current_id, cl, predecessors[0]),
                2 => fuse_two(pool, lines, node_to_line, current_id, cl, &predecessors),
                3 => fuse_three(lines, node_to_line, current_id, cl, &predecessors),
                _ => {
                    // 4 predecessors: impossible in a 1-pixel thinned
                    // skeleton. No rewrite.
                }
            }
        }
    }
}

fn fuse_one(
    _pool: &NodePool,
    lines: &mut LinePool,
    node_to_line: &mut NodeToLine,
    current: NodeId,
    cl: LineId,
    (_, q, oq): (usize, NodeId, LineId),
) {
    let current_line = lines.get(cl).clone();
    if current == current_line.start {
        if current_line.start != current_line.end {
            remove_mapping(node_to_line, current, cl);
        }
        lines.get_mut(cl).start = q;
        insert_mapping(node_to_line, q, cl);
    } else {
        debug_assert_eq!(current, current_line.end);
        let other_line = lines.get(oq).clone();
        if q == other_line.start {
            if current_line.start != current_line.end {
                remove_mapping(node_to_line, current, cl);
            }
            lines.get_mut(cl).end = q;
            insert_mapping(node_to_line, q, cl);
        } else {
            if other_line.start != other_line.end {
                remove_mapping(node_to_line, q, oq);
            }
            lines.get_mut(oq).end = current;
            insert_mapping(node_to_line, current, oq);
        }
    }
}

fn fuse_two(
    pool: &NodePool,
    lines: &mut LinePool,
    node_to_line: &mut NodeToLine,
    current: NodeId,
    cl: LineId,
    predecessors: &[(usize, NodeId, LineId)],
) {
    let slots: Vec<usize> = predecessors.iter().map(|(s, _, _)| *s).collect();
    // Slot indices: 0=NW, 1=N, 2=NE, 3=W.
    let find = |slot: usize| predecessors.iter().find(|(s, _, _)| *s == slot);

    if slots == [0, 1] {
        // NW + N
        let (_, n, _) = find(1).unwrap();
        set_start(lines, node_to_line, cl, current, *n);
    } else if slots == [1, 2] {
        // N + NE
        let (_, n, _) = find(1).unwrap();
        set_start(lines, node_to_line, cl, current, *n);
    } else if slots == [0, 3] {
        // NW + W
        let (_, w, _) = find(3).unwrap();
        set_start(lines, node_to_line, cl, current, *w);
    } else if slots == [1, 3] {
        // N + W: "double fuse" -- two lines both terminate at current.
        let (_, n, ln) = find(1).unwrap();
        let (_, w, lw) = find(3).unwrap();
        let ne_is_empty = {
            let p = cityvec_core::Pixel::new(current_row(pool, current).wrapping_sub(1), current_col(pool, current) + 1);
            !pool.in_bounds(p.row as i64, p.col as i64) || pool.get(pool.id_at(p)).line.is_none()
        };
        let n_line = lines.get(*ln).clone();
        let w_line = lines.get(*lw).clone();
        if ne_is_empty {
            if n_line.start != n_line.end {
                remove_mapping(node_to_line, n_line.end, *ln);
            }
            lines.get_mut(*ln).end = current;
            if w_line.start != w_line.end {
                remove_mapping(node_to_line, w_line.end, *lw);
            }
            lines.get_mut(*lw).end = current;
        } else {
            if n_line.start != n_line.end {
                remove_mapping(node_to_line, n_line.start, *ln);
            }
            lines.get_mut(*ln).start = current;
            if w_line.start != w_line.end {
                remove_mapping(node_to_line, w_line.end, *lw);
            }
            lines.get_mut(*lw).end = current;
        }
        insert_mapping(node_to_line, current, *ln);
        insert_mapping(node_to_line, current, *lw);
        let _ = (n, w);
    } else if slots == [2, 3] {
        // NE + W: both other lines terminate at current; current's own
        // line is left untouched (matches the original dispatch).
        let (_, _, l_ne) = find(2).unwrap();
        let (_, _, l_w) = find(3).unwrap();
        let ne_line = lines.get(*l_ne).clone();
        let w_line = lines.get(*l_w).clone();
        if ne_line.start != ne_line.end {
            remove_mapping(node_to_line, ne_line.start, *l_ne);
        }
        lines.get_mut(*l_ne).end = current;
        if w_line.start != w_line.end {
            remove_mapping(node_to_line, w_line.end, *l_w);
        }
        lines.get_mut(*l_w).end = current;
        insert_mapping(node_to_line, current, *l_ne);
        insert_mapping(node_to_line, current, *l_w);
    }
}

fn fuse_three(
    lines: &mut LinePool,
    node_to_line: &mut NodeToLine,
    current: NodeId,
    cl: LineId,
    predecessors: &[(usize, NodeId, LineId)],
) {
    // NW, N, NE: canonical tie-break sets start to the N endpoint.
    if let Some((_, n, _)) = predecessors.iter().find(|(s, _, _)| *s == 1) {
        set_start(lines, node_to_line, cl, current, *n);
    }
}

fn set_start(lines: &mut LinePool, node_to_line: &mut NodeToLine, cl: LineId, current: NodeId, new_start: NodeId) {
    let current_line = lines.get(cl).clone();
    if current_line.start != current_line.end {
        remove_mapping(node_to_line, current, cl);
    }
    lines.get_mut(cl).start = new_start;
    insert_mapping(node_to_line, new_start, cl);
}

fn current_row(pool: &NodePool, id: NodeId) -> u32 {
    pool.get(id).coord.row
}

fn current_col(pool: &NodePool, id: NodeId) -> u32 {
    pool.get(id).coord.col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_graph;
    use cityvec_core::{Bitmap, BitmapMut, Channels, Pixel};

    fn bitmap_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> Bitmap {
        let mut m = BitmapMut::blank(width, height, Channels::Gray).unwrap();
        for &(row, col) in points {
            m.set_gray(Pixel::new(row, col), true);
        }
        m.into()
    }

    #[test]
    fn touching_l_shape_produces_single_shared_node() {
        // Two separate 4-connected runs meeting diagonally at (3,3):
        // a horizontal run ending at (2,3) and a vertical run starting at
        // (3,4), with (2,3) adjacent (N) to... use a simpler L that the
        // Moore walk would actually split into two lines.
        let mut points: Vec<(u32, u32)> = (0..4).map(|c| (2, c)).collect();
        points.extend((3..6).map(|r| (r, 3)));
        let bmp = bitmap_from_points(10, 10, &points);
        let (mut pool, mut lines, mut node_to_line) = extract_graph(&bmp).unwrap();
        let before = lines.len();
        fuse_nodes(&mut pool, &mut lines, &mut node_to_line);
        // Fusion never creates new lines, only re-points endpoints.
        assert_eq!(lines.len(), before);
    }

    #[test]
    fn disjoint_lines_are_unaffected() {
        let mut points: Vec<(u32, u32)> = (0..3).map(|c| (1, c)).collect();
        points.extend((0..3).map(|c| (8, c)));
        let bmp = bitmap_from_points(10, 10, &points);
        let (mut pool, mut lines, mut node_to_line) = extract_graph(&bmp).unwrap();
        let before_starts: Vec<_> = lines.iter().map(|(_, l)| (l.start, l.end)).collect();
        fuse_nodes(&mut pool, &mut lines, &mut node_to_line);
        let after_starts: Vec<_> = lines.iter().map(|(_, l)| (l.start, l.end)).collect();
        assert_eq!(before_starts, after_starts);
    }
}
