//! Moore-neighbourhood raster-to-polyline extraction.

use std::collections::HashMap;

use cityvec_core::{Bitmap, Channels, Pixel};

use crate::error::{GraphError, GraphResult};
use crate::types::{LineId, LinePool, NodeId, NodePool, VectorLine};

/// Multimap from a node to every line that terminates there.
pub type NodeToLine = HashMap<NodeId, Vec<LineId>>;

/// Moore-neighbourhood offsets in a fixed clockwise order starting from
/// the west neighbour: W, NW, N, NE, E, SE, S, SW.
const WALK_ORDER: [(i64, i64); 8] = [
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
];

fn insert_node_to_line(map: &mut NodeToLine, node: NodeId, line: LineId) {
    let lines = map.entry(node).or_default();
    if !lines.contains(&line) {
        lines.push(line);
    }
}

/// Extract the polyline graph of a thinned binary bitmap.
///
/// Scans in row-major order; each unassigned black pixel seeds a new
/// polyline, walked via the Moore neighbourhood in a fixed clockwise
/// order starting west until no unvisited black neighbour remains or the
/// next step would land on a pixel already claimed by another line.
///
/// # Errors
///
/// Returns [`GraphError::WrongChannelCount`] if `thinned` is not
/// single-channel.
pub fn extract_graph(thinned: &Bitmap) -> GraphResult<(NodePool, LinePool, NodeToLine)> {
    if thinned.channels() != Channels::Gray {
        return Err(GraphError::WrongChannelCount {
            expected: 1,
            actual: thinned.channels().count(),
        });
    }

    let width = thinned.width();
    let height = thinned.height();
    let mut pool = NodePool::new(width, height);
    let mut lines = LinePool::new();
    let mut node_to_line: NodeToLine = HashMap::new();

    for row in 0..height {
        for col in 0..width {
            let seed = Pixel::new(row, col);
            if !thinned.is_foreground(seed) {
                continue;
            }
            let seed_id = pool.id_at(seed);
            if pool.get(seed_id).visited {
                continue;
            }

            let mut points = vec![seed_id];
            pool.get_mut(seed_id).visited = true;
            let mut current = seed;

            loop {
                let mut stepped = false;
                for (dr, dc) in WALK_ORDER {
                    let nr = current.row as i64 + dr;
                    let nc = current.col as i64 + dc;
                    if !pool.in_bounds(nr, nc) {
                        continue;
                    }
                    let candidate = Pixel::new(nr as u32, nc as u32);
                    if !thinned.is_foreground(candidate) {
                        continue;
                    }
                    let candidate_id = pool.id_at(candidate);
                    let node = pool.get(candidate_id);
                    if node.visited {
                        // Either our own tail (would revisit) or claimed
                        // by another line already: stop either way.
                        continue;
                    }
                    points.push(candidate_id);
                    pool.get_mut(candidate_id).visited = true;
                    current = candidate;
                    stepped = true;
                    break;
                }
                if !stepped {
                    break;
                }
            }

            let start = *points.first().unwrap();
            let end = *points.last().unwrap();
            let line_id = lines.push(VectorLine {
                start,
                end,
                points: points.clone(),
            });

            for &id in &points {
                pool.get_mut(id).line = Some(line_id);
            }

            insert_node_to_line(&mut node_to_line, start, line_id);
            insert_node_to_line(&mut node_to_line, end, line_id);
        }
    }

    Ok((pool, lines, node_to_line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityvec_core::BitmapMut;

    fn bitmap_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> Bitmap {
        let mut m = BitmapMut::blank(width, height, Channels::Gray).unwrap();
        for &(row, col) in points {
            m.set_gray(Pixel::new(row, col), true);
        }
        m.into()
    }

    #[test]
    fn single_pixel_is_its_own_degenerate_line() {
        let bmp = bitmap_from_points(5, 5, &[(2, 2)]);
        let (pool, lines, node_to_line) = extract_graph(&bmp).unwrap();
        assert_eq!(lines.len(), 1);
        let (id, line) = lines.iter().next().unwrap();
        assert_eq!(line.start, line.end);
        assert_eq!(pool.get(line.start).coord, Pixel::new(2, 2));
        assert_eq!(node_to_line[&line.start], vec![id]);
    }

    #[test]
    fn straight_horizontal_segment_is_one_line() {
        let points: Vec<(u32, u32)> = (0..5).map(|c| (2, c)).collect();
        let bmp = bitmap_from_points(10, 5, &points);
        let (pool, lines, _) = extract_graph(&bmp).unwrap();
        assert_eq!(lines.len(), 1);
        let (_, line) = lines.iter().next().unwrap();
        assert_eq!(line.points.len(), 5);
        assert_eq!(pool.get(line.start).coord, Pixel::new(2, 0));
        assert_eq!(pool.get(line.end).coord, Pixel::new(2, 4));
    }

    #[test]
    fn diagonal_segment_is_one_line_with_no_intermediate_nodes() {
        let points: Vec<(u32, u32)> = (0..5).map(|i| (i, i)).collect();
        let bmp = bitmap_from_points(5, 5, &points);
        let (pool, lines, _) = extract_graph(&bmp).unwrap();
        assert_eq!(lines.len(), 1);
        let (_, line) = lines.iter().next().unwrap();
        assert_eq!(line.points.len(), 5);
        assert_eq!(pool.get(line.start).coord, Pixel::new(0, 0));
        assert_eq!(pool.get(line.end).coord, Pixel::new(4, 4));
    }

    #[test]
    fn two_disjoint_segments_are_two_lines() {
        let mut points: Vec<(u32, u32)> = (0..3).map(|c| (1, c)).collect();
        points.extend((0..3).map(|c| (8, c)));
        let bmp = bitmap_from_points(10, 10, &points);
        let (_, lines, _) = extract_graph(&bmp).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_image_has_no_lines() {
        let bmp = bitmap_from_points(5, 5, &[]);
        let (_, lines, _) = extract_graph(&bmp).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn rejects_non_gray_input() {
        let bgr = Bitmap::blank(4, 4, Channels::Bgr).unwrap();
        assert!(extract_graph(&bgr).is_err());
    }
}
