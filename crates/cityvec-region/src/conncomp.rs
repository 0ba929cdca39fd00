//! Two-pass connected-component labelling over a binary [`Bitmap`].
//!
//! Pixels are 8-connected, but pass 1 only ever looks at neighbours that
//! have already been visited in row-major scan order: west, north-west,
//! north, and north-east. This mirrors the original union-find labelling
//! routine this module is descended from, which restricts neighbour
//! gathering the same way to avoid a second look-ahead pass.

use std::collections::HashMap;

use cityvec_core::{Bitmap, ConnectedComponent, Mbr, Pixel};

use crate::error::{RegionError, RegionResult};

/// Union-Find (disjoint set) over provisional labels.
struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: u32) -> u32 {
        if self.parent[x as usize] != x {
            self.parent[x as usize] = self.find(self.parent[x as usize]);
        }
        self.parent[x as usize]
    }

    fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];
        if rank_x < rank_y {
            self.parent[root_x as usize] = root_y;
        } else if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
        } else {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += 1;
        }
    }
}

fn provisional_label_at(labels: &[u32], width: u32, p: Pixel) -> u32 {
    labels[p.row as usize * width as usize + p.col as usize]
}

/// Label connected components in a binary (`Channels::Gray`) bitmap.
///
/// Returns every maximal 8-connected run of foreground pixels, each with
/// its seed pixel (the first pixel seen for it in row-major order), its
/// minimum bounding rectangle, and its pixel count.
///
/// # Errors
///
/// Returns [`RegionError::WrongChannelCount`] if `bitmap` is not
/// single-channel.
pub fn label_connected_components(bitmap: &Bitmap) -> RegionResult<Vec<ConnectedComponent>> {
    if bitmap.channels().count() != 1 {
        return Err(RegionError::WrongChannelCount {
            expected: 1,
            actual: bitmap.channels().count(),
        });
    }

    let width = bitmap.width();
    let height = bitmap.height();
    let mut labels = vec![0u32; width as usize * height as usize];

    // Worst case: every other pixel is its own component.
    let max_labels = (width as usize * height as usize) / 2 + 2;
    let mut uf = UnionFind::new(max_labels);
    let mut next_label: u32 = 1;

    // Pass 1: provisional labelling, restricted to already-visited neighbours.
    for row in 0..height {
        for col in 0..width {
            let p = Pixel::new(row, col);
            if !bitmap.is_foreground(p) {
                continue;
            }

            let mut neighbor_labels = Vec::with_capacity(4);
            if col > 0 {
                let west = provisional_label_at(&labels, width, Pixel::new(row, col - 1));
                if west > 0 {
                    neighbor_labels.push(west);
                }
            }
            if row > 0 {
                if col > 0 {
                    let nw = provisional_label_at(&labels, width, Pixel::new(row - 1, col - 1));
                    if nw > 0 {
                        neighbor_labels.push(nw);
                    }
                }
                let north = provisional_label_at(&labels, width, Pixel::new(row - 1, col));
                if north > 0 {
                    neighbor_labels.push(north);
                }
                if col + 1 < width {
                    let ne = provisional_label_at(&labels, width, Pixel::new(row - 1, col + 1));
                    if ne > 0 {
                        neighbor_labels.push(ne);
                    }
                }
            }

            let idx = row as usize * width as usize + col as usize;
            if neighbor_labels.is_empty() {
                labels[idx] = next_label;
                next_label += 1;
            } else {
                let min_label = *neighbor_labels.iter().min().unwrap();
                labels[idx] = min_label;
                for &other in &neighbor_labels {
                    uf.union(min_label, other);
                }
            }
        }
    }

    // Pass 2: canonicalize via union-find, merging MBR/count/seed per root.
    struct Accum {
        seed: Pixel,
        mbr: Mbr,
        area: u32,
    }
    let mut by_root: HashMap<u32, Accum> = HashMap::new();

    for row in 0..height {
        for col in 0..width {
            let idx = row as usize * width as usize + col as usize;
            let provisional = labels[idx];
            if provisional == 0 {
                continue;
            }
            let root = uf.find(provisional);
            let p = Pixel::new(row, col);
            by_root
                .entry(root)
                .and_modify(|acc| {
                    acc.mbr.absorb(p);
                    acc.area += 1;
                })
                .or_insert(Accum {
                    seed: p,
                    mbr: Mbr::from_point(p),
                    area: 1,
                });
        }
    }

    // Sequential, deterministic final labels ordered by seed (row-major).
    let mut roots: Vec<u32> = by_root.keys().copied().collect();
    roots.sort_by_key(|r| by_root[r].seed);

    let components = roots
        .into_iter()
        .enumerate()
        .map(|(i, root)| {
            let acc = by_root.remove(&root).unwrap();
            ConnectedComponent {
                label: i as u32 + 1,
                seed: acc.seed,
                mbr: acc.mbr,
                area: acc.area,
            }
        })
        .collect();

    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityvec_core::Channels;

    fn bitmap_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> Bitmap {
        let mut m = cityvec_core::BitmapMut::blank(width, height, Channels::Gray).unwrap();
        for &(row, col) in points {
            m.set_gray(Pixel::new(row, col), true);
        }
        m.into()
    }

    #[test]
    fn single_component_four_way_adjacent() {
        let bmp = bitmap_from_points(10, 10, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let comps = label_connected_components(&bmp).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 4);
        assert_eq!(comps[0].mbr.min, Pixel::new(1, 1));
        assert_eq!(comps[0].mbr.max, Pixel::new(2, 2));
    }

    #[test]
    fn two_separate_components() {
        let bmp = bitmap_from_points(10, 10, &[(0, 0), (0, 1), (5, 5), (5, 6)]);
        let comps = label_connected_components(&bmp).unwrap();
        assert_eq!(comps.len(), 2);
        assert!(comps.iter().all(|c| c.area == 2));
    }

    #[test]
    fn diagonal_pixels_are_eight_connected() {
        // NW-diagonal: (0,0) and (1,1) share a corner and must merge under
        // the fixed 8-connectivity this module implements.
        let bmp = bitmap_from_points(10, 10, &[(0, 0), (1, 1)]);
        let comps = label_connected_components(&bmp).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 2);
    }

    #[test]
    fn l_shaped_component() {
        let bmp = bitmap_from_points(10, 10, &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
        let comps = label_connected_components(&bmp).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 5);
        assert_eq!(comps[0].mbr.min, Pixel::new(0, 0));
        assert_eq!(comps[0].mbr.max, Pixel::new(2, 2));
    }

    #[test]
    fn empty_image_has_no_components() {
        let bmp = bitmap_from_points(10, 10, &[]);
        let comps = label_connected_components(&bmp).unwrap();
        assert!(comps.is_empty());
    }

    #[test]
    fn single_pixel_component_has_degenerate_mbr() {
        let bmp = bitmap_from_points(5, 5, &[(2, 2)]);
        let comps = label_connected_components(&bmp).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].mbr.min, comps[0].mbr.max);
        assert_eq!(comps[0].area, 1);
    }

    #[test]
    fn rejects_non_single_channel() {
        let bmp = Bitmap::blank(4, 4, Channels::Bgr).unwrap();
        assert!(label_connected_components(&bmp).is_err());
    }

    #[test]
    fn labels_are_seed_ordered() {
        let bmp = bitmap_from_points(10, 10, &[(5, 5), (0, 0)]);
        let comps = label_connected_components(&bmp).unwrap();
        assert_eq!(comps[0].seed, Pixel::new(0, 0));
        assert_eq!(comps[1].seed, Pixel::new(5, 5));
        assert_eq!(comps[0].label, 1);
        assert_eq!(comps[1].label, 2);
    }
}
