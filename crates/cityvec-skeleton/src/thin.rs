//! Zhang-Suen skeletonisation.
//!
//! Thins a binary image to a connectivity-preserving, one-pixel-wide
//! skeleton.
//!
//! # Reference
//!
//! T. Y. Zhang and C. Y. Suen, "A fast parallel algorithm for thinning
//! digital patterns", Communications of the ACM, 27(3), 1984.
//!
//! Each pass runs two sub-iterations. In each sub-iteration every
//! foreground pixel is examined against its 8 neighbours (numbered P2..P9
//! clockwise starting north) and marked for deletion if it satisfies all
//! four conditions for that sub-iteration; marked pixels are only cleared
//! once the whole sub-iteration has finished examining the unmodified
//! image. Passes repeat until a full pass deletes nothing.

use cityvec_core::{Bitmap, BitmapMut, Channels, Pixel};

use crate::error::{SkeletonError, SkeletonResult};

/// Offsets of P2..P9, clockwise starting at north, matching the
/// published numbering.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),  // P2: north
    (-1, 1),  // P3: north-east
    (0, 1),   // P4: east
    (1, 1),   // P5: south-east
    (1, 0),   // P6: south
    (1, -1),  // P7: south-west
    (0, -1),  // P8: west
    (-1, -1), // P9: north-west
];

fn neighbor_values(bitmap: &BitmapMut, p: Pixel) -> [bool; 8] {
    let height = bitmap.height() as i32;
    let width = bitmap.width() as i32;
    let mut values = [false; 8];
    for (i, (dr, dc)) in NEIGHBOR_OFFSETS.iter().enumerate() {
        let nr = p.row as i32 + dr;
        let nc = p.col as i32 + dc;
        if nr >= 0 && nr < height && nc >= 0 && nc < width {
            values[i] = bitmap.is_foreground(Pixel::new(nr as u32, nc as u32));
        }
    }
    values
}

/// Number of nonzero neighbours, `B(P1)`.
fn black_neighbor_count(n: &[bool; 8]) -> u32 {
    n.iter().filter(|&&v| v).count() as u32
}

/// Number of 0-to-1 transitions walking P2..P9 then back to P2, `A(P1)`.
fn transition_count(n: &[bool; 8]) -> u32 {
    let mut count = 0;
    for i in 0..8 {
        let cur = n[i];
        let next = n[(i + 1) % 8];
        if !cur && next {
            count += 1;
        }
    }
    count
}

fn should_delete(n: &[bool; 8], first_subiteration: bool) -> bool {
    let b = black_neighbor_count(n);
    if !(2..=6).contains(&b) {
        return false;
    }
    if transition_count(n) != 1 {
        return false;
    }
    let (p2, p4, p6, p8) = (n[0], n[2], n[4], n[6]);
    if first_subiteration {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    } else {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    }
}

/// Thin a binary (`Channels::Gray`) bitmap to a one-pixel-wide skeleton.
///
/// Idempotent: thinning an already-thinned image is a no-op.
///
/// # Errors
///
/// Returns [`SkeletonError::WrongChannelCount`] if `bitmap` is not
/// single-channel.
pub fn thin(bitmap: &Bitmap) -> SkeletonResult<Bitmap> {
    if bitmap.channels() != Channels::Gray {
        return Err(SkeletonError::WrongChannelCount {
            expected: 1,
            actual: bitmap.channels().count(),
        });
    }

    let mut working = bitmap.clone().into_mut();

    loop {
        let mut changed = false;

        for first_subiteration in [true, false] {
            let mut to_delete = Vec::new();
            for row in 0..working.height() {
                for col in 0..working.width() {
                    let p = Pixel::new(row, col);
                    if !working.is_foreground(p) {
                        continue;
                    }
                    let n = neighbor_values(&working, p);
                    if should_delete(&n, first_subiteration) {
                        to_delete.push(p);
                    }
                }
            }
            if !to_delete.is_empty() {
                changed = true;
                for p in to_delete {
                    working.set_gray(p, false);
                }
            }
        }

        if !changed {
            break;
        }
    }

    Ok(working.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> Bitmap {
        let mut m = BitmapMut::blank(width, height, Channels::Gray).unwrap();
        for &(row, col) in points {
            m.set_gray(Pixel::new(row, col), true);
        }
        m.into()
    }

    fn foreground_points(bitmap: &Bitmap) -> Vec<(u32, u32)> {
        let mut points = Vec::new();
        for row in 0..bitmap.height() {
            for col in 0..bitmap.width() {
                if bitmap.is_foreground(Pixel::new(row, col)) {
                    points.push((row, col));
                }
            }
        }
        points
    }

    #[test]
    fn single_pixel_is_untouched() {
        let bmp = bitmap_from_points(5, 5, &[(2, 2)]);
        let thinned = thin(&bmp).unwrap();
        assert_eq!(foreground_points(&thinned), vec![(2, 2)]);
    }

    #[test]
    fn thick_rectangle_reduces_to_thin_line() {
        let mut points = Vec::new();
        for row in 2..6 {
            for col in 1..12 {
                points.push((row, col));
            }
        }
        let bmp = bitmap_from_points(14, 8, &points);
        let thinned = thin(&bmp).unwrap();
        let remaining = foreground_points(&thinned);
        assert!(!remaining.is_empty());
        assert!(remaining.len() < points.len());
        // A horizontal bar should thin to a single row thickness.
        let rows: std::collections::HashSet<u32> = remaining.iter().map(|&(r, _)| r).collect();
        assert!(rows.len() <= 2);
    }

    #[test]
    fn thinning_is_idempotent() {
        let mut points = Vec::new();
        for row in 3..9 {
            for col in 3..9 {
                points.push((row, col));
            }
        }
        let bmp = bitmap_from_points(12, 12, &points);
        let once = thin(&bmp).unwrap();
        let twice = thin(&once).unwrap();
        assert_eq!(foreground_points(&once), foreground_points(&twice));
    }

    #[test]
    fn empty_image_stays_empty() {
        let bmp = bitmap_from_points(5, 5, &[]);
        let thinned = thin(&bmp).unwrap();
        assert!(foreground_points(&thinned).is_empty());
    }

    #[test]
    fn rejects_non_gray_input() {
        let bgr = Bitmap::blank(4, 4, Channels::Bgr).unwrap();
        assert!(thin(&bgr).is_err());
    }
}
