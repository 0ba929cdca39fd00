//! Seed-based erasure of foreground regions.
//!
//! Used to remove text from the black layer once its connected components
//! have been classified as text: every pixel reachable from a component's
//! seed pixel by an 8-connected flood fill is cleared.

use std::collections::VecDeque;

use cityvec_core::{BitmapMut, Pixel};

/// Flood-fill clear all foreground pixels reachable from `seed`,
/// 8-connected, in-place. Returns the number of pixels cleared.
///
/// No-op (returns 0) if `seed` is already background -- callers may pass
/// a component seed that was already erased by an earlier overlapping
/// call.
pub fn erase_component(bitmap: &mut BitmapMut, seed: Pixel) -> u32 {
    if !bitmap.in_bounds(seed) || !bitmap.is_foreground(seed) {
        return 0;
    }

    let width = bitmap.width();
    let height = bitmap.height();
    let mut queue = VecDeque::new();
    queue.push_back(seed);
    bitmap.set_gray(seed, false);
    let mut cleared = 0u32;

    while let Some(p) = queue.pop_front() {
        cleared += 1;

        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = p.row as i32 + dr;
                let nc = p.col as i32 + dc;
                if nr < 0 || nc < 0 || nr as u32 >= height || nc as u32 >= width {
                    continue;
                }
                let n = Pixel::new(nr as u32, nc as u32);
                if bitmap.is_foreground(n) {
                    bitmap.set_gray(n, false);
                    queue.push_back(n);
                }
            }
        }
    }

    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityvec_core::Channels;

    fn bitmap_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> BitmapMut {
        let mut m = BitmapMut::blank(width, height, Channels::Gray).unwrap();
        for &(row, col) in points {
            m.set_gray(Pixel::new(row, col), true);
        }
        m
    }

    #[test]
    fn erases_whole_component() {
        let mut bmp = bitmap_from_points(5, 5, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let cleared = erase_component(&mut bmp, Pixel::new(1, 1));
        assert_eq!(cleared, 4);
        for r in 0..5 {
            for c in 0..5 {
                assert!(!bmp.is_foreground(Pixel::new(r, c)));
            }
        }
    }

    #[test]
    fn leaves_other_components_untouched() {
        let mut bmp = bitmap_from_points(10, 10, &[(1, 1), (8, 8)]);
        erase_component(&mut bmp, Pixel::new(1, 1));
        assert!(!bmp.is_foreground(Pixel::new(1, 1)));
        assert!(bmp.is_foreground(Pixel::new(8, 8)));
    }

    #[test]
    fn seed_already_background_is_noop() {
        let mut bmp = bitmap_from_points(5, 5, &[]);
        assert_eq!(erase_component(&mut bmp, Pixel::new(2, 2)), 0);
    }
}
