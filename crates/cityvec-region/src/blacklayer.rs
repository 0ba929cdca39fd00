//! Black-layer extraction: threshold a BGR raster into a binary bitmap.
//!
//! A pixel is foreground (black/line) when all three of its channels fall
//! at or below the corresponding threshold; this mirrors a simple
//! per-channel darkness test rather than a luminance formula, so that
//! strongly-colored-but-bright pixels (which are not part of the line
//! work) are not mistaken for ink.

use cityvec_core::{Bitmap, BitmapMut, Channels, Pixel};

use crate::error::{RegionError, RegionResult};

/// BGR threshold, one value per channel, in B, G, R order to match the
/// bitmap's channel layout.
pub type Threshold = [u8; 3];

/// Extract the black layer from a BGR bitmap: a `Channels::Gray` bitmap
/// where a pixel is foreground if each of its channels is `<= threshold`.
///
/// # Errors
///
/// Returns [`RegionError::WrongChannelCount`] if `bgr` is not 3-channel.
pub fn extract_black_layer(bgr: &Bitmap, threshold: Threshold) -> RegionResult<Bitmap> {
    if bgr.channels() != Channels::Bgr {
        return Err(RegionError::WrongChannelCount {
            expected: 3,
            actual: bgr.channels().count(),
        });
    }

    let mut out = BitmapMut::blank(bgr.width(), bgr.height(), Channels::Gray)
        .map_err(RegionError::Core)?;

    for row in 0..bgr.height() {
        for col in 0..bgr.width() {
            let p = Pixel::new(row, col);
            let px = bgr.pixel(p);
            let is_black = px[0] <= threshold[0] && px[1] <= threshold[1] && px[2] <= threshold[2];
            if is_black {
                out.set_gray(p, true);
            }
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bgr_pixel(width: u32, height: u32, fill: [u8; 3], dark_at: &[(u32, u32)], dark: [u8; 3]) -> Bitmap {
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        for chunk in pixels.chunks_exact_mut(3) {
            chunk.copy_from_slice(&fill);
        }
        for &(row, col) in dark_at {
            let idx = (row as usize * width as usize + col as usize) * 3;
            pixels[idx..idx + 3].copy_from_slice(&dark);
        }
        Bitmap::from_pixels(width, height, Channels::Bgr, pixels).unwrap()
    }

    #[test]
    fn dark_pixels_become_foreground() {
        let bgr = bgr_pixel(4, 4, [255, 255, 255], &[(1, 1)], [10, 10, 10]);
        let black = extract_black_layer(&bgr, [180, 180, 180]).unwrap();
        assert!(black.is_foreground(Pixel::new(1, 1)));
        assert!(!black.is_foreground(Pixel::new(0, 0)));
    }

    #[test]
    fn exact_threshold_is_foreground() {
        let bgr = bgr_pixel(2, 2, [255, 255, 255], &[(0, 0)], [180, 180, 180]);
        let black = extract_black_layer(&bgr, [180, 180, 180]).unwrap();
        assert!(black.is_foreground(Pixel::new(0, 0)));
    }

    #[test]
    fn rejects_non_bgr_input() {
        let gray = Bitmap::blank(2, 2, Channels::Gray).unwrap();
        assert!(extract_black_layer(&gray, [180, 180, 180]).is_err());
    }
}
