//! Stroke-width estimation from the pre-thinned and thinned black
//! layers.

use cityvec_core::{Bitmap, Pixel};

use crate::error::{GraphError, GraphResult};

/// Estimate the local stroke width at `coord` by comparing black pixel
/// counts in a `(2*window+1)^2` window of the pre-thinned and thinned
/// layers.
///
/// Each endpoint is sampled independently by the caller so a line's
/// width reflects both ends, not just one sampled twice.
pub fn local_line_width(coord: Pixel, window: u32, pre_thinned: &Bitmap, thinned: &Bitmap) -> GraphResult<f64> {
    if pre_thinned.width() != thinned.width() || pre_thinned.height() != thinned.height() {
        return Err(GraphError::DimensionMismatch {
            pre_width: pre_thinned.width(),
            pre_height: pre_thinned.height(),
            thin_width: thinned.width(),
            thin_height: thinned.height(),
        });
    }

    let width = pre_thinned.width();
    let height = pre_thinned.height();
    let row_from = coord.row.saturating_sub(window);
    let col_from = coord.col.saturating_sub(window);
    let row_to = (coord.row + window).min(height - 1);
    let col_to = (coord.col + window).min(width - 1);

    let mut pre_count: u32 = 0;
    let mut thin_count: u32 = 0;
    for row in row_from..=row_to {
        for col in col_from..=col_to {
            let p = Pixel::new(row, col);
            if pre_thinned.is_foreground(p) {
                pre_count += 1;
            }
            if thinned.is_foreground(p) {
                thin_count += 1;
            }
        }
    }

    Ok(f64::from(pre_count) / f64::from(thin_count.max(1)))
}

/// Stroke width for a segment: the mean of the local width at its two
/// endpoints.
pub fn segment_stroke_width(
    start: Pixel,
    end: Pixel,
    window: u32,
    pre_thinned: &Bitmap,
    thinned: &Bitmap,
) -> GraphResult<f64> {
    let a = local_line_width(start, window, pre_thinned, thinned)?;
    let b = local_line_width(end, window, pre_thinned, thinned)?;
    Ok((a + b) / 2.0)
}
