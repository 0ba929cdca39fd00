//! Centroid canvas construction.

use cityvec_core::{Bitmap, BitmapMut, Channels, ConnectedComponent, Pixel};

/// Render each component's centroid as a single black pixel on an
/// otherwise white canvas of the given dimensions.
pub fn render_centroid_canvas(width: u32, height: u32, components: &[ConnectedComponent]) -> Bitmap {
    let mut canvas = BitmapMut::blank(width, height, Channels::Gray).expect("nonzero dimensions");
    for c in components {
        let (cy, cx) = c.centroid();
        let row = (cy.round() as i64).clamp(0, height as i64 - 1) as u32;
        let col = (cx.round() as i64).clamp(0, width as i64 - 1) as u32;
        canvas.set_gray(Pixel::new(row, col), true);
    }
    canvas.into()
}
