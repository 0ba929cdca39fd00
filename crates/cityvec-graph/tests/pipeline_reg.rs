//! Graph pipeline regression test - extraction, fusion, and refinement
//! over a thinned right-angle skeleton.

use cityvec_core::{Bitmap, BitmapMut, Channels, Pixel};
use cityvec_graph::{douglas_peucker, extract_graph, fuse_nodes};
use cityvec_test::RegParams;

fn bitmap_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> Bitmap {
    let mut m = BitmapMut::blank(width, height, Channels::Gray).unwrap();
    for &(row, col) in points {
        m.set_gray(Pixel::new(row, col), true);
    }
    m.into()
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("graph_pipeline");

    let mut points: Vec<(u32, u32)> = (0..6).map(|c| (2, c)).collect();
    points.extend((2..6).map(|r| (r, 5)));
    let bmp = bitmap_from_points(12, 12, &points);

    let (mut pool, mut lines, mut node_to_line) = extract_graph(&bmp).expect("extract graph");
    rp.compare_values(1.0, f64::from(u8::from(!lines.is_empty())), 0.0);

    fuse_nodes(&mut pool, &mut lines, &mut node_to_line);

    let (_, line) = lines.iter().next().unwrap();
    let path: Vec<Pixel> = line.points.iter().map(|&id| pool.get(id).coord).collect();
    let simplified = douglas_peucker(&path, 0.5);
    rp.compare_values(1.0, f64::from(u8::from(simplified.len() <= path.len())), 0.0);
    rp.compare_values(1.0, f64::from(u8::from(simplified.len() >= 2)), 0.0);

    assert!(rp.cleanup(), "graph pipeline had mismatches, see stderr");
}
