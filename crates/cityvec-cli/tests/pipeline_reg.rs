//! Whole-pipeline regression tests exercising `pipeline::run` end-to-end
//! on small synthetic bitmaps built in memory, covering scenarios S1
//! (blank input), S2 (a single stroke), and S5 (a labelled stroke with
//! text erased before vectorization).

use cityvec_cli::pipeline::{PipelineParams, run};
use cityvec_core::{Bitmap, Channels};
use cityvec_test::RegParams;

fn white_canvas(width: u32, height: u32) -> Vec<u8> {
    vec![255u8; width as usize * height as usize * 3]
}

fn paint(pixels: &mut [u8], width: u32, row: u32, col: u32) {
    let idx = (row as usize * width as usize + col as usize) * 3;
    pixels[idx..idx + 3].copy_from_slice(&[0, 0, 0]);
}

#[test]
fn s1_blank_image_produces_an_empty_but_valid_svg() {
    let mut rp = RegParams::new("pipeline_s1_blank");

    let width = 15;
    let height = 15;
    let bgr = Bitmap::from_pixels(width, height, Channels::Bgr, white_canvas(width, height)).unwrap();
    let svg = run(&bgr, &PipelineParams::default()).unwrap();

    rp.compare_values(1.0, f64::from(u8::from(svg.contains("<svg"))), 0.0);
    rp.compare_values(0.0, f64::from(u8::from(svg.contains("<path"))), 0.0);

    assert!(rp.cleanup(), "S1 blank-image scenario had mismatches, see stderr");
}

#[test]
fn s2_single_straight_stroke_is_vectorized_as_one_path() {
    let mut rp = RegParams::new("pipeline_s2_stroke");

    let width = 30;
    let height = 30;
    let mut pixels = white_canvas(width, height);
    for col in 4..26 {
        paint(&mut pixels, width, 15, col);
    }
    let bgr = Bitmap::from_pixels(width, height, Channels::Bgr, pixels).unwrap();
    let svg = run(&bgr, &PipelineParams::default()).unwrap();

    let path_count = svg.matches("<path").count();
    rp.compare_values(1.0, f64::from(u8::from(path_count >= 1)), 0.0);

    assert!(rp.cleanup(), "S2 single-stroke scenario had mismatches, see stderr");
}

#[test]
fn s5_labelled_stroke_erases_the_label_and_keeps_the_stroke() {
    let mut rp = RegParams::new("pipeline_s5_labelled_stroke");

    let width = 60;
    let height = 60;
    let mut pixels = white_canvas(width, height);

    // The street: a long straight stroke.
    for col in 5..55 {
        paint(&mut pixels, width, 40, col);
    }

    // The label: a run of small, evenly spaced glyph-like marks well
    // away from the stroke's row, each a compact blob.
    for i in 0..8 {
        let base_col = 5 + i * 4;
        for dr in 0..2 {
            for dc in 0..2 {
                paint(&mut pixels, width, 10 + dr, base_col + dc);
            }
        }
    }

    let bgr = Bitmap::from_pixels(width, height, Channels::Bgr, pixels).unwrap();
    let svg = run(&bgr, &PipelineParams::default()).unwrap();

    // The stroke must survive vectorization regardless of what happens
    // to the label.
    rp.compare_values(1.0, f64::from(u8::from(svg.contains("<path"))), 0.0);

    assert!(rp.cleanup(), "S5 labelled-stroke scenario had mismatches, see stderr");
}
