//! Orchestrates the full raster-to-SVG pipeline: black-layer extraction,
//! area filtering, text detection and erasure, skeletonisation, graph
//! extraction and fusion, polyline refinement, stroke-width estimation,
//! optional colour polygon recovery, and SVG emission.
//!
//! Owns every large buffer for the duration of one run and drops them
//! when it returns; nothing here survives across invocations.

use std::path::Path;

use cityvec_core::{Bitmap, Channels, ConnectedComponent};
use cityvec_region::{Threshold, extract_black_layer, filter_by_area, label_connected_components};
use cityvec_svg::SvgWriter;
use cityvec_text::{TextDetectionParams, detect_and_erase_text, recover_color_polygons};

use crate::error::{CliError, CliResult};

/// Check that every component produced by connected-component labelling
/// is internally consistent: a non-zero area and an MBR that actually
/// bounds the component's own seed pixel.
///
/// Both invariants hold by construction in `label_connected_components`,
/// but a label whose MBR never absorbed its seed (e.g. a stale
/// accumulator surviving the canonicalisation pass) would silently
/// corrupt every downstream stage, so it's checked once here rather than
/// trusted.
fn check_components_sane(stage: &str, components: &[ConnectedComponent]) -> CliResult<()> {
    for c in components {
        if c.area == 0 || !c.mbr.contains(c.seed) {
            return Err(CliError::DegenerateComponent(format!(
                "{stage}: component {} has area {} and mbr [{:?}, {:?}] not containing seed {:?}",
                c.label, c.area, c.mbr.min, c.mbr.max, c.seed
            )));
        }
    }
    Ok(())
}

/// Tunable parameters, one field per CLI flag.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub threshold: Threshold,
    pub area_ratio: u32,
    pub epsilon: f64,
    pub hough_min_lines: usize,
    pub hough_cluster_k: usize,
    pub hough_rho_step: f64,
    pub word_boundary_fraction: f64,
    pub stroke_window: u32,
    pub color_polygons: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            threshold: [128, 128, 128],
            area_ratio: 10,
            epsilon: 1.0,
            hough_min_lines: 1,
            hough_cluster_k: cityvec_text::DEFAULT_CLUSTER_K,
            hough_rho_step: 3.0,
            word_boundary_fraction: cityvec_text::DEFAULT_WORD_BOUNDARY_FRACTION,
            stroke_window: 10,
            color_polygons: false,
        }
    }
}

/// Decode an image file into a `Bgr` [`Bitmap`] the pipeline can consume.
pub fn load_bgr_bitmap(path: &Path) -> CliResult<Bitmap> {
    if !path.exists() {
        return Err(CliError::InputNotFound(path.to_path_buf()));
    }
    let img = image::open(path)?.to_rgb8();
    let (width, height) = (img.width(), img.height());
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for rgb in img.pixels() {
        pixels.push(rgb.0[2]);
        pixels.push(rgb.0[1]);
        pixels.push(rgb.0[0]);
    }
    Bitmap::from_pixels(width, height, Channels::Bgr, pixels).map_err(CliError::Core)
}

/// Run the full vectorization pipeline over an already-decoded BGR
/// raster, returning the finished SVG document as a string.
pub fn run(source_bgr: &Bitmap, params: &PipelineParams) -> CliResult<String> {
    let black_layer = extract_black_layer(source_bgr, params.threshold)?;
    let components = label_connected_components(&black_layer)?;
    check_components_sane("connected-component labelling", &components)?;
    tracing::debug!(count = components.len(), "labelled connected components");
    let filtered = filter_by_area(&components, params.area_ratio);
    tracing::debug!(kept = filtered.len(), dropped = components.len() - filtered.len(), "area filter");

    let mut working = black_layer.into_mut();
    let text_params = TextDetectionParams {
        hough_min_lines: params.hough_min_lines,
        hough_cluster_k: params.hough_cluster_k,
        hough_rho_step: params.hough_rho_step,
        word_boundary_fraction: params.word_boundary_fraction,
    };
    let erased = detect_and_erase_text(&filtered, &mut working, &text_params)?;
    tracing::debug!(erased = erased.len(), "text detection and erasure");
    let pre_thinned: Bitmap = working.into();

    let thinned = cityvec_skeleton::thin(&pre_thinned)?;

    let (mut pool, mut lines, mut node_to_line) = cityvec_graph::extract_graph(&thinned)?;
    tracing::debug!(lines = lines.len(), "graph extraction");
    cityvec_graph::fuse_nodes(&mut pool, &mut lines, &mut node_to_line);

    let mut writer = SvgWriter::new(source_bgr.width(), source_bgr.height());

    if params.color_polygons {
        let polygons = recover_color_polygons(source_bgr)?;
        tracing::debug!(polygons = polygons.len(), "colour polygon recovery");
        for poly in &polygons {
            writer.draw_color_poly(poly);
        }
    }

    writer.set_rgb(0, 0, 0);

    for (_, line) in lines.iter() {
        let path: Vec<_> = line.points.iter().map(|&id| pool.get(id).coord).collect();
        if path.is_empty() {
            continue;
        }
        let simplified = cityvec_graph::douglas_peucker(&path, params.epsilon);

        if simplified.len() < 2 {
            let p = simplified.first().copied().unwrap_or(path[0]);
            writer.fill_rect(p.col as f64 - 0.5, p.row as f64 - 0.5, 1.0, 1.0);
            continue;
        }

        let start = pool.get(line.start).coord;
        let end = pool.get(line.end).coord;
        let width = cityvec_graph::segment_stroke_width(start, end, params.stroke_window, &pre_thinned, &thinned)?;
        writer.set_stroke_width(width.max(1.0));

        let mut points = simplified.iter();
        let first = points.next().expect("checked len >= 2 above");
        writer.move_to(first.col as f64, first.row as f64);
        for p in points {
            writer.line_to(p.col as f64, p.row as f64);
        }
        writer.stroke();
    }

    Ok(writer.to_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_canvas(width: u32, height: u32) -> Vec<u8> {
        vec![255u8; width as usize * height as usize * 3]
    }

    fn paint(pixels: &mut [u8], width: u32, row: u32, col: u32) {
        let idx = (row as usize * width as usize + col as usize) * 3;
        pixels[idx..idx + 3].copy_from_slice(&[0, 0, 0]);
    }

    #[test]
    fn blank_image_yields_empty_but_valid_svg() {
        let width = 10;
        let height = 10;
        let bgr = Bitmap::from_pixels(width, height, Channels::Bgr, white_canvas(width, height)).unwrap();
        let svg = run(&bgr, &PipelineParams::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn a_single_line_segment_is_vectorized() {
        let width = 20;
        let height = 20;
        let mut pixels = white_canvas(width, height);
        for col in 2..18 {
            paint(&mut pixels, width, 10, col);
        }
        let bgr = Bitmap::from_pixels(width, height, Channels::Bgr, pixels).unwrap();
        let svg = run(&bgr, &PipelineParams::default()).unwrap();
        assert!(svg.contains("<path"));
    }

    #[test]
    fn load_missing_file_is_input_not_found() {
        let err = load_bgr_bitmap(Path::new("/nonexistent/path/for/cityvec/test.png")).unwrap_err();
        assert!(matches!(err, CliError::InputNotFound(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn color_polygons_paint_before_stroked_lines() {
        let width = 30;
        let height = 30;
        let mut pixels = vec![250u8; width as usize * height as usize * 3];
        for row in 4..14 {
            for col in 4..14 {
                let idx = (row as usize * width as usize + col as usize) * 3;
                pixels[idx..idx + 3].copy_from_slice(&[200, 40, 40]);
            }
        }
        for col in 20..28 {
            paint(&mut pixels, width, 24, col);
        }
        let bgr = Bitmap::from_pixels(width, height, Channels::Bgr, pixels).unwrap();
        let mut params = PipelineParams::default();
        params.color_polygons = true;
        let svg = run(&bgr, &params).unwrap();

        // The colour square may or may not separate into its own region
        // depending on quantisation boundaries (see cityvec-text's
        // recover_color_polygons tests); only assert ordering among
        // whatever actually got emitted.
        if let (Some(fill_idx), Some(stroke_idx)) = (svg.find("stroke=\"none\""), svg.find("fill=\"none\"")) {
            assert!(fill_idx < stroke_idx, "colour polygon must render before stroked line-work");
        }
    }

    #[test]
    fn well_formed_components_pass_the_sanity_check() {
        let good = ConnectedComponent {
            label: 1,
            seed: cityvec_core::Pixel::new(2, 2),
            mbr: cityvec_core::Mbr::from_point(cityvec_core::Pixel::new(2, 2)),
            area: 1,
        };
        assert!(check_components_sane("test", &[good]).is_ok());
    }

    #[test]
    fn zero_area_component_is_degenerate() {
        let bad = ConnectedComponent {
            label: 1,
            seed: cityvec_core::Pixel::new(2, 2),
            mbr: cityvec_core::Mbr::from_point(cityvec_core::Pixel::new(2, 2)),
            area: 0,
        };
        let err = check_components_sane("test stage", &[bad]).unwrap_err();
        assert!(matches!(err, CliError::DegenerateComponent(_)));
    }

    #[test]
    fn seed_outside_mbr_is_degenerate() {
        let bad = ConnectedComponent {
            label: 1,
            seed: cityvec_core::Pixel::new(9, 9),
            mbr: cityvec_core::Mbr::from_point(cityvec_core::Pixel::new(2, 2)),
            area: 4,
        };
        let err = check_components_sane("test stage", &[bad]).unwrap_err();
        assert!(matches!(err, CliError::DegenerateComponent(_)));
    }
}
