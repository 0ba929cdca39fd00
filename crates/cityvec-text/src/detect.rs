//! Collinear grouping orchestration: combines Hough detection, parallel
//! clustering, tolerance filtering, and word-boundary classification
//! into the complete text-detection stage.

use std::collections::HashSet;

use cityvec_core::{BitmapMut, ConnectedComponent};

use crate::centroid::render_centroid_canvas;
use crate::cluster::cluster_lines;
use crate::erase::erase_text;
use crate::error::TextResult;
use crate::hough::hough_lines;
use crate::wordgroup::classify_text;

/// Tolerance, in pixels, within which a centroid is considered to lie on
/// a cluster line. Not spec-mandated; chosen to comfortably cover
/// rounding error from rendering a centroid onto the integer grid.
const LINE_TOLERANCE: f64 = 1.5;

/// Tunable parameters for the collinear-grouping text-detection stage.
#[derive(Debug, Clone, Copy)]
pub struct TextDetectionParams {
    pub hough_min_lines: usize,
    pub hough_cluster_k: usize,
    pub hough_rho_step: f64,
    pub word_boundary_fraction: f64,
}

impl Default for TextDetectionParams {
    fn default() -> Self {
        Self {
            hough_min_lines: 1,
            hough_cluster_k: crate::cluster::DEFAULT_CLUSTER_K,
            hough_rho_step: 3.0,
            word_boundary_fraction: crate::wordgroup::DEFAULT_WORD_BOUNDARY_FRACTION,
        }
    }
}

/// Sort key along a line's tangent direction, used to order components
/// for the word-boundary scan.
fn tangent_coord(theta: f64, component: &ConnectedComponent) -> f64 {
    let (row, col) = component.centroid();
    col * theta.sin() - row * theta.cos()
}

/// Run the full collinear-grouping pipeline: detect candidate text
/// lines, cluster parallel lines around each, classify the components
/// that fall on them, and erase everything classified as text from
/// `black_layer`.
///
/// Returns the components erased as text. An empty result (including
/// when Hough detection finds no lines at all) is a valid state for
/// text-free images, not an error.
pub fn detect_and_erase_text(
    components: &[ConnectedComponent],
    black_layer: &mut BitmapMut,
    params: &TextDetectionParams,
) -> TextResult<Vec<ConnectedComponent>> {
    let canvas = render_centroid_canvas(black_layer.width(), black_layer.height(), components);
    let primary_lines = hough_lines(&canvas, params.hough_min_lines)?;

    let mut text_labels: HashSet<u32> = HashSet::new();

    for primary in primary_lines {
        let cluster_lines_set = cluster_lines(primary, params.hough_cluster_k, params.hough_rho_step);

        let mut on_cluster: Vec<ConnectedComponent> = components
            .iter()
            .filter(|c| {
                let (row, col) = c.centroid();
                cluster_lines_set
                    .iter()
                    .any(|line| line.distance_to(cityvec_core::Pixel::new(row.round() as u32, col.round() as u32)) <= LINE_TOLERANCE)
            })
            .copied()
            .collect();

        if on_cluster.is_empty() {
            continue;
        }

        on_cluster.sort_by(|a, b| {
            tangent_coord(primary.theta, a)
                .partial_cmp(&tangent_coord(primary.theta, b))
                .unwrap()
        });

        let classified = classify_text(&on_cluster, params.word_boundary_fraction);
        for (component, is_text) in on_cluster.iter().zip(classified) {
            if is_text {
                text_labels.insert(component.label);
            }
        }
    }

    let text_components: Vec<ConnectedComponent> =
        components.iter().filter(|c| text_labels.contains(&c.label)).copied().collect();

    erase_text(&text_components, black_layer);

    Ok(text_components)
}
