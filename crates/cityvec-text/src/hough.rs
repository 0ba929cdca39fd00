//! Hough line detection over a centroid canvas.

use std::f64::consts::PI;

use cityvec_core::{Bitmap, Channels, Pixel};

use crate::error::{TextError, TextResult};

/// Angular resolution of the accumulator, matching spec's `pi/180`.
const THETA_BINS: usize = 180;

/// A detected line in the Hesse normal form `x*cos(theta) + y*sin(theta)
/// = rho`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughLine {
    pub rho: f64,
    pub theta: f64,
}

impl HoughLine {
    /// Numerically stable perpendicular distance from `(col, row)` to
    /// this line: `|x*cos(theta) + y*sin(theta) - rho|`.
    pub fn distance_to(&self, p: Pixel) -> f64 {
        let x = p.col as f64;
        let y = p.row as f64;
        (x * self.theta.cos() + y * self.theta.sin() - self.rho).abs()
    }
}

/// Detect candidate lines in a centroid canvas via a standard Hough
/// accumulator, relaxing the vote threshold until at least `min_lines`
/// candidates are found or the threshold bottoms out at 1.
///
/// Returns an empty vector if the canvas has no foreground pixels at
/// all -- a valid state for text-free images, not an error.
///
/// # Errors
///
/// Returns [`TextError::WrongChannelCount`] if `centroid_canvas` is not
/// single-channel.
pub fn hough_lines(centroid_canvas: &Bitmap, min_lines: usize) -> TextResult<Vec<HoughLine>> {
    if centroid_canvas.channels() != Channels::Gray {
        return Err(TextError::WrongChannelCount {
            expected: 1,
            actual: centroid_canvas.channels().count(),
        });
    }

    let width = centroid_canvas.width();
    let height = centroid_canvas.height();
    let mut points = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let p = Pixel::new(row, col);
            if centroid_canvas.is_foreground(p) {
                points.push(p);
            }
        }
    }

    if points.is_empty() {
        return Ok(Vec::new());
    }

    let diag = ((width as f64).powi(2) + (height as f64).powi(2)).sqrt();
    let rho_bins = (2.0 * diag).ceil() as usize + 1;
    let mut accumulator = vec![vec![0u32; rho_bins]; THETA_BINS];

    let thetas: Vec<f64> = (0..THETA_BINS).map(|i| i as f64 * PI / THETA_BINS as f64).collect();

    for p in &points {
        let x = p.col as f64;
        let y = p.row as f64;
        for (theta_idx, theta) in thetas.iter().enumerate() {
            let rho = x * theta.cos() + y * theta.sin();
            let bin = ((rho + diag).round() as isize).clamp(0, rho_bins as isize - 1) as usize;
            accumulator[theta_idx][bin] += 1;
        }
    }

    let max_votes = accumulator.iter().flatten().copied().max().unwrap_or(0);
    if max_votes == 0 {
        return Ok(Vec::new());
    }

    let mut threshold = max_votes;
    loop {
        let lines = collect_above_threshold(&accumulator, &thetas, diag, threshold);
        if lines.len() >= min_lines || threshold <= 1 {
            return Ok(lines);
        }
        threshold = (threshold / 2).max(1);
    }
}

fn collect_above_threshold(accumulator: &[Vec<u32>], thetas: &[f64], diag: f64, threshold: u32) -> Vec<HoughLine> {
    let mut lines = Vec::new();
    for (theta_idx, row) in accumulator.iter().enumerate() {
        for (rho_bin, &votes) in row.iter().enumerate() {
            if votes >= threshold {
                lines.push(HoughLine {
                    rho: rho_bin as f64 - diag,
                    theta: thetas[theta_idx],
                });
            }
        }
    }
    lines
}
