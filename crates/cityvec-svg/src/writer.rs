//! Minimal SVG 1.1 document builder.
//!
//! Backed by direct string formatting: the fixed operation set this
//! pipeline needs (move/line/close/stroke/fill, one rectangle primitive)
//! doesn't earn a generic SVG serialiser crate, the same way the imaging
//! workspace's own format writers hand-roll their output rather than
//! delegating to one.

use std::io::Write;

use cityvec_core::ColorPoly;

use crate::error::SvgResult;

/// Accumulates path and rectangle operations and renders them as an SVG
/// 1.1 document of fixed pixel dimensions.
pub struct SvgWriter {
    width: u32,
    height: u32,
    elements: Vec<String>,
    path_data: String,
    stroke_width: f64,
    rgb: [u8; 3],
}

impl SvgWriter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            path_data: String::new(),
            stroke_width: 1.0,
            rgb: [0, 0, 0],
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.path_data.push_str(&format!("M {x:.3} {y:.3} "));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.path_data.push_str(&format!("L {x:.3} {y:.3} "));
    }

    pub fn close_path(&mut self) {
        self.path_data.push_str("Z ");
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width;
    }

    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.rgb = [r, g, b];
    }

    /// Emit the accumulated path as a stroked, unfilled shape, then clear
    /// it for the next one.
    pub fn stroke(&mut self) {
        if self.path_data.is_empty() {
            return;
        }
        let [r, g, b] = self.rgb;
        self.elements.push(format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"rgb({r},{g},{b})\" stroke-width=\"{:.3}\" stroke-linecap=\"square\" stroke-linejoin=\"round\"/>",
            self.path_data.trim_end(),
            self.stroke_width,
        ));
        self.path_data.clear();
    }

    /// Emit the accumulated path as a filled, unstroked shape, then
    /// clear it for the next one.
    pub fn fill(&mut self) {
        if self.path_data.is_empty() {
            return;
        }
        let [r, g, b] = self.rgb;
        self.elements.push(format!(
            "<path d=\"{}\" fill=\"rgb({r},{g},{b})\" stroke=\"none\"/>",
            self.path_data.trim_end(),
        ));
        self.path_data.clear();
    }

    /// Emit a filled rectangle directly, used for degenerate
    /// single-pixel polylines.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let [r, g, b] = self.rgb;
        self.elements.push(format!(
            "<rect x=\"{x:.3}\" y=\"{y:.3}\" width=\"{width:.3}\" height=\"{height:.3}\" fill=\"rgb({r},{g},{b})\"/>",
        ));
    }

    /// Draw a closed, filled colour polygon: moves through every point,
    /// closes the path, and fills it with the polygon's colour.
    pub fn draw_color_poly(&mut self, poly: &ColorPoly) {
        let mut points = poly.points.iter();
        if let Some(first) = points.next() {
            self.move_to(first.col as f64, first.row as f64);
            for p in points {
                self.line_to(p.col as f64, p.row as f64);
            }
            self.close_path();
            let [r, g, b] = poly.color;
            self.set_rgb(r, g, b);
            self.fill();
        }
    }

    /// Render the accumulated document.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> SvgResult<()> {
        writeln!(
            sink,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            self.width, self.height, self.width, self.height,
        )?;
        for element in &self.elements {
            writeln!(sink, "{element}")?;
        }
        writeln!(sink, "</svg>")?;
        Ok(())
    }

    pub fn to_string(&self) -> SvgResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
