//! Recorded drawing surface
//!
//! [`DisplayList`] implements [`Surface`] by recording draw operations.
//! It backs canvas nodes in the document model, lets tests inspect exactly
//! what was painted, and can be exported as a standalone SVG image.

use std::fmt::Write;
use tzclock_core::{Font, Point, Rgba, Stroke, TextAlign};
use tzclock_ports::Surface;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Point,
        font: Font,
        color: Rgba,
        align: TextAlign,
    },
}

/// Surface that keeps the operations painted since the last clear
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
    /// Number of clears since creation, i.e. repaints started
    clears: u64,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            clears: 0,
        }
    }

    /// Operations painted since the last clear
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Text operations currently on the surface
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Export the current picture as an SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        for op in &self.ops {
            let _ = match op {
                DrawOp::StrokeCircle {
                    center,
                    radius,
                    stroke,
                } => writeln!(
                    svg,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    center.x, center.y, radius, stroke.color, stroke.width
                ),
                DrawOp::FillCircle {
                    center,
                    radius,
                    color,
                } => writeln!(
                    svg,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    center.x, center.y, radius, color
                ),
                DrawOp::Line { from, to, stroke } => writeln!(
                    svg,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="{}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    stroke.color,
                    stroke.width,
                    stroke.cap.as_str()
                ),
                DrawOp::Text {
                    text,
                    at,
                    font,
                    color,
                    align,
                } => writeln!(
                    svg,
                    r#"  <text x="{}" y="{}" font-size="{}" font-family="{}" fill="{}" text-anchor="{}">{}</text>"#,
                    at.x,
                    at.y,
                    font.size_px,
                    escape(&font.family),
                    color,
                    anchor(*align),
                    escape(text)
                ),
            };
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            stroke,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ops.push(DrawOp::Line { from, to, stroke });
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &Font, color: Rgba, align: TextAlign) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            font: font.clone(),
            color,
            align,
        });
    }
}

fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Start => "start",
        TextAlign::Center => "middle",
        TextAlign::End => "end",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analog::AnalogRenderer;
    use tzclock_core::ResolvedTime;

    #[test]
    fn test_clear_counts_repaints() {
        let mut list = DisplayList::new(100.0, 100.0);
        assert!(list.ops().is_empty());
        list.stroke_line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Stroke::new(1.0, Rgba::black(1.0)),
        );
        assert_eq!(list.ops().len(), 1);
        list.clear();
        assert!(list.ops().is_empty());
        assert_eq!(list.clears(), 1);
    }

    #[test]
    fn test_svg_export_of_face() {
        let mut list = DisplayList::new(160.0, 160.0);
        AnalogRenderer::new(false).paint(&mut list, 160.0, &ResolvedTime::new(12, 0, 0, 0));
        let svg = list.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 63);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("rgba(200,0,0,0.75)"));
        assert!(svg.contains(r#"stroke-linecap="round""#));
    }

    #[test]
    fn test_svg_escapes_text() {
        let mut list = DisplayList::new(50.0, 50.0);
        list.fill_text(
            "<A & B>",
            Point::new(25.0, 25.0),
            &Font::new(14.0, "system-ui"),
            Rgba::black(1.0),
            TextAlign::Center,
        );
        let svg = list.to_svg();
        assert!(svg.contains("&lt;A &amp; B&gt;"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert_eq!(list.texts(), vec!["<A & B>"]);
    }
}
