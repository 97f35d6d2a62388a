//! SVG stream-writer surface
//!
//! A vector-file-writer target: every primitive is appended to an
//! in-memory SVG document. There is no pixel buffer, so this surface can
//! never be promoted to a native vector backend; contexts bound to it stay
//! raster-only and route paths through the fallback renderer.

use std::fmt::Write as _;

use vexel_geom::{Point, Rect, Size};

use crate::style::{Brush, FillRule, Font, Pen};
use crate::surface::{Surface, SurfaceError};
use crate::text;

pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSize { width, height });
        }
        Ok(Self { width, height, body: String::new() })
    }

    /// Number of elements written so far.
    pub fn element_count(&self) -> usize {
        self.body.matches('<').count()
    }

    /// Complete the document.
    pub fn finish(self) -> String {
        tracing::debug!("Finishing SVG document with {} elements", self.element_count());
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n{}</svg>\n",
            self.width, self.height, self.body
        )
    }

    fn stroke_attrs(pen: &Pen) -> String {
        if pen.is_visible() {
            let c = pen.color;
            format!(
                "stroke=\"rgb({},{},{})\" stroke-width=\"{}\"",
                c.r, c.g, c.b, pen.width
            )
        } else {
            "stroke=\"none\"".to_string()
        }
    }

    fn fill_attrs(brush: &Brush, rule: Option<FillRule>) -> String {
        if brush.is_visible() {
            let c = brush.color();
            let rule = match rule {
                Some(FillRule::NonZero) => " fill-rule=\"nonzero\"",
                Some(FillRule::EvenOdd) => " fill-rule=\"evenodd\"",
                None => "",
            };
            format!("fill=\"rgb({},{},{})\"{}", c.r, c.g, c.b, rule)
        } else {
            "fill=\"none\"".to_string()
        }
    }

    fn points_attr(points: &[Point]) -> String {
        let mut s = String::new();
        for p in points {
            let _ = write!(s, "{},{} ", p.x, p.y);
        }
        s.trim_end().to_string()
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn stroke_line(&mut self, a: Point, b: Point, pen: &Pen) {
        if !pen.is_visible() {
            return;
        }
        let _ = writeln!(
            self.body,
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>",
            a.x, a.y, b.x, b.y, Self::stroke_attrs(pen)
        );
    }

    fn stroke_polyline(&mut self, points: &[Point], pen: &Pen) {
        if points.len() < 2 || !pen.is_visible() {
            return;
        }
        let _ = writeln!(
            self.body,
            "  <polyline points=\"{}\" fill=\"none\" {}/>",
            Self::points_attr(points),
            Self::stroke_attrs(pen)
        );
    }

    fn draw_rect(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        let _ = writeln!(
            self.body,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {} {}/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            Self::fill_attrs(brush, None),
            Self::stroke_attrs(pen)
        );
    }

    fn draw_ellipse(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        let rx = rect.width / 2.0;
        let ry = rect.height / 2.0;
        let _ = writeln!(
            self.body,
            "  <ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {} {}/>",
            rect.x + rx,
            rect.y + ry,
            rx,
            ry,
            Self::fill_attrs(brush, None),
            Self::stroke_attrs(pen)
        );
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: &Brush, rule: FillRule) {
        if points.len() < 2 {
            return;
        }
        let _ = writeln!(
            self.body,
            "  <polygon points=\"{}\" {} {}/>",
            Self::points_attr(points),
            Self::fill_attrs(brush, Some(rule)),
            Self::stroke_attrs(pen)
        );
    }

    fn draw_text(&mut self, s: &str, pos: Point, font: &Font) {
        let c = font.color;
        // pos is the glyph-box top-left; SVG anchors text at the baseline
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"rgb({},{},{})\">{}</text>",
            pos.x,
            pos.y + font.size,
            font.size,
            c.r, c.g, c.b,
            escape(s)
        );
    }

    fn draw_rotated_text(&mut self, s: &str, pos: Point, degrees: f32, font: &Font) {
        let c = font.color;
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"rgb({},{},{})\" transform=\"rotate({} {} {})\">{}</text>",
            pos.x,
            pos.y + font.size,
            font.size,
            c.r, c.g, c.b,
            -degrees, pos.x, pos.y,
            escape(s)
        );
    }

    fn text_extent(&self, s: &str, font: &Font) -> Size {
        let exact = text::measure(s, font);
        Size::new(exact.width.ceil(), exact.height.ceil())
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn records_primitives_as_elements() {
        let mut svg = SvgSurface::new(100, 80).unwrap();
        svg.draw_rect(
            Rect::new(1.0, 2.0, 3.0, 4.0),
            &Pen::solid(Color::BLACK, 1.0),
            &Brush::solid(Color::RED),
        );
        svg.stroke_line(Point::ZERO, Point::new(10.0, 10.0), &Pen::default());
        let doc = svg.finish();
        assert!(doc.contains("<rect"));
        assert!(doc.contains("<line"));
        assert!(doc.contains("width=\"100\""));
    }

    #[test]
    fn polygon_carries_fill_rule() {
        let mut svg = SvgSurface::new(10, 10).unwrap();
        let pts = [Point::ZERO, Point::new(5.0, 0.0), Point::new(5.0, 5.0)];
        svg.draw_polygon(&pts, &Pen::invisible(), &Brush::solid(Color::BLUE), FillRule::NonZero);
        assert!(svg.finish().contains("fill-rule=\"nonzero\""));
    }

    #[test]
    fn no_native_promotion() {
        let mut svg = SvgSurface::new(10, 10).unwrap();
        assert!(!svg.supports_native());
        assert!(svg.native_pixels().is_none());
    }

    #[test]
    fn text_is_escaped() {
        let mut svg = SvgSurface::new(10, 10).unwrap();
        svg.draw_text("a<b", Point::ZERO, &Font::default());
        assert!(svg.finish().contains("a&lt;b"));
    }
}
