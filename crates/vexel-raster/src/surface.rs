//! The raster surface contract
//!
//! A surface only has to expose primitive scan conversion: lines,
//! rectangles, ellipses, polygons and text. Surfaces that can hand out a
//! pixel buffer may additionally be promoted to a native vector backend by
//! the drawing context; pure stream writers cannot.

use thiserror::Error;
use tiny_skia::PixmapMut;
use vexel_geom::{Point, Rect, Size};

use crate::style::{Brush, FillRule, Font, Pen};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface dimensions must be non-zero (got {width}x{height})")]
    ZeroSize { width: u32, height: u32 },
}

/// A drawing target that supports primitive scan conversion.
///
/// All coordinates are surface-local. Implementations degrade rather than
/// fail: out-of-range geometry is clipped, invisible pens and brushes are
/// skipped.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Draw a single line segment.
    fn stroke_line(&mut self, a: Point, b: Point, pen: &Pen);

    /// Draw connected line segments. Implementations without a batched
    /// polyline primitive draw the segments independently.
    fn stroke_polyline(&mut self, points: &[Point], pen: &Pen) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], pen);
        }
    }

    /// Fill and/or outline a rectangle.
    fn draw_rect(&mut self, rect: Rect, pen: &Pen, brush: &Brush);

    /// Fill and/or outline an axis-aligned ellipse inscribed in `rect`.
    fn draw_ellipse(&mut self, rect: Rect, pen: &Pen, brush: &Brush);

    /// Fill and/or outline a polygon under the given fill rule. The outline
    /// includes the closing edge from the last point back to the first.
    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: &Brush, rule: FillRule);

    /// Draw text with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, pos: Point, font: &Font);

    /// Draw text rotated counter-clockwise by `degrees` around `pos`.
    fn draw_rotated_text(&mut self, text: &str, pos: Point, degrees: f32, font: &Font);

    /// Measure text. Raster surfaces report integer-biased metrics.
    fn text_extent(&self, text: &str, font: &Font) -> Size;

    /// Whether this surface can be promoted to a native vector backend.
    fn supports_native(&self) -> bool {
        false
    }

    /// Pixel buffer for a native vector backend wrapping this surface, or
    /// `None` for surfaces without one. Must return `Some` whenever
    /// [`supports_native`](Surface::supports_native) reports `true`.
    fn native_pixels(&mut self) -> Option<PixmapMut<'_>> {
        None
    }

    /// Flush buffered output. No-op for unbuffered surfaces.
    fn flush(&mut self) {}
}
