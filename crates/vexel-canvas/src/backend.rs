//! Native vector backend
//!
//! Retained-path drawing over a tiny-skia pixel buffer: real path objects,
//! antialiasing, affine transforms and fractional text metrics. A context
//! owns at most one of these, constructed while binding a promotable
//! surface.

use std::f32::consts::FRAC_PI_2;

use tiny_skia::{Paint, PathBuilder, PixmapMut, Stroke};
use vexel_geom::{Point, Rect, Size, Transform};
use vexel_raster::{text, Brush, FillRule, Font, Pen};

use crate::flatten;
use crate::path::SymbolicPath;
use crate::segment::{PathSegment, SegmentKind};

/// Antialiasing mode of a native backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antialias {
    /// Backend default (antialiased)
    #[default]
    Default,
    /// Antialiasing disabled
    None,
}

/// Retained native path, mirrored call-by-call from a symbolic recording.
#[derive(Debug, Clone)]
pub struct NativePath {
    builder: PathBuilder,
}

impl Default for NativePath {
    fn default() -> Self {
        Self::new()
    }
}

impl NativePath {
    pub fn new() -> Self {
        Self { builder: PathBuilder::new() }
    }

    /// Replay a recording into a fresh native path.
    pub fn rebuild(segments: &[PathSegment]) -> Self {
        let mut native = Self::new();
        for seg in segments {
            native.replay(seg);
        }
        native
    }

    /// Re-issue one recorded segment against this path. Malformed
    /// segments are skipped.
    pub fn replay(&mut self, seg: &PathSegment) {
        if !seg.is_well_formed() {
            return;
        }
        match seg.kind {
            SegmentKind::MoveTo => self.move_to(seg.points[0]),
            SegmentKind::LineTo => self.line_to(seg.points[0]),
            SegmentKind::QuadCurveTo => self.quad_curve_to(seg.points[0], seg.points[1]),
            SegmentKind::CurveTo => self.curve_to(seg.points[0], seg.points[1], seg.points[2]),
            SegmentKind::Arc => self.arc(
                seg.points[0],
                seg.radius,
                seg.start_angle,
                seg.end_angle,
                seg.clockwise,
            ),
            SegmentKind::ArcTo => self.arc_to(seg.points[0], seg.points[1], seg.radius),
            SegmentKind::Rectangle => {
                self.rectangle(Rect::from_points(seg.points[0], seg.points[1]))
            }
            SegmentKind::RoundedRectangle => self.rounded_rectangle(
                Rect::from_points(seg.points[0], seg.points[1]),
                seg.radius,
            ),
            SegmentKind::Ellipse => {
                if seg.is_circle_form() {
                    self.circle(seg.points[0], seg.radius);
                } else {
                    self.ellipse(Rect::from_points(seg.points[0], seg.points[1]));
                }
            }
            SegmentKind::Close => self.close(),
        }
    }

    pub fn move_to(&mut self, p: Point) {
        self.builder.move_to(p.x, p.y);
    }

    pub fn line_to(&mut self, p: Point) {
        self.builder.line_to(p.x, p.y);
    }

    pub fn quad_curve_to(&mut self, ctrl: Point, end: Point) {
        self.builder.quad_to(ctrl.x, ctrl.y, end.x, end.y);
    }

    pub fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.builder.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
    }

    /// Arc as cubic spans of at most a quarter turn. Traversal order
    /// matches the polyline approximator: `clockwise` starts at the end
    /// angle.
    pub fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, clockwise: bool) {
        let (from, to) = if clockwise { (end, start) } else { (start, end) };
        let sweep = to - from;
        let spans = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as u32;
        let step = sweep / spans as f32;

        let at = |angle: f32| {
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        };
        let start_pt = at(from);
        if self.builder.is_empty() {
            self.builder.move_to(start_pt.x, start_pt.y);
        } else {
            self.builder.line_to(start_pt.x, start_pt.y);
        }
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        for i in 0..spans {
            let a0 = from + step * i as f32;
            let a1 = a0 + step;
            let p0 = at(a0);
            let p3 = at(a1);
            let c1 = Point::new(p0.x - radius * k * a0.sin(), p0.y + radius * k * a0.cos());
            let c2 = Point::new(p3.x + radius * k * a1.sin(), p3.y - radius * k * a1.cos());
            self.builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p3.x, p3.y);
        }
    }

    /// Same straight-line simplification as the fallback renderer, so the
    /// two representations cannot drift apart.
    pub fn arc_to(&mut self, p1: Point, p2: Point, _radius: f32) {
        self.builder.line_to(p1.x, p1.y);
        self.builder.line_to(p2.x, p2.y);
    }

    pub fn rectangle(&mut self, rect: Rect) {
        if let Some(r) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) {
            self.builder.push_rect(r);
        }
    }

    pub fn rounded_rectangle(&mut self, rect: Rect, radius: f32) {
        let outline = flatten::rounded_rect_outline(
            rect.top_left(),
            rect.bottom_right(),
            radius,
            vexel_geom::approx::DEFAULT_STEPS,
        );
        if let Some((first, rest)) = outline.split_first() {
            self.builder.move_to(first.x, first.y);
            for p in rest {
                self.builder.line_to(p.x, p.y);
            }
            self.builder.close();
        }
    }

    pub fn circle(&mut self, center: Point, radius: f32) {
        self.builder.push_circle(center.x, center.y, radius);
    }

    pub fn ellipse(&mut self, rect: Rect) {
        if let Some(r) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) {
            self.builder.push_oval(r);
        }
    }

    pub fn close(&mut self) {
        self.builder.close();
    }

    /// Snapshot of the retained path; `None` while empty.
    pub fn to_path(&self) -> Option<tiny_skia::Path> {
        self.builder.clone().finish()
    }

    /// Curve-aware bounding box of the retained path.
    pub fn bounds(&self) -> Option<Rect> {
        self.to_path().map(|p| {
            let b = p.bounds();
            Rect::new(b.x(), b.y(), b.width(), b.height())
        })
    }
}

/// Native-path-capable vector surface wrapping a pixel buffer.
pub struct VectorBackend<'a> {
    pixmap: PixmapMut<'a>,
    transform: Transform,
    antialias: Antialias,
}

impl<'a> VectorBackend<'a> {
    pub fn new(pixmap: PixmapMut<'a>) -> Self {
        Self {
            pixmap,
            transform: Transform::identity(),
            antialias: Antialias::Default,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn set_antialias(&mut self, mode: Antialias) {
        self.antialias = mode;
    }

    pub fn antialias(&self) -> Antialias {
        self.antialias
    }

    /// Concatenate a scale onto the current transform.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transform = Transform::scale(sx, sy).then(&self.transform);
    }

    pub fn flush(&mut self) {
        // Drawing is unbuffered; nothing to push out.
    }

    fn ts_transform(&self) -> tiny_skia::Transform {
        let t = self.transform;
        tiny_skia::Transform::from_row(t.a, t.b, t.c, t.d, t.e, t.f)
    }

    fn paint(&self, color: vexel_raster::Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.antialias == Antialias::Default;
        paint
    }

    fn resolve(path: &SymbolicPath) -> Option<tiny_skia::Path> {
        match path.native() {
            Some(native) => native.to_path(),
            // Recording made without a native mirror; the symbolic form is
            // authoritative, rebuild from it.
            None => NativePath::rebuild(path.segments()).to_path(),
        }
    }

    fn ts_rule(rule: FillRule) -> tiny_skia::FillRule {
        match rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }

    pub fn fill_path(&mut self, path: &SymbolicPath, brush: &Brush, rule: FillRule) {
        if !brush.is_visible() {
            return;
        }
        if let Some(p) = Self::resolve(path) {
            let paint = self.paint(brush.color());
            let ts = self.ts_transform();
            self.pixmap.fill_path(&p, &paint, Self::ts_rule(rule), ts, None);
        }
    }

    pub fn stroke_path(&mut self, path: &SymbolicPath, pen: &Pen) {
        if !pen.is_visible() {
            return;
        }
        if let Some(p) = Self::resolve(path) {
            let paint = self.paint(pen.color);
            let stroke = Stroke { width: pen.width, ..Stroke::default() };
            let ts = self.ts_transform();
            self.pixmap.stroke_path(&p, &paint, &stroke, ts, None);
        }
    }

    pub fn draw_path(&mut self, path: &SymbolicPath, pen: &Pen, brush: &Brush, rule: FillRule) {
        self.fill_path(path, brush, rule);
        self.stroke_path(path, pen);
    }

    pub fn draw_rect(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        let mut native = NativePath::new();
        native.rectangle(rect);
        if let Some(p) = native.to_path() {
            let ts = self.ts_transform();
            if brush.is_visible() {
                let paint = self.paint(brush.color());
                self.pixmap
                    .fill_path(&p, &paint, tiny_skia::FillRule::Winding, ts, None);
            }
            if pen.is_visible() {
                let paint = self.paint(pen.color);
                let stroke = Stroke { width: pen.width, ..Stroke::default() };
                self.pixmap.stroke_path(&p, &paint, &stroke, ts, None);
            }
        }
    }

    pub fn stroke_line(&mut self, a: Point, b: Point, pen: &Pen) {
        self.stroke_polyline(&[a, b], pen);
    }

    /// Batched polyline stroke as a single native path.
    pub fn stroke_polyline(&mut self, points: &[Point], pen: &Pen) {
        if points.len() < 2 || !pen.is_visible() {
            return;
        }
        let mut builder = PathBuilder::new();
        builder.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            builder.line_to(p.x, p.y);
        }
        if let Some(path) = builder.finish() {
            let paint = self.paint(pen.color);
            let stroke = Stroke { width: pen.width, ..Stroke::default() };
            let ts = self.ts_transform();
            self.pixmap.stroke_path(&path, &paint, &stroke, ts, None);
        }
    }

    /// Glyphs drawn as filled cells through the current transform;
    /// `angle` (radians, counter-clockwise) rotates around `pos`.
    pub fn draw_text(&mut self, s: &str, pos: Point, angle: Option<f32>, font: &Font) {
        let scale = text::scale_for(font);
        if scale <= 0.0 {
            return;
        }
        let transform = match angle {
            Some(a) => Transform::translate(-pos.x, -pos.y)
                .then(&Transform::rotate(-a))
                .then(&Transform::translate(pos.x, pos.y))
                .then(&self.transform),
            None => self.transform,
        };
        let ts = tiny_skia::Transform::from_row(
            transform.a, transform.b, transform.c, transform.d, transform.e, transform.f,
        );
        let paint = self.paint(font.color);
        let mut advance = 0.0f32;
        for ch in s.chars() {
            let rows = text::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..text::GLYPH_WIDTH {
                    if bits & (1 << (text::GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let x = pos.x + advance + col as f32 * scale;
                    let y = pos.y + row as f32 * scale;
                    if let Some(cell) = tiny_skia::Rect::from_xywh(x, y, scale, scale) {
                        self.pixmap.fill_rect(cell, &paint, ts, None);
                    }
                }
            }
            advance += text::GLYPH_ADVANCE * scale;
        }
    }

    /// Fractional text metrics.
    pub fn text_extent(&self, s: &str, font: &Font) -> Size {
        text::measure(s, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_path_bounds_match_geometry() {
        let mut native = NativePath::new();
        native.move_to(Point::new(2.0, 3.0));
        native.line_to(Point::new(12.0, 3.0));
        native.line_to(Point::new(12.0, 13.0));
        let b = native.bounds().unwrap();
        assert_eq!(b, Rect::new(2.0, 3.0, 10.0, 10.0));
    }

    #[test]
    fn empty_native_path_has_no_bounds() {
        assert!(NativePath::new().bounds().is_none());
    }

    #[test]
    fn arc_endpoints_on_circle() {
        let mut native = NativePath::new();
        native.arc(Point::new(10.0, 10.0), 5.0, 0.0, std::f32::consts::PI, false);
        let b = native.bounds().unwrap();
        // Half circle around (10,10): x spans the full diameter
        assert!((b.x - 5.0).abs() < 0.1);
        assert!((b.right() - 15.0).abs() < 0.1);
    }
}
