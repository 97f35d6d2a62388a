//! Fallback path renderer
//!
//! Renders a symbolic recording through the primitive surface contract
//! when no native backend is available. Subpaths are accumulated as
//! polylines; curves and arcs are approximated; self-contained shapes map
//! straight onto surface primitives.

use vexel_geom::{approx, Point, Rect};
use vexel_raster::{Brush, FillRule, Pen, Surface};

use crate::flatten;
use crate::segment::{PathSegment, SegmentKind};

/// How a recording is emitted onto a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Fill with the brush and outline with the pen.
    Outline,
    /// Fill only; the caller passes an invisible pen.
    Fill,
    /// Outline only; open subpaths stay open, closed ones get their
    /// closing edge.
    Stroke,
}

fn emit(
    surface: &mut dyn Surface,
    current: &mut Vec<Point>,
    pen: &Pen,
    brush: &Brush,
    rule: FillRule,
    mode: DrawMode,
    closed: bool,
) {
    if current.len() < 2 {
        current.clear();
        return;
    }
    match mode {
        DrawMode::Stroke => {
            surface.stroke_polyline(current, pen);
            if closed && current.len() >= 3 {
                // draw_polygon would re-fill; add the closing edge by hand
                let first = current[0];
                let last = current[current.len() - 1];
                surface.stroke_line(last, first, pen);
            }
        }
        DrawMode::Fill | DrawMode::Outline => {
            if current.len() >= 3 {
                surface.draw_polygon(current, pen, brush, rule);
            } else {
                surface.stroke_polyline(current, pen);
            }
        }
    }
    current.clear();
}

/// Walk a recording and draw it through surface primitives.
///
/// Fill and stroke emulation happens upstream: the context passes an
/// invisible pen for pure fills and an invisible brush for pure strokes,
/// and this walk hands both through unchanged.
pub fn render_path(
    surface: &mut dyn Surface,
    segments: &[PathSegment],
    pen: &Pen,
    brush: &Brush,
    rule: FillRule,
    mode: DrawMode,
) {
    let mut current: Vec<Point> = Vec::new();
    let mut cursor = Point::ZERO;

    for seg in segments {
        if !seg.is_well_formed() {
            continue;
        }
        match seg.kind {
            SegmentKind::MoveTo => {
                emit(surface, &mut current, pen, brush, rule, mode, false);
                cursor = seg.points[0];
                current.push(cursor);
            }
            SegmentKind::LineTo => {
                cursor = seg.points[0];
                current.push(cursor);
            }
            SegmentKind::QuadCurveTo => {
                let pts =
                    approx::quad_bezier(cursor, seg.points[0], seg.points[1], approx::DEFAULT_STEPS);
                current.extend(&pts[1..]);
                cursor = seg.points[1];
            }
            SegmentKind::CurveTo => {
                let pts = approx::cubic_bezier(
                    cursor,
                    seg.points[0],
                    seg.points[1],
                    seg.points[2],
                    approx::DEFAULT_STEPS,
                );
                current.extend(&pts[1..]);
                cursor = seg.points[2];
            }
            SegmentKind::Arc => {
                let pts = approx::arc(
                    seg.points[0],
                    seg.radius,
                    seg.start_angle,
                    seg.end_angle,
                    seg.clockwise,
                    approx::DEFAULT_STEPS,
                );
                if let Some(last) = pts.last() {
                    cursor = *last;
                }
                current.extend(pts);
            }
            SegmentKind::ArcTo => {
                // Straight-line simplification of the tangent arc
                current.push(seg.points[0]);
                current.push(seg.points[1]);
                cursor = seg.points[1];
            }
            SegmentKind::Rectangle => {
                let rect = Rect::from_points(seg.points[0], seg.points[1]);
                surface.draw_rect(rect, pen, brush);
            }
            SegmentKind::RoundedRectangle => {
                let outline = flatten::rounded_rect_outline(
                    seg.points[0],
                    seg.points[1],
                    seg.radius,
                    approx::DEFAULT_STEPS,
                );
                surface.draw_polygon(&outline, pen, brush, rule);
            }
            SegmentKind::Ellipse => {
                let rect = if seg.is_circle_form() {
                    let c = seg.points[0];
                    Rect::new(
                        c.x - seg.radius,
                        c.y - seg.radius,
                        seg.radius * 2.0,
                        seg.radius * 2.0,
                    )
                } else {
                    Rect::from_points(seg.points[0], seg.points[1])
                };
                surface.draw_ellipse(rect, pen, brush);
            }
            SegmentKind::Close => {
                emit(surface, &mut current, pen, brush, rule, mode, true);
            }
        }
    }
    // Trailing open subpath: strokes stay open, fills close implicitly
    emit(surface, &mut current, pen, brush, rule, mode, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_raster::{Color, MemorySurface};

    fn surface() -> MemorySurface {
        MemorySurface::raster_only(20, 20).unwrap()
    }

    fn triangle() -> Vec<PathSegment> {
        vec![
            PathSegment::move_to(Point::new(0.0, 0.0)),
            PathSegment::line_to(Point::new(10.0, 0.0)),
            PathSegment::line_to(Point::new(10.0, 10.0)),
            PathSegment::close(),
        ]
    }

    #[test]
    fn fill_mode_fills_interior_only() {
        let mut s = surface();
        render_path(
            &mut s,
            &triangle(),
            &Pen::invisible(),
            &Brush::solid(Color::RED),
            FillRule::NonZero,
            DrawMode::Fill,
        );
        assert_eq!(s.pixel(7, 3), Some(Color::RED));
        assert_eq!(s.pixel(1, 9), Some(Color::TRANSPARENT));
    }

    #[test]
    fn stroke_mode_leaves_open_subpath_open() {
        let mut s = surface();
        let segs = vec![
            PathSegment::move_to(Point::new(2.0, 2.0)),
            PathSegment::line_to(Point::new(16.0, 2.0)),
            PathSegment::line_to(Point::new(16.0, 16.0)),
        ];
        render_path(
            &mut s,
            &segs,
            &Pen::solid(Color::BLACK, 1.0),
            &Brush::invisible(),
            FillRule::EvenOdd,
            DrawMode::Stroke,
        );
        assert_eq!(s.pixel(9, 2), Some(Color::BLACK));
        // No closing edge from (16,16) back to (2,2)
        assert_eq!(s.pixel(9, 9), Some(Color::TRANSPARENT));
        // And no fill
        assert_eq!(s.pixel(14, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn stroke_mode_closes_explicitly_closed_subpath() {
        let mut s = surface();
        render_path(
            &mut s,
            &triangle(),
            &Pen::solid(Color::BLACK, 1.0),
            &Brush::invisible(),
            FillRule::EvenOdd,
            DrawMode::Stroke,
        );
        // Closing edge runs from (10,10) back to (0,0)
        assert_eq!(s.pixel(5, 5), Some(Color::BLACK));
        // Interior stays empty
        assert_eq!(s.pixel(8, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn rectangle_segment_maps_to_rect_primitive() {
        let mut s = surface();
        let segs = vec![PathSegment::rectangle(Rect::new(4.0, 4.0, 8.0, 6.0))];
        render_path(
            &mut s,
            &segs,
            &Pen::invisible(),
            &Brush::solid(Color::BLUE),
            FillRule::NonZero,
            DrawMode::Fill,
        );
        assert_eq!(s.pixel(8, 6), Some(Color::BLUE));
        assert_eq!(s.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn circle_form_ellipse_rendered_around_center() {
        let mut s = surface();
        let segs = vec![PathSegment::circle(Point::new(10.0, 10.0), 5.0)];
        render_path(
            &mut s,
            &segs,
            &Pen::invisible(),
            &Brush::solid(Color::GREEN),
            FillRule::NonZero,
            DrawMode::Fill,
        );
        assert_eq!(s.pixel(10, 10), Some(Color::GREEN));
        assert_eq!(s.pixel(18, 18), Some(Color::TRANSPARENT));
    }

    #[test]
    fn trailing_open_subpath_fills_as_if_closed() {
        let mut s = surface();
        let segs = vec![
            PathSegment::move_to(Point::new(0.0, 0.0)),
            PathSegment::line_to(Point::new(10.0, 0.0)),
            PathSegment::line_to(Point::new(10.0, 10.0)),
        ];
        render_path(
            &mut s,
            &segs,
            &Pen::invisible(),
            &Brush::solid(Color::RED),
            FillRule::EvenOdd,
            DrawMode::Fill,
        );
        assert_eq!(s.pixel(7, 3), Some(Color::RED));
    }
}
