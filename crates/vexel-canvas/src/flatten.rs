//! Segment flattening for containment queries
//!
//! Reduces a symbolic recording to closed polygon loops so point-in-path
//! tests work without any native path object.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use vexel_geom::{approx, Point, Rect};
use vexel_raster::FillRule;

use crate::segment::{PathSegment, SegmentKind};

/// Steps per full turn when loops are built from self-contained segments.
const LOOP_STEPS: u32 = 32;

/// Closed outline of a rounded rectangle: four quarter-arc corners joined
/// into one polygon. Shared by the fallback renderer.
pub(crate) fn rounded_rect_outline(tl: Point, br: Point, radius: f32, steps: u32) -> Vec<Point> {
    let rect = Rect::from_points(tl, br);
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let mut pts = Vec::with_capacity(4 * (steps as usize + 1));
    // Corner centers, walked top-left -> top-right -> bottom-right -> bottom-left
    let corners = [
        (Point::new(rect.x + r, rect.y + r), PI, 3.0 * FRAC_PI_2),
        (Point::new(rect.right() - r, rect.y + r), 3.0 * FRAC_PI_2, TAU),
        (Point::new(rect.right() - r, rect.bottom() - r), 0.0, FRAC_PI_2),
        (Point::new(rect.x + r, rect.bottom() - r), FRAC_PI_2, PI),
    ];
    for (center, a0, a1) in corners {
        pts.extend(approx::arc(center, r, a0, a1, false, steps));
    }
    pts
}

fn ellipse_loop(seg: &PathSegment) -> Vec<Point> {
    if seg.is_circle_form() {
        approx::arc(seg.points[0], seg.radius, 0.0, TAU, false, LOOP_STEPS)
    } else {
        let rect = Rect::from_points(seg.points[0], seg.points[1]);
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        let center = Point::new(rect.x + rx, rect.y + ry);
        (0..=LOOP_STEPS)
            .map(|i| {
                let t = i as f32 / LOOP_STEPS as f32 * TAU;
                Point::new(center.x + rx * t.cos(), center.y + ry * t.sin())
            })
            .collect()
    }
}

/// Flatten a recording into polygon loops. Open subpaths are treated as
/// implicitly closed, which is the usual fill interpretation.
pub(crate) fn flatten(segments: &[PathSegment]) -> Vec<Vec<Point>> {
    fn flush(loops: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
        if current.len() >= 3 {
            loops.push(std::mem::take(current));
        } else {
            current.clear();
        }
    }

    let mut loops: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut cursor = Point::ZERO;

    for seg in segments {
        if !seg.is_well_formed() {
            continue;
        }
        match seg.kind {
            SegmentKind::MoveTo => {
                flush(&mut loops, &mut current);
                cursor = seg.points[0];
                current.push(cursor);
            }
            SegmentKind::LineTo => {
                cursor = seg.points[0];
                current.push(cursor);
            }
            SegmentKind::QuadCurveTo => {
                let pts = approx::quad_bezier(cursor, seg.points[0], seg.points[1], approx::DEFAULT_STEPS);
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
                loops.push(vec![
                    rect.top_left(),
                    Point::new(rect.right(), rect.y),
                    rect.bottom_right(),
                    Point::new(rect.x, rect.bottom()),
                ]);
            }
            SegmentKind::RoundedRectangle => {
                loops.push(rounded_rect_outline(
                    seg.points[0],
                    seg.points[1],
                    seg.radius,
                    approx::DEFAULT_STEPS,
                ));
            }
            SegmentKind::Ellipse => {
                loops.push(ellipse_loop(seg));
            }
            SegmentKind::Close => {
                flush(&mut loops, &mut current);
            }
        }
    }
    flush(&mut loops, &mut current);
    loops
}

/// Point-in-path test over flattened loops using a rightward ray cast.
pub(crate) fn contains(segments: &[PathSegment], p: Point, rule: FillRule) -> bool {
    let loops = flatten(segments);
    let mut winding = 0i32;
    let mut crossings = 0u32;
    for poly in &loops {
        let n = poly.len();
        for i in 0..n {
            let a = poly[i];
            let b = poly[(i + 1) % n];
            if (a.y <= p.y) == (b.y <= p.y) {
                continue;
            }
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x > p.x {
                crossings += 1;
                winding += if b.y > a.y { 1 } else { -1 };
            }
        }
    }
    match rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => crossings % 2 == 1,
    }
}
