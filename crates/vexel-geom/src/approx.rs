//! Curve and arc flattening
//!
//! Converts Bezier curves and circular arcs into ordered polylines sampled
//! at uniform parameter steps. Pure functions; the raster fallback renderer
//! is the main consumer.

use crate::Point;

/// Step count used by production callers. Callers drawing very large radii
/// may pass a higher count for smoother output.
pub const DEFAULT_STEPS: u32 = 12;

/// Flatten a quadratic Bezier into `steps + 1` points, endpoints included.
///
/// `B(t) = (1-t)^2 P0 + 2t(1-t) C + t^2 P1`
pub fn quad_bezier(p0: Point, c: Point, p1: Point, steps: u32) -> Vec<Point> {
    let steps = steps.max(1);
    let mut pts = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let mt = 1.0 - t;
        pts.push(Point::new(
            mt * mt * p0.x + 2.0 * t * mt * c.x + t * t * p1.x,
            mt * mt * p0.y + 2.0 * t * mt * c.y + t * t * p1.y,
        ));
    }
    pts
}

/// Flatten a cubic Bezier into `steps + 1` points, endpoints included.
///
/// `B(t) = (1-t)^3 P0 + 3t(1-t)^2 C1 + 3t^2(1-t) C2 + t^3 P1`
pub fn cubic_bezier(p0: Point, c1: Point, c2: Point, p1: Point, steps: u32) -> Vec<Point> {
    let steps = steps.max(1);
    let mut pts = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let mt = 1.0 - t;
        pts.push(Point::new(
            mt * mt * mt * p0.x + 3.0 * t * mt * mt * c1.x + 3.0 * t * t * mt * c2.x + t * t * t * p1.x,
            mt * mt * mt * p0.y + 3.0 * t * mt * mt * c1.y + 3.0 * t * t * mt * c2.y + t * t * t * p1.y,
        ));
    }
    pts
}

/// Flatten a circular arc into `steps + 1` points.
///
/// The angle is sampled linearly between `start_angle` and `end_angle`
/// (radians). The swept magnitude is always `|end_angle - start_angle|`;
/// `clockwise` reverses the traversal direction only. Callers must not
/// negate the angles themselves on top of setting the flag.
pub fn arc(
    center: Point,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    clockwise: bool,
    steps: u32,
) -> Vec<Point> {
    let steps = steps.max(1);
    let sweep = end_angle - start_angle;
    let mut pts = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let t = if clockwise { 1.0 - t } else { t };
        let angle = start_angle + t * sweep;
        pts.push(Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn quad_bezier_endpoints_exact() {
        for steps in [1, 2, 7, 12, 100] {
            let pts = quad_bezier(
                Point::new(-3.0, 2.0),
                Point::new(10.0, 10.0),
                Point::new(5.0, -4.0),
                steps,
            );
            assert_eq!(pts.len(), steps as usize + 1);
            assert_eq!(pts[0], Point::new(-3.0, 2.0));
            assert_eq!(*pts.last().unwrap(), Point::new(5.0, -4.0));
        }
    }

    #[test]
    fn quad_bezier_midpoint() {
        let pts = quad_bezier(
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
            2,
        );
        assert_eq!(pts, vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ]);
    }

    #[test]
    fn cubic_bezier_endpoints_exact() {
        for steps in [1, 3, 12] {
            let pts = cubic_bezier(
                Point::new(0.0, 0.0),
                Point::new(1.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(4.0, 0.0),
                steps,
            );
            assert_eq!(pts.len(), steps as usize + 1);
            assert_eq!(pts[0], Point::new(0.0, 0.0));
            assert_eq!(*pts.last().unwrap(), Point::new(4.0, 0.0));
        }
    }

    #[test]
    fn arc_spans_absolute_angle() {
        let c = Point::new(0.0, 0.0);
        let ccw = arc(c, 1.0, 0.0, PI, false, 4);
        assert_eq!(ccw.len(), 5);
        assert!(close(ccw[0], Point::new(1.0, 0.0)));
        assert!(close(ccw[2], Point::new(0.0, 1.0)));
        assert!(close(ccw[4], Point::new(-1.0, 0.0)));
    }

    #[test]
    fn arc_clockwise_reverses_order_not_span() {
        let c = Point::new(2.0, 3.0);
        let ccw = arc(c, 5.0, 0.3, 2.1, false, 8);
        let cw = arc(c, 5.0, 0.3, 2.1, true, 8);
        assert_eq!(ccw.len(), cw.len());
        for (a, b) in ccw.iter().zip(cw.iter().rev()) {
            assert!(close(*a, *b));
        }
    }

    #[test]
    fn arc_zero_steps_clamped() {
        let pts = arc(Point::ZERO, 1.0, 0.0, PI, false, 0);
        assert_eq!(pts.len(), 2);
    }
}
