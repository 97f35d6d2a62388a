//! Symbolic path segments
//!
//! Backend-independent recording of path operations. The segment kind
//! decides which of the carried fields are meaningful; the rest stay at
//! their defaults and consumers must ignore them.

use vexel_geom::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    QuadCurveTo,
    CurveTo,
    Arc,
    ArcTo,
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Close,
}

/// One recorded path operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub points: Vec<Point>,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl PathSegment {
    fn base(kind: SegmentKind, points: Vec<Point>) -> Self {
        Self {
            kind,
            points,
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
            clockwise: false,
        }
    }

    pub fn move_to(p: Point) -> Self {
        Self::base(SegmentKind::MoveTo, vec![p])
    }

    pub fn line_to(p: Point) -> Self {
        Self::base(SegmentKind::LineTo, vec![p])
    }

    pub fn quad_curve_to(ctrl: Point, end: Point) -> Self {
        Self::base(SegmentKind::QuadCurveTo, vec![ctrl, end])
    }

    pub fn curve_to(c1: Point, c2: Point, end: Point) -> Self {
        Self::base(SegmentKind::CurveTo, vec![c1, c2, end])
    }

    pub fn arc(center: Point, radius: f32, start_angle: f32, end_angle: f32, clockwise: bool) -> Self {
        let mut seg = Self::base(SegmentKind::Arc, vec![center]);
        seg.radius = radius;
        seg.start_angle = start_angle;
        seg.end_angle = end_angle;
        seg.clockwise = clockwise;
        seg
    }

    /// Stores the two tangent-construction points and the radius without
    /// resolving the tangent arc.
    pub fn arc_to(p1: Point, p2: Point, radius: f32) -> Self {
        let mut seg = Self::base(SegmentKind::ArcTo, vec![p1, p2]);
        seg.radius = radius;
        seg
    }

    /// Rectangle stored as its two opposite corners.
    pub fn rectangle(rect: Rect) -> Self {
        Self::base(SegmentKind::Rectangle, vec![rect.top_left(), rect.bottom_right()])
    }

    pub fn rounded_rectangle(rect: Rect, radius: f32) -> Self {
        let mut seg = Self::base(
            SegmentKind::RoundedRectangle,
            vec![rect.top_left(), rect.bottom_right()],
        );
        seg.radius = radius;
        seg
    }

    /// Circle form: center point plus radius.
    pub fn circle(center: Point, radius: f32) -> Self {
        let mut seg = Self::base(SegmentKind::Ellipse, vec![center]);
        seg.radius = radius;
        seg
    }

    /// Box form: ellipse inscribed in the rect stored as two corners.
    pub fn ellipse(rect: Rect) -> Self {
        Self::base(SegmentKind::Ellipse, vec![rect.top_left(), rect.bottom_right()])
    }

    pub fn close() -> Self {
        Self::base(SegmentKind::Close, Vec::new())
    }

    /// Minimum point count a consumer may rely on for this kind. Segments
    /// falling short are malformed and must be skipped, not indexed.
    pub fn min_points(kind: SegmentKind) -> usize {
        match kind {
            SegmentKind::MoveTo | SegmentKind::LineTo | SegmentKind::Arc => 1,
            SegmentKind::QuadCurveTo | SegmentKind::ArcTo => 2,
            SegmentKind::CurveTo => 3,
            SegmentKind::Rectangle | SegmentKind::RoundedRectangle => 2,
            SegmentKind::Ellipse => 1,
            SegmentKind::Close => 0,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.points.len() >= Self::min_points(self.kind)
    }

    /// Circle-form ellipse (center + radius) as opposed to box form.
    pub fn is_circle_form(&self) -> bool {
        self.kind == SegmentKind::Ellipse && self.points.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_fields_stay_default() {
        let seg = PathSegment::line_to(Point::new(1.0, 2.0));
        assert_eq!(seg.radius, 0.0);
        assert_eq!(seg.start_angle, 0.0);
        assert!(!seg.clockwise);
    }

    #[test]
    fn arc_carries_angles_and_direction() {
        let seg = PathSegment::arc(Point::ZERO, 4.0, 0.5, 2.5, true);
        assert_eq!(seg.kind, SegmentKind::Arc);
        assert_eq!(seg.radius, 4.0);
        assert_eq!(seg.start_angle, 0.5);
        assert_eq!(seg.end_angle, 2.5);
        assert!(seg.clockwise);
    }

    #[test]
    fn circle_and_box_ellipse_forms() {
        let circle = PathSegment::circle(Point::new(3.0, 3.0), 2.0);
        assert!(circle.is_circle_form());
        let boxed = PathSegment::ellipse(Rect::new(0.0, 0.0, 4.0, 2.0));
        assert!(!boxed.is_circle_form());
        assert_eq!(boxed.points[1], Point::new(4.0, 2.0));
    }

    #[test]
    fn malformed_segments_detected() {
        let mut seg = PathSegment::curve_to(Point::ZERO, Point::ZERO, Point::ZERO);
        assert!(seg.is_well_formed());
        seg.points.truncate(1);
        assert!(!seg.is_well_formed());
    }
}
