//! Symbolic path recording
//!
//! Every builder call appends a backend-independent segment; when the path
//! was created by a native-capable context the same call is mirrored into
//! a retained native path. The symbolic recording is the source of truth:
//! it survives transforms, appends and replays even when no native path
//! exists.

use vexel_geom::{BoundsAccumulator, Point, Rect, Transform};
use vexel_raster::FillRule;

use crate::backend::NativePath;
use crate::flatten;
use crate::segment::PathSegment;

#[derive(Debug, Clone, Default)]
pub struct SymbolicPath {
    segments: Vec<PathSegment>,
    native: Option<NativePath>,
}

impl SymbolicPath {
    /// Tracking-only path with no native mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path that mirrors every call into a retained native path.
    pub(crate) fn with_native() -> Self {
        Self { segments: Vec::new(), native: Some(NativePath::new()) }
    }

    /// Whether a native mirror is attached. Raster-only contexts hand out
    /// paths without one; drawing still works through the fallback
    /// renderer.
    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    pub(crate) fn native(&self) -> Option<&NativePath> {
        self.native.as_ref()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, seg: PathSegment) {
        self.segments.push(seg);
    }

    pub fn move_to(&mut self, p: Point) {
        if let Some(native) = &mut self.native {
            native.move_to(p);
        }
        self.push(PathSegment::move_to(p));
    }

    pub fn line_to(&mut self, p: Point) {
        if let Some(native) = &mut self.native {
            native.line_to(p);
        }
        self.push(PathSegment::line_to(p));
    }

    pub fn quad_curve_to(&mut self, ctrl: Point, end: Point) {
        if let Some(native) = &mut self.native {
            native.quad_curve_to(ctrl, end);
        }
        self.push(PathSegment::quad_curve_to(ctrl, end));
    }

    pub fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        if let Some(native) = &mut self.native {
            native.curve_to(c1, c2, end);
        }
        self.push(PathSegment::curve_to(c1, c2, end));
    }

    pub fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, clockwise: bool) {
        if let Some(native) = &mut self.native {
            native.arc(center, radius, start, end, clockwise);
        }
        self.push(PathSegment::arc(center, radius, start, end, clockwise));
    }

    /// Records the tangent-construction points as-is; consumers fall back
    /// to a straight-line interpretation.
    pub fn arc_to(&mut self, p1: Point, p2: Point, radius: f32) {
        if let Some(native) = &mut self.native {
            native.arc_to(p1, p2, radius);
        }
        self.push(PathSegment::arc_to(p1, p2, radius));
    }

    pub fn add_rectangle(&mut self, rect: Rect) {
        if let Some(native) = &mut self.native {
            native.rectangle(rect);
        }
        self.push(PathSegment::rectangle(rect));
    }

    pub fn add_rounded_rectangle(&mut self, rect: Rect, radius: f32) {
        if let Some(native) = &mut self.native {
            native.rounded_rectangle(rect, radius);
        }
        self.push(PathSegment::rounded_rectangle(rect, radius));
    }

    pub fn add_circle(&mut self, center: Point, radius: f32) {
        if let Some(native) = &mut self.native {
            native.circle(center, radius);
        }
        self.push(PathSegment::circle(center, radius));
    }

    pub fn add_ellipse(&mut self, rect: Rect) {
        if let Some(native) = &mut self.native {
            native.ellipse(rect);
        }
        self.push(PathSegment::ellipse(rect));
    }

    pub fn close(&mut self) {
        if let Some(native) = &mut self.native {
            native.close();
        }
        self.push(PathSegment::close());
    }

    /// Concatenate another recording onto this one. The appended segments
    /// are replayed into this path's native mirror when present, so the
    /// merge holds at both levels.
    pub fn append(&mut self, other: &SymbolicPath) {
        if let Some(native) = &mut self.native {
            for seg in other.segments() {
                native.replay(seg);
            }
        }
        self.segments.extend_from_slice(other.segments());
    }

    /// Transform every recorded point in place. The native mirror is
    /// rebuilt from the transformed recording so both representations stay
    /// geometrically consistent.
    pub fn transform(&mut self, t: &Transform) {
        if t.is_identity() {
            return;
        }
        for seg in &mut self.segments {
            for p in &mut seg.points {
                *p = t.apply(*p);
            }
        }
        if self.native.is_some() {
            self.native = Some(NativePath::rebuild(&self.segments));
        }
    }

    /// Axis-aligned box covering the recorded geometry. Defers to the
    /// native path when one exists; otherwise accumulates the recorded
    /// points, widening circle-form segments by their radius.
    pub fn bounding_box(&self) -> Rect {
        if let Some(native) = &self.native {
            if let Some(bounds) = native.bounds() {
                return bounds;
            }
        }
        let mut acc = BoundsAccumulator::new();
        for seg in &self.segments {
            for p in &seg.points {
                acc.add(*p);
            }
            if seg.is_circle_form() {
                let c = seg.points[0];
                acc.add(Point::new(c.x - seg.radius, c.y - seg.radius));
                acc.add(Point::new(c.x + seg.radius, c.y + seg.radius));
            }
        }
        acc.finish()
    }

    /// Last recorded point, or the origin for an empty recording (and for
    /// a trailing Close, which carries no points).
    pub fn current_point(&self) -> Point {
        self.segments
            .last()
            .and_then(|seg| seg.points.last())
            .copied()
            .unwrap_or(Point::ZERO)
    }

    /// Point-in-path test on the symbolic recording: segments are
    /// flattened to polygon loops and tested under the given fill rule.
    /// Works identically with or without a native mirror.
    pub fn contains(&self, p: Point, rule: FillRule) -> bool {
        flatten::contains(&self.segments, p, rule)
    }
}
