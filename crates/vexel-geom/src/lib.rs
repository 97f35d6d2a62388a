//! vexel-geom - Value Geometry
//!
//! Points, rectangles, affine transforms and the polyline approximators
//! used by the raster fallback path.

pub mod approx;
mod transform;

pub use transform::Transform;

/// A point in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanning two corner points
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Accumulates a bounding box over an arbitrary point stream.
///
/// Yields `Rect::EMPTY` when no point was recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsAccumulator {
    min: Option<(f32, f32)>,
    max: Option<(f32, f32)>,
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, p: Point) {
        match (&mut self.min, &mut self.max) {
            (Some(min), Some(max)) => {
                min.0 = min.0.min(p.x);
                min.1 = min.1.min(p.y);
                max.0 = max.0.max(p.x);
                max.1 = max.1.max(p.y);
            }
            _ => {
                self.min = Some((p.x, p.y));
                self.max = Some((p.x, p.y));
            }
        }
    }

    pub fn finish(&self) -> Rect {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Rect::new(min.0, min.1, max.0 - min.0, max.1 - min.1),
            _ => Rect::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(10.0, 2.0), Point::new(4.0, 8.0));
        assert_eq!(r, Rect::new(4.0, 2.0, 6.0, 6.0));
    }

    #[test]
    fn bounds_accumulator_empty() {
        assert_eq!(BoundsAccumulator::new().finish(), Rect::EMPTY);
    }

    #[test]
    fn bounds_accumulator_covers_points() {
        let mut acc = BoundsAccumulator::new();
        acc.add(Point::new(1.0, 5.0));
        acc.add(Point::new(-2.0, 3.0));
        acc.add(Point::new(4.0, -1.0));
        assert_eq!(acc.finish(), Rect::new(-2.0, -1.0, 6.0, 6.0));
    }
}
