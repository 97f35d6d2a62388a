//! 2D affine transforms
//!
//! | a c e |
//! | b d f |
//! | 0 0 1 |

use std::f32::consts::PI;

use crate::Point;

/// 2D affine transformation matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub const fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    /// Translation transform
    pub fn translate(tx: f32, ty: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
    }

    /// Scale transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    /// Rotation transform (angle in radians)
    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Rotation in degrees
    pub fn rotate_deg(degrees: f32) -> Self {
        Self::rotate(degrees * PI / 180.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Apply the transform to a point
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Combine: the result applies `self` first, then `other`
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            a: other.a * self.a + other.c * self.b,
            b: other.b * self.a + other.d * self.b,
            c: other.a * self.c + other.c * self.d,
            d: other.b * self.c + other.d * self.d,
            e: other.a * self.e + other.c * self.f + other.e,
            f: other.b * self.e + other.d * self.f + other.f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn identity_leaves_points_alone() {
        let p = Point::new(3.0, -7.5);
        assert_eq!(Transform::identity().apply(p), p);
    }

    #[test]
    fn translate_moves_points() {
        let t = Transform::translate(5.0, -2.0);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(6.0, -1.0));
    }

    #[test]
    fn identity_detection() {
        assert!(Transform::identity().is_identity());
        assert!(Transform::default().is_identity());
        assert!(!Transform::translate(1.0, 0.0).is_identity());
        assert!(!Transform::rotate(0.5).is_identity());
    }

    #[test]
    fn rotate_quarter_turn() {
        let t = Transform::rotate_deg(90.0);
        assert!(close(t.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
    }

    #[test]
    fn then_composes_in_order() {
        let t = Transform::scale(2.0, 2.0).then(&Transform::translate(1.0, 0.0));
        assert_eq!(t.apply(Point::new(3.0, 4.0)), Point::new(7.0, 8.0));
    }
}
