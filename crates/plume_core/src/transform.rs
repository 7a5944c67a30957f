//! 2D affine transforms

use crate::geometry::{Point, Rect};

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Rotation by `angle` radians (clockwise in y-down screen space)
    pub fn rotate(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Concatenate (self * other): the result first applies `other`, then `self`.
    pub fn then(&self, other: &Transform2D) -> Transform2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;
        Transform2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Apply this transform around `pivot` instead of the origin
    pub fn about(&self, pivot: Point) -> Transform2D {
        Transform2D::translate(pivot.x, pivot.y)
            .then(self)
            .then(&Transform2D::translate(-pivot.x, -pivot.y))
    }

    /// Inverse transform, or `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Transform2D> {
        let [a, b, c, d, tx, ty] = self.elements;
        let det = a * d - b * c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Transform2D {
            elements: [
                d * inv,
                -b * inv,
                -c * inv,
                a * inv,
                (c * ty - d * tx) * inv,
                (b * tx - a * ty) * inv,
            ],
        })
    }

    /// Corner points of `rect` after transformation (tl, tr, br, bl)
    pub fn transform_rect_corners(&self, rect: &Rect) -> [Point; 4] {
        [
            self.transform_point(rect.origin),
            self.transform_point(Point::new(rect.max_x(), rect.y())),
            self.transform_point(Point::new(rect.max_x(), rect.max_y())),
            self.transform_point(Point::new(rect.x(), rect.max_y())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_about_pivot_keeps_pivot_fixed() {
        let pivot = Point::new(50.0, 20.0);
        let t = Transform2D::rotate(std::f32::consts::FRAC_PI_2).about(pivot);
        assert!(close(t.transform_point(pivot), pivot));
        assert!(close(
            t.transform_point(Point::new(60.0, 20.0)),
            Point::new(50.0, 30.0)
        ));
    }

    #[test]
    fn test_inverse_round_trips() {
        let t = Transform2D::translate(10.0, -4.0).then(&Transform2D::scale(2.0, 3.0));
        let inv = t.inverse().unwrap();
        let p = Point::new(7.0, 9.0);
        assert!(close(inv.transform_point(t.transform_point(p)), p));
        assert!(Transform2D::scale(0.0, 1.0).inverse().is_none());
    }
}
