use std::ops::Mul;

use super::{Matrix3, Vector};
use crate::geometry::Polygon;

/// A 2D affine transform stored as a 3x3 homogeneous matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix3,
}

impl Transform {
    /// Wraps a raw 3x3 matrix.
    #[must_use]
    pub fn new(matrix: Matrix3) -> Self {
        Self { matrix }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    /// Translation by `(dx, dy)`.
    #[must_use]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(Matrix3::new(1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0))
    }

    /// Scaling about the origin.
    #[must_use]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
    }

    /// Counter-clockwise rotation about the origin by `angle` radians.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0))
    }

    /// The underlying homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Applies the transform to a point (homogeneous multiply).
    #[must_use]
    pub fn apply(&self, point: Vector) -> Vector {
        let v = self.matrix * nalgebra::Vector3::new(point.x, point.y, 1.0);
        if (v.z - 1.0).abs() > f64::EPSILON && v.z.abs() > f64::EPSILON {
            Vector::new(v.x / v.z, v.y / v.z)
        } else {
            Vector::new(v.x, v.y)
        }
    }

    /// Applies the transform to every point of a polygon, returning a new one.
    #[must_use]
    pub fn apply_polygon(&self, polygon: &Polygon) -> Polygon {
        polygon.iter().map(|&p| self.apply(p)).collect()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `a * b` applies `b` first, then `a`.
impl Mul for Transform {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.matrix * rhs.matrix)
    }
}
