use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use super::{Point2, Vector2, VECTOR_EPSILON};

/// A 2D vector (or point) with tolerant equality.
///
/// Two vectors compare equal when both components differ by less than
/// [`VECTOR_EPSILON`]. Hashing rounds both components to the same grid, so
/// vectors computed independently along the same path can be used as map
/// keys. Values that straddle a rounding boundary may compare equal while
/// hashing differently; callers that need exact identity should reuse the
/// same value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// The zero vector.
pub const VECTOR_NULL: Vector = Vector { x: 0.0, y: 0.0 };

impl Vector {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared length, without the square root.
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the unit vector in the same direction, or `None` for a
    /// (near) zero vector.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len < super::TOLERANCE {
            None
        } else {
            Some(self / len)
        }
    }

    /// Returns a vector with the same direction that is never longer than 1.
    #[must_use]
    pub fn clamp(self) -> Self {
        if self.length() > 1.0 {
            self.normalize().unwrap_or(self)
        } else {
            self
        }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise perpendicular.
    #[must_use]
    pub fn left_normal(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Clockwise perpendicular.
    #[must_use]
    pub fn right_normal(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Converts to an `(x, y)` tuple.
    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Grid cell used for hashing.
    #[allow(clippy::cast_possible_truncation)]
    fn hash_key(self) -> (i64, i64) {
        let scale = 1.0 / VECTOR_EPSILON;
        let quantize = |v: f64| {
            let q = (v * scale).round();
            // Folds -0.0 onto 0.0.
            if q == 0.0 {
                0
            } else {
                q as i64
            }
        };
        (quantize(self.x), quantize(self.y))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < VECTOR_EPSILON && (self.y - other.y).abs() < VECTOR_EPSILON
    }
}

impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    /// # Panics
    ///
    /// Panics if `index` is not 0 or 1.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("invalid vector index {index}: valid indices are 0 and 1"),
        }
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("invalid vector index {index}: valid indices are 0 and 1"),
        }
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for Vector {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for Vector2 {
    fn from(v: Vector) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Point2> for Vector {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vector> for Point2 {
    fn from(v: Vector) -> Self {
        Point2::new(v.x, v.y)
    }
}
