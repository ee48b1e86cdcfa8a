pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
mod transform;
mod vector;

pub use transform::Transform;
pub use vector::{Vector, VECTOR_NULL};

/// 2D point type used at the `nalgebra` boundary.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type used at the `nalgebra` boundary.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous transformation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Tolerance for vector equality, hashing and boundary membership.
pub const VECTOR_EPSILON: f64 = 1e-4;

/// Tolerance for length and area degeneracy guards.
pub const TOLERANCE: f64 = 1e-9;
