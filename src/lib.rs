//! 2D polygon toolkit: boolean operations, offsetting, convex decomposition
//! and navigation meshes.

pub mod debug;
pub mod error;
pub mod geometry;
pub mod math;
pub mod navigation;
pub mod operations;

pub use debug::{Color, DebugSink, TracingSink};
pub use error::{GeometryError, NavigationError, OperationError, PolynavError, Result};
pub use geometry::Polygon;
pub use math::polygon_2d::Containment;
pub use math::{Transform, Vector};
pub use navigation::{CellId, NavMesh, NavPath};
