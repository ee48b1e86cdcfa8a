//! Convex decomposition of a polygon with holes.

mod merge;
mod triangulate;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Polygon;

pub use merge::merge_convex;
pub use triangulate::triangulate;

/// Splits a region into convex cells.
pub trait ConvexDecomposer {
    /// Decomposes `boundary` minus `holes` into simple convex polygons that
    /// cover the region without overlapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be decomposed.
    fn decompose(&self, boundary: &Polygon, holes: &[Polygon]) -> Result<Vec<Polygon>>;
}

impl<F> ConvexDecomposer for F
where
    F: Fn(&Polygon, &[Polygon]) -> Result<Vec<Polygon>>,
{
    fn decompose(&self, boundary: &Polygon, holes: &[Polygon]) -> Result<Vec<Polygon>> {
        self(boundary, holes)
    }
}

/// Constrained Delaunay triangulation followed by convex merging.
///
/// With merging disabled every cell is a triangle.
#[derive(Debug, Clone, Copy)]
pub struct TriangulationDecomposer {
    merge: bool,
}

impl TriangulationDecomposer {
    /// Creates a decomposer that merges triangles into larger convex cells.
    #[must_use]
    pub fn new() -> Self {
        Self { merge: true }
    }

    /// Keeps the raw triangles instead of merging them into larger cells.
    #[must_use]
    pub fn without_merging(mut self) -> Self {
        self.merge = false;
        self
    }
}

impl Default for TriangulationDecomposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexDecomposer for TriangulationDecomposer {
    fn decompose(&self, boundary: &Polygon, holes: &[Polygon]) -> Result<Vec<Polygon>> {
        if boundary.len() < 3 {
            return Err(OperationError::InvalidInput(format!(
                "decomposition boundary needs at least 3 points, got {}",
                boundary.len()
            ))
            .into());
        }

        let triangles = triangulate(boundary, holes)?;
        let triangle_count = triangles.len();
        let cells = if self.merge {
            merge_convex(triangles)
        } else {
            triangles
        };

        debug!(
            holes = holes.len(),
            triangles = triangle_count,
            cells = cells.len(),
            "convex decomposition finished"
        );
        Ok(cells)
    }
}
