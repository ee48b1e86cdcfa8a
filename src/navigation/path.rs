use crate::geometry::Polygon;
use crate::math::polygon_2d::Containment;
use crate::math::Vector;

use super::cell::{CellId, Portal};

/// One end of a path query: a cell, or a point resolved to its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEndpoint {
    Cell(CellId),
    Point(Vector),
}

impl From<CellId> for PathEndpoint {
    fn from(id: CellId) -> Self {
        Self::Cell(id)
    }
}

impl From<Vector> for PathEndpoint {
    fn from(point: Vector) -> Self {
        Self::Point(point)
    }
}

impl From<(f64, f64)> for PathEndpoint {
    fn from(point: (f64, f64)) -> Self {
        Self::Point(point.into())
    }
}

/// A shortest route through the cells of a navigation mesh.
///
/// `portals[i]` is the edge crossed when moving from `cells[i]` to
/// `cells[i + 1]`.
#[derive(Debug, Clone)]
pub struct NavPath {
    cells: Vec<CellId>,
    polygons: Vec<Polygon>,
    portals: Vec<Portal>,
    distance: f64,
}

impl NavPath {
    pub(crate) fn new(
        cells: Vec<CellId>,
        polygons: Vec<Polygon>,
        portals: Vec<Portal>,
        distance: f64,
    ) -> Self {
        Self {
            cells,
            polygons,
            portals,
            distance,
        }
    }

    /// Cell ids from start to goal.
    #[must_use]
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Copies of the cell polygons, in path order.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Edges crossed between consecutive cells.
    #[must_use]
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Total cost according to the mesh's distance function.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of cells on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Next point to steer towards when walking from `position` to `goal`.
    ///
    /// Uses the furthest path cell containing `position`: from any cell but
    /// the last, the walker heads for the middle of the portal into the next
    /// cell; in the last cell it heads straight for `goal`. A position off the
    /// path steers to the first portal.
    #[must_use]
    pub fn next_move_to(&self, position: Vector, goal: Vector) -> Vector {
        let current = self
            .polygons
            .iter()
            .rposition(|poly| poly.contains_point(position) != Containment::Outside);

        match current {
            Some(i) => self.portals.get(i).map_or(goal, Portal::midpoint),
            None => self.portals.first().map_or(goal, Portal::midpoint),
        }
    }
}
