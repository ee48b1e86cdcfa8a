use std::fmt;

use crate::geometry::Polygon;
use crate::math::polygon_2d::Containment;
use crate::math::Vector;

/// Index of a cell inside its [`NavMesh`](super::NavMesh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// Position of the cell in [`NavMesh::cells`](super::NavMesh::cells).
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// The edge two neighboring cells share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub start: Vector,
    pub end: Vector,
}

impl Portal {
    /// Middle of the shared edge.
    #[must_use]
    pub fn midpoint(&self) -> Vector {
        self.start.midpoint(self.end)
    }

    /// Length of the shared edge.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Smallest portal covering both collinear pieces.
    pub(crate) fn extended(self, other: Portal) -> Portal {
        let ends = [self.start, self.end, other.start, other.end];
        let mut best = self;
        for (i, &a) in ends.iter().enumerate() {
            for &b in &ends[i + 1..] {
                let candidate = Portal { start: a, end: b };
                if candidate.length() > best.length() {
                    best = candidate;
                }
            }
        }
        best
    }
}

/// A link from one cell to an adjacent cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub cell: CellId,
    pub distance: f64,
    pub portal: Portal,
}

/// A convex, traversable region of a navigation mesh.
#[derive(Debug, Clone)]
pub struct NavCell {
    pub(crate) id: CellId,
    pub(crate) polygon: Polygon,
    pub(crate) neighbors: Vec<Neighbor>,
}

impl NavCell {
    pub(crate) fn new(id: CellId, polygon: Polygon) -> Self {
        Self {
            id,
            polygon,
            neighbors: Vec::new(),
        }
    }

    /// This cell's id.
    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// The convex outline of the cell.
    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Links to adjacent cells.
    #[must_use]
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// The link to `other`, if the two cells are adjacent.
    #[must_use]
    pub fn neighbor(&self, other: CellId) -> Option<&Neighbor> {
        self.neighbors.iter().find(|n| n.cell == other)
    }

    /// Whether `p` lies inside the cell or on its border.
    #[must_use]
    pub fn contains_point(&self, p: Vector) -> bool {
        self.polygon.contains_point(p) != Containment::Outside
    }

    /// Adds the link, or widens its portal if the cells were already linked
    /// through a collinear edge piece.
    pub(crate) fn link(&mut self, neighbor: Neighbor) {
        if let Some(existing) = self.neighbors.iter_mut().find(|n| n.cell == neighbor.cell) {
            existing.portal = existing.portal.extended(neighbor.portal);
        } else {
            self.neighbors.push(neighbor);
        }
    }
}
