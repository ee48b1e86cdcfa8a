use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::debug::{emit, Color, DebugSink};
use crate::error::{NavigationError, OperationError, Result};
use crate::geometry::Polygon;
use crate::math::intersect_2d::intersect_poly_poly;
use crate::math::polygon_2d::Containment;
use crate::math::{Vector, VECTOR_EPSILON};
use crate::operations::boolean::assemble::PointMerger;
use crate::operations::boolean::{BooleanOp, BooleanOperation};
use crate::operations::decompose::{ConvexDecomposer, TriangulationDecomposer};

use super::cell::{CellId, NavCell, Neighbor, Portal};
use super::distance::{CellDistance, CentroidDistance};
use super::path::{NavPath, PathEndpoint};
use super::table::PathTable;

/// A navigation mesh: convex cells, their adjacency, and precomputed
/// shortest paths between every pair of cells.
///
/// The mesh is immutable once built, so path queries can run from several
/// threads at once.
#[derive(Debug, Clone)]
pub struct NavMesh {
    cells: Vec<NavCell>,
    table: PathTable,
}

impl NavMesh {
    /// Starts configuring a mesh over `boundary`.
    #[must_use]
    pub fn builder(boundary: &Polygon) -> NavMeshBuilder<'_> {
        NavMeshBuilder::new(boundary)
    }

    /// Builds a mesh over `boundary` minus `holes` with the default
    /// decomposer and centroid distances.
    ///
    /// # Errors
    ///
    /// See [`NavMeshBuilder::build`].
    pub fn generate(boundary: &Polygon, holes: &[Polygon]) -> Result<Self> {
        NavMeshBuilder::new(boundary).holes(holes).build()
    }

    /// Builds a mesh from ready-made convex cells.
    ///
    /// Cells sharing an edge (same endpoints, either direction) become
    /// neighbors.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::EmptyMesh` if `polygons` is empty.
    pub fn from_cells(polygons: Vec<Polygon>, distance: &dyn CellDistance) -> Result<Self> {
        Self::assemble(polygons, distance, &mut None)
    }

    fn assemble(
        polygons: Vec<Polygon>,
        distance: &dyn CellDistance,
        sink: &mut Option<&mut dyn DebugSink>,
    ) -> Result<Self> {
        if polygons.is_empty() {
            return Err(NavigationError::EmptyMesh.into());
        }

        let mut cells: Vec<NavCell> = polygons
            .into_iter()
            .enumerate()
            .map(|(i, polygon)| NavCell::new(CellId(i), polygon))
            .collect();

        // Group cells by their undirected edges. Vertices are snapped to one
        // representative first, since the tolerant `Vector` hash can split
        // equal points that straddle a grid line.
        let mut merger = PointMerger::new(VECTOR_EPSILON);
        let mut by_edge: HashMap<(Vector, Vector), Vec<usize>> = HashMap::new();
        for (i, cell) in cells.iter().enumerate() {
            for (a, b) in cell.polygon.edges() {
                let (ia, ib) = (merger.get_or_insert(a), merger.get_or_insert(b));
                let (a, b) = (merger.point(ia), merger.point(ib));
                by_edge.entry(edge_key(a, b)).or_default().push(i);
            }
        }

        let mut links = Vec::new();
        for (&(start, end), owners) in &by_edge {
            for (k, &i) in owners.iter().enumerate() {
                for &j in &owners[k + 1..] {
                    if i != j {
                        links.push((i, j, Portal { start, end }));
                    }
                }
            }
        }
        // HashMap order is arbitrary; link in a fixed order.
        links.sort_by_key(|&(i, j, _)| (i, j));

        for (i, j, portal) in links {
            let d = distance.distance(&cells[i].polygon, &cells[j].polygon);
            cells[i].link(Neighbor {
                cell: CellId(j),
                distance: d,
                portal,
            });
            cells[j].link(Neighbor {
                cell: CellId(i),
                distance: d,
                portal,
            });
        }

        for cell in &cells {
            emit(sink, cell.polygon.centroid(), Color::BLUE, "cell");
            for neighbor in &cell.neighbors {
                emit(sink, neighbor.portal.midpoint(), Color::YELLOW, "portal");
            }
        }

        let table = PathTable::build(&cells);
        debug!(
            cells = cells.len(),
            links = cells.iter().map(|c| c.neighbors.len()).sum::<usize>() / 2,
            "navigation mesh built"
        );
        Ok(Self { cells, table })
    }

    /// All cells, indexed by [`CellId::index`].
    #[must_use]
    pub fn cells(&self) -> &[NavCell] {
        &self.cells
    }

    /// The cell with the given id, if it belongs to this mesh.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&NavCell> {
        self.cells.get(id.0)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the mesh has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The first cell containing `point` (border included).
    #[must_use]
    pub fn cell_at(&self, point: Vector) -> Option<CellId> {
        self.cells
            .iter()
            .find(|cell| cell.contains_point(point))
            .map(NavCell::id)
    }

    /// Shortest distance between two cells, or `None` if unreachable.
    #[must_use]
    pub fn distance(&self, from: CellId, to: CellId) -> Option<f64> {
        self.table.distance(from.0, to.0)
    }

    fn resolve(&self, endpoint: PathEndpoint) -> Option<CellId> {
        match endpoint {
            PathEndpoint::Cell(id) => self.cell(id).map(NavCell::id),
            PathEndpoint::Point(p) => self.cell_at(p),
        }
    }

    /// Shortest path between two cells or points.
    ///
    /// Returns `None` if an endpoint lies outside the mesh or the two cells
    /// are not connected.
    #[must_use]
    pub fn get_path(
        &self,
        start: impl Into<PathEndpoint>,
        goal: impl Into<PathEndpoint>,
    ) -> Option<NavPath> {
        let from = self.resolve(start.into())?;
        let to = self.resolve(goal.into())?;
        let distance = self.distance(from, to)?;
        let route = self.table.route(from.0, to.0)?;

        let mut portals = Vec::with_capacity(route.len().saturating_sub(1));
        for pair in route.windows(2) {
            portals.push(self.cells[pair[0]].neighbor(CellId(pair[1]))?.portal);
        }
        let polygons = route.iter().map(|&i| self.cells[i].polygon.clone()).collect();
        let cells = route.into_iter().map(CellId).collect();

        trace!(%from, %to, distance, "path found");
        Some(NavPath::new(cells, polygons, portals, distance))
    }
}

/// Undirected edge key: lexicographically smaller endpoint first.
fn edge_key(a: Vector, b: Vector) -> (Vector, Vector) {
    match a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

/// Configures and builds a [`NavMesh`].
pub struct NavMeshBuilder<'a> {
    boundary: &'a Polygon,
    holes: Vec<Polygon>,
    decomposer: Option<&'a dyn ConvexDecomposer>,
    distance: Option<&'a dyn CellDistance>,
}

impl<'a> NavMeshBuilder<'a> {
    /// Creates a builder with no holes and the default collaborators.
    #[must_use]
    pub fn new(boundary: &'a Polygon) -> Self {
        Self {
            boundary,
            holes: Vec::new(),
            decomposer: None,
            distance: None,
        }
    }

    /// Adds an obstacle. Obstacles inside the boundary become holes; those
    /// crossing it are cut out of the boundary.
    #[must_use]
    pub fn hole(mut self, hole: &Polygon) -> Self {
        self.holes.push(hole.clone());
        self
    }

    /// Adds several obstacles, see [`NavMeshBuilder::hole`].
    #[must_use]
    pub fn holes(mut self, holes: &[Polygon]) -> Self {
        self.holes.extend_from_slice(holes);
        self
    }

    /// Replaces the default [`TriangulationDecomposer`].
    #[must_use]
    pub fn decomposer(mut self, decomposer: &'a dyn ConvexDecomposer) -> Self {
        self.decomposer = Some(decomposer);
        self
    }

    /// Replaces the default [`CentroidDistance`].
    #[must_use]
    pub fn distance(mut self, distance: &'a dyn CellDistance) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Builds the mesh.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the boundary or a hole has
    /// fewer than 3 points, the decomposer's error if decomposition fails,
    /// and `NavigationError::EmptyMesh` if no cell remains.
    pub fn build(&self) -> Result<NavMesh> {
        self.run(&mut None)
    }

    /// Builds the mesh, reporting cell centers and portals to `sink`.
    ///
    /// # Errors
    ///
    /// See [`NavMeshBuilder::build`].
    pub fn build_with_debug(&self, sink: &mut dyn DebugSink) -> Result<NavMesh> {
        self.run(&mut Some(sink))
    }

    fn run(&self, sink: &mut Option<&mut dyn DebugSink>) -> Result<NavMesh> {
        if self.boundary.len() < 3 || self.holes.iter().any(|h| h.len() < 3) {
            return Err(OperationError::InvalidInput(
                "navigation boundary and holes need at least 3 points".into(),
            )
            .into());
        }

        let default_decomposer = TriangulationDecomposer::new();
        let decomposer = self.decomposer.unwrap_or(&default_decomposer);
        let distance = self.distance.unwrap_or(&CentroidDistance);

        // Step 1: Merge obstacles that overlap or touch each other.
        let obstacles = merge_obstacles(&self.holes)?;

        // Step 2: Cut crossing obstacles out of the boundary, keep the rest
        // as holes of the region containing them.
        let mut regions = vec![self.boundary.clone_ccw()];
        let mut inner_holes = Vec::new();
        for hole in &obstacles {
            if crosses_any(hole, &regions) {
                let mut cut = Vec::with_capacity(regions.len());
                for region in &regions {
                    let pieces = BooleanOperation::new(region, hole, BooleanOp::Difference).execute()?;
                    cut.extend(pieces.into_iter().filter(|p| !p.is_clockwise()));
                }
                regions = cut;
            } else {
                inner_holes.push(hole.clone_cw());
            }
        }

        // Step 3: Decompose every region with the holes it contains.
        let mut polygons = Vec::new();
        for region in &regions {
            let holes: Vec<Polygon> = inner_holes
                .iter()
                .filter(|h| region.contains_point(h[0]) == Containment::Inside)
                .cloned()
                .collect();
            polygons.extend(decomposer.decompose(region, &holes)?);
        }
        trace!(
            regions = regions.len(),
            holes = inner_holes.len(),
            cells = polygons.len(),
            "navigation region decomposed"
        );

        // Step 4: Link cells and precompute paths.
        NavMesh::assemble(polygons, distance, sink)
    }
}

/// Replaces every group of overlapping obstacles by the outline of their
/// union. Free space fully enclosed by a group is dropped with it.
fn merge_obstacles(holes: &[Polygon]) -> Result<Vec<Polygon>> {
    let mut merged: Vec<Polygon> = Vec::with_capacity(holes.len());
    for hole in holes {
        let mut current = hole.clone_ccw();
        let mut k = 0;
        while k < merged.len() {
            if !overlaps(&current, &merged[k]) {
                k += 1;
                continue;
            }
            let other = merged.swap_remove(k);
            let union = BooleanOperation::new(&current, &other, BooleanOp::Union).execute()?;
            if let Some(outline) = union
                .into_iter()
                .filter(|p| !p.is_clockwise())
                .max_by(|a, b| a.area().total_cmp(&b.area()))
            {
                current = outline;
            }
            // The grown outline may now reach obstacles already passed.
            k = 0;
        }
        merged.push(current);
    }
    Ok(merged)
}

/// Whether two simple polygons share any point.
fn overlaps(a: &Polygon, b: &Polygon) -> bool {
    !intersect_poly_poly(a.points(), b.points()).is_empty()
        || a.contains_point(b[0]) != Containment::Outside
        || b.contains_point(a[0]) != Containment::Outside
}

/// Whether `hole` is not strictly inside one of `regions`.
fn crosses_any(hole: &Polygon, regions: &[Polygon]) -> bool {
    !regions.iter().any(|region| {
        hole.iter().all(|&p| region.contains_point(p) == Containment::Inside)
            && intersect_poly_poly(region.points(), hole.points()).is_empty()
    })
}
