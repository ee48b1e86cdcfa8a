use slotmap::SlotMap;

use crate::error::{OperationError, Result};
use crate::math::polygon_2d::{contains_point, Containment};
use crate::math::Vector;

slotmap::new_key_type! {
    /// Identifier of a vertex inside a [`Ring`].
    pub struct RingVertexId;
}

/// A vertex of an extended ring, tagged against the other polygon.
#[derive(Debug, Clone, Copy)]
pub struct RingVertex {
    pub point: Vector,
    pub tag: Containment,
    next: RingVertexId,
}

/// Closed vertex ring of one boolean operand.
///
/// Vertices live in an arena and link to their successor, so intersection
/// points can be spliced into an edge without shifting the others. Edge `i`
/// always starts at the `i`-th original corner.
#[derive(Debug, Default)]
pub struct Ring {
    vertices: SlotMap<RingVertexId, RingVertex>,
    corners: Vec<RingVertexId>,
}

impl Ring {
    /// Builds the ring of `points`, tagging each corner against `other`.
    #[must_use]
    pub fn build(points: &[Vector], other: &[Vector]) -> Self {
        let mut vertices = SlotMap::with_key();
        let corners: Vec<RingVertexId> = points
            .iter()
            .map(|&point| {
                vertices.insert(RingVertex {
                    point,
                    tag: contains_point(other, point),
                    next: RingVertexId::default(),
                })
            })
            .collect();

        let n = corners.len();
        for (i, &id) in corners.iter().enumerate() {
            if let Some(v) = vertices.get_mut(id) {
                v.next = corners[(i + 1) % n];
            }
        }

        Self { vertices, corners }
    }

    fn vertex(&self, id: RingVertexId) -> Result<&RingVertex> {
        self.vertices
            .get(id)
            .ok_or_else(|| OperationError::Inconsistent("ring vertex not found".into()).into())
    }

    fn vertex_mut(&mut self, id: RingVertexId) -> Result<&mut RingVertex> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| OperationError::Inconsistent("ring vertex not found".into()).into())
    }

    fn corner(&self, index: usize) -> Result<RingVertexId> {
        self.corners.get(index).copied().ok_or_else(|| {
            OperationError::Inconsistent(format!("ring has no corner {index}")).into()
        })
    }

    /// Splices boundary points into edge `edge`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Inconsistent` if the edge does not exist or
    /// was already split.
    pub fn insert_on_edge(&mut self, edge: usize, points: &[Vector]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let start = self.corner(edge)?;
        let end = self.corner((edge + 1) % self.corners.len())?;
        if self.vertex(start)?.next != end {
            return Err(OperationError::Inconsistent(format!(
                "edge {edge} was already split"
            ))
            .into());
        }

        let mut prev = start;
        for &point in points {
            let id = self.vertices.insert(RingVertex {
                point,
                tag: Containment::Boundary,
                next: end,
            });
            self.vertex_mut(prev)?.next = id;
            prev = id;
        }
        Ok(())
    }

    /// Returns every edge of the extended ring as `(start, end)`, in ring order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Inconsistent` if the links do not form a
    /// single cycle through all vertices.
    pub fn edges(&self) -> Result<Vec<(RingVertex, RingVertex)>> {
        let Some(&first) = self.corners.first() else {
            return Ok(Vec::new());
        };
        let mut edges = Vec::with_capacity(self.vertices.len());
        let mut current = first;
        loop {
            let v = *self.vertex(current)?;
            let w = *self.vertex(v.next)?;
            edges.push((v, w));
            current = v.next;
            if current == first {
                break;
            }
            if edges.len() > self.vertices.len() {
                return Err(OperationError::Inconsistent("ring links do not close".into()).into());
            }
        }
        if edges.len() != self.vertices.len() {
            return Err(OperationError::Inconsistent(format!(
                "ring visits {} of {} vertices",
                edges.len(),
                self.vertices.len()
            ))
            .into());
        }
        Ok(edges)
    }
}
