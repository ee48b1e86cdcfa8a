mod filter;
mod raw_offset;
mod self_intersect;
mod tip;

use tracing::{debug, trace};

use crate::debug::{emit, Color, DebugSink};
use crate::error::{OperationError, Result};
use crate::geometry::Polygon;
use crate::math::TOLERANCE;
use crate::operations::boolean::assemble::assemble_loops;

pub use tip::{FlatTip, PointyTip, TipDecorator};

/// Grows or shrinks a set of polygons by a fixed distance.
///
/// Counter-clockwise polygons are islands and clockwise polygons are holes.
/// A positive amount grows the islands (and shrinks the holes), a negative
/// amount does the opposite. Islands that touch after growing are merged,
/// and parts that vanish after shrinking are dropped.
pub struct Offset2D<'a> {
    polygons: &'a [Polygon],
    amount: f64,
    tip: &'a dyn TipDecorator,
}

impl<'a> Offset2D<'a> {
    /// Creates a new offset operation with mitered (pointy) corners.
    #[must_use]
    pub fn new(polygons: &'a [Polygon], amount: f64) -> Self {
        Self {
            polygons,
            amount,
            tip: &PointyTip,
        }
    }

    /// Sets the strategy used for the gaps an offset opens at corners.
    #[must_use]
    pub fn tip_decorator(mut self, tip: &'a dyn TipDecorator) -> Self {
        self.tip = tip;
        self
    }

    /// Executes the offset, returning the resulting polygons.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if a polygon has fewer than 3
    /// points, or `OperationError::Inconsistent` if the selected boundary
    /// does not close into loops.
    pub fn execute(&self) -> Result<Vec<Polygon>> {
        self.run(&mut None)
    }

    /// Executes the offset, reporting raw offset points and the boundary
    /// pieces kept or dropped to `sink`.
    ///
    /// # Errors
    ///
    /// See [`Offset2D::execute`].
    pub fn execute_with_debug(&self, sink: &mut dyn DebugSink) -> Result<Vec<Polygon>> {
        self.run(&mut Some(sink))
    }

    fn run(&self, sink: &mut Option<&mut dyn DebugSink>) -> Result<Vec<Polygon>> {
        if let Some(poly) = self.polygons.iter().find(|p| p.len() < 3) {
            return Err(OperationError::InvalidInput(format!(
                "offset needs polygons with at least 3 points, got {}",
                poly.len()
            ))
            .into());
        }

        if self.amount.abs() < TOLERANCE {
            return Ok(self.polygons.to_vec());
        }

        // Step 1: Build the raw offset ring of every polygon.
        let mut rings = Vec::with_capacity(self.polygons.len());
        for poly in self.polygons {
            let ring = raw_offset::build(poly.points(), self.amount, self.tip, sink);
            if ring.len() >= 3 {
                rings.push(ring);
            }
        }
        let has_islands = self.polygons.iter().any(|p| p.signed_area() > 0.0);

        // Step 2: Cut the rings wherever they meet or overlap.
        let pieces = self_intersect::split_at_nodes(&rings);

        // Step 3: Keep the pieces separating covered from uncovered area.
        let sided = filter::side_windings(&rings, &pieces);
        let mut boundary = Vec::new();
        for piece in &sided {
            let mid = piece.start.midpoint(piece.end);
            if let Some(edge) = filter::boundary_edge(piece, has_islands) {
                emit(sink, mid, Color::GREEN, "boundary piece");
                boundary.push(edge);
            } else {
                emit(sink, mid, Color::RED, "inner piece");
            }
        }
        trace!(
            rings = rings.len(),
            pieces = sided.len(),
            boundary = boundary.len(),
            "offset boundary selected"
        );

        // Step 4: Link the boundary into loops.
        let result: Vec<Polygon> = assemble_loops(&boundary)?
            .iter()
            .map(Polygon::simplify)
            .filter(|poly| poly.len() >= 3 && poly.area() > TOLERANCE)
            .collect();

        debug!(
            amount = self.amount,
            inputs = self.polygons.len(),
            outputs = result.len(),
            "offset finished"
        );
        Ok(result)
    }
}

/// Offsets `polygons` by `amount` with mitered corners.
///
/// # Errors
///
/// See [`Offset2D::execute`].
pub fn offset(polygons: &[Polygon], amount: f64) -> Result<Vec<Polygon>> {
    Offset2D::new(polygons, amount).execute()
}
