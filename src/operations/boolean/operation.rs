use crate::debug::DebugSink;
use crate::error::Result;
use crate::geometry::Polygon;

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Computes a boolean combination of two simple polygons.
///
/// The result is a list of closed polygons. Difference and union results can
/// contain loops of opposite winding, which describe holes.
pub struct BooleanOperation<'a> {
    a: &'a Polygon,
    b: &'a Polygon,
    op: BooleanOp,
}

impl<'a> BooleanOperation<'a> {
    /// Creates a new `BooleanOperation`.
    #[must_use]
    pub fn new(a: &'a Polygon, b: &'a Polygon, op: BooleanOp) -> Self {
        Self { a, b, op }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if an operand has fewer than
    /// three points, or `OperationError::Inconsistent` if the edge fragments
    /// cannot be assembled into closed loops.
    pub fn execute(&self) -> Result<Vec<Polygon>> {
        boolean_execute(self.a, self.b, self.op, &mut None)
    }

    /// Executes the operation, reporting intersection points to `sink`.
    ///
    /// # Errors
    ///
    /// See [`BooleanOperation::execute`].
    pub fn execute_with_debug(&self, sink: &mut dyn DebugSink) -> Result<Vec<Polygon>> {
        boolean_execute(self.a, self.b, self.op, &mut Some(sink))
    }
}

/// Applies the boolean operation named by `code` (`"u"`, `"i"` or `"d"`).
///
/// # Errors
///
/// Returns `OperationError::InvalidOperation` for an unknown code, otherwise
/// the errors of [`BooleanOperation::execute`].
pub fn boolean_operation(a: &Polygon, b: &Polygon, code: &str) -> Result<Vec<Polygon>> {
    let op: BooleanOp = code.parse()?;
    BooleanOperation::new(a, b, op).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::debug::Color;
    use crate::error::{OperationError, PolynavError};
    use crate::math::Vector;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::from_tuples(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn triangle() -> Polygon {
        Polygon::from_tuples(&[(2.0, 2.0), (3.0, 6.0), (1.0, 6.0)])
    }

    fn total_signed_area(polygons: &[Polygon]) -> f64 {
        polygons.iter().map(Polygon::signed_area).sum()
    }

    #[test]
    fn square_and_triangle() {
        let a = square(0.0, 0.0, 4.0);
        let b = triangle();

        let inter = boolean_operation(&a, &b, "i").unwrap();
        assert_eq!(inter.len(), 1);
        assert_relative_eq!(inter[0].area(), 1.0, epsilon = 1e-9);
        assert!(inter[0].area() < b.area());

        let union = boolean_operation(&a, &b, "u").unwrap();
        assert_eq!(union.len(), 1);
        assert_relative_eq!(union[0].area(), 19.0, epsilon = 1e-9);

        let diff = boolean_operation(&a, &b, "d").unwrap();
        assert_eq!(diff.len(), 1);
        assert_relative_eq!(diff[0].area(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn area_identity_for_overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let union = boolean_operation(&a, &b, "u").unwrap();
        let inter = boolean_operation(&a, &b, "i").unwrap();
        let diff = boolean_operation(&a, &b, "d").unwrap();

        assert_relative_eq!(total_signed_area(&union), 7.0, epsilon = 1e-9);
        assert_relative_eq!(total_signed_area(&inter), 1.0, epsilon = 1e-9);
        assert_relative_eq!(total_signed_area(&diff), 3.0, epsilon = 1e-9);
        assert_relative_eq!(
            total_signed_area(&union),
            a.area() + b.area() - total_signed_area(&inter),
            epsilon = 1e-9
        );
        assert_eq!(diff[0].len(), 6);
    }

    #[test]
    fn clockwise_first_operand() {
        let a = square(0.0, 0.0, 2.0).flipped();
        let b = square(1.0, 1.0, 2.0);
        let union = boolean_operation(&a, &b, "u").unwrap();
        assert_eq!(union.len(), 1);
        assert_relative_eq!(union[0].area(), 7.0, epsilon = 1e-9);
        assert!(union[0].is_clockwise());
    }

    #[test]
    fn adjacent_squares_merge() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        let union = boolean_operation(&a, &b, "u").unwrap();
        assert_eq!(union.len(), 1);
        assert_eq!(union[0].len(), 4);
        assert_relative_eq!(union[0].area(), 2.0, epsilon = 1e-9);

        assert!(boolean_operation(&a, &b, "i").unwrap().is_empty());

        let diff = boolean_operation(&a, &b, "d").unwrap();
        assert_eq!(diff.len(), 1);
        assert_relative_eq!(diff[0].area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn corner_touching_squares_stay_separate() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(2.0, 2.0, 2.0);
        let union = boolean_operation(&a, &b, "u").unwrap();
        assert_eq!(union.len(), 2);
        for poly in &union {
            assert_eq!(poly.len(), 4);
            assert_relative_eq!(poly.signed_area(), 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn pinched_difference_splits_into_simple_loops() {
        let a = square(0.0, 0.0, 2.0);
        let diamond = Polygon::from_tuples(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)]);
        let diff = boolean_operation(&a, &diamond, "d").unwrap();
        assert_eq!(diff.len(), 4);
        for corner in &diff {
            assert_eq!(corner.len(), 3);
            assert_relative_eq!(corner.signed_area(), 0.5, epsilon = 1e-9);
        }
        assert!(diff.iter().any(|p| p.points().contains(&Vector::new(0.0, 0.0))));
    }

    #[test]
    fn disjoint_operands() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert_eq!(boolean_operation(&a, &b, "u").unwrap().len(), 2);
        assert!(boolean_operation(&a, &b, "i").unwrap().is_empty());
        let diff = boolean_operation(&a, &b, "d").unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0], a);
    }

    #[test]
    fn contained_operand_becomes_hole() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(1.0, 1.0, 1.0);
        let diff = boolean_operation(&a, &b, "d").unwrap();
        assert_eq!(diff.len(), 2);
        assert_relative_eq!(total_signed_area(&diff), 15.0, epsilon = 1e-9);
        assert_eq!(diff.iter().filter(|p| p.is_clockwise()).count(), 1);

        let inter = boolean_operation(&a, &b, "i").unwrap();
        assert_eq!(inter.len(), 1);
        assert_relative_eq!(inter[0].area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn results_have_no_redundant_points() {
        let a = square(0.0, 0.0, 4.0);
        let b = triangle();
        for code in ["u", "i", "d"] {
            for poly in boolean_operation(&a, &b, code).unwrap() {
                assert!(poly.len() >= 3);
                assert_eq!(poly.simplify().len(), poly.len());
            }
        }
    }

    #[test]
    fn inputs_are_untouched() {
        let a = square(0.0, 0.0, 4.0);
        let b = triangle();
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = boolean_operation(&a, &b, "d").unwrap();
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let a = square(0.0, 0.0, 1.0);
        assert!(matches!(
            boolean_operation(&a, &a, "x"),
            Err(PolynavError::Operation(OperationError::InvalidOperation(_)))
        ));
    }

    #[test]
    fn debug_sink_sees_intersections() {
        let a = square(0.0, 0.0, 4.0);
        let b = triangle();
        let mut hits: Vec<Vector> = Vec::new();
        let mut sink = |p: Vector, _: Color, _: &str| hits.push(p);
        BooleanOperation::new(&a, &b, BooleanOp::Union)
            .execute_with_debug(&mut sink)
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&Vector::new(2.5, 4.0)));
    }
}
