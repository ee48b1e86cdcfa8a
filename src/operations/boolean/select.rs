use std::str::FromStr;

use crate::error::{OperationError, PolynavError};
use crate::math::polygon_2d::Containment;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Intersect,
    Difference,
}

impl FromStr for BooleanOp {
    type Err = PolynavError;

    /// Parses the operation codes `u`, `i` and `d` (or the full names).
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "u" | "union" => Ok(Self::Union),
            "i" | "intersect" | "intersection" => Ok(Self::Intersect),
            "d" | "difference" => Ok(Self::Difference),
            _ => Err(OperationError::InvalidOperation(code.to_owned()).into()),
        }
    }
}

/// Which operand an edge fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    A,
    B,
}

/// How an edge fragment of one ring lies relative to the other polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentClass {
    /// Tags of the two endpoints; at least one is off the boundary.
    Endpoints(Containment, Containment),
    /// Both endpoints on the boundary; location of the midpoint.
    Midpoint(Containment),
    /// Runs along the other polygon's boundary.
    Shared { same_direction: bool },
}

/// Side of the other polygon whose edges survive.
///
/// | Fragment | Union   | Intersect | Difference (A-B) |
/// |----------|---------|-----------|------------------|
/// | from A   | outside | inside    | outside          |
/// | from B   | outside | inside    | inside           |
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn wanted_side(source: Source, op: BooleanOp) -> Containment {
    match (source, op) {
        (Source::A, BooleanOp::Union) => Containment::Outside,
        (Source::A, BooleanOp::Intersect) => Containment::Inside,
        (Source::A, BooleanOp::Difference) => Containment::Outside,

        (Source::B, BooleanOp::Union) => Containment::Outside,
        (Source::B, BooleanOp::Intersect) => Containment::Inside,
        (Source::B, BooleanOp::Difference) => Containment::Inside,
    }
}

/// Decides whether an edge fragment belongs to the result boundary.
///
/// An edge survives if either endpoint lies on the wanted side. Edges whose
/// endpoints are both on the boundary are decided by their midpoint. Edges
/// running along the other boundary are emitted once, from A, and only when
/// both rings traverse them in the same direction (after B was re-oriented for
/// the operation).
#[must_use]
pub fn should_keep_fragment(source: Source, class: FragmentClass, op: BooleanOp) -> bool {
    let wanted = wanted_side(source, op);
    match class {
        FragmentClass::Endpoints(p, q) => p == wanted || q == wanted,
        FragmentClass::Midpoint(m) => m == wanted,
        FragmentClass::Shared { same_direction } => same_direction && source == Source::A,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_operation_codes() {
        assert_eq!("u".parse::<BooleanOp>().unwrap(), BooleanOp::Union);
        assert_eq!("I".parse::<BooleanOp>().unwrap(), BooleanOp::Intersect);
        assert_eq!("difference".parse::<BooleanOp>().unwrap(), BooleanOp::Difference);
        assert!(matches!(
            "x".parse::<BooleanOp>(),
            Err(PolynavError::Operation(OperationError::InvalidOperation(_)))
        ));
    }

    #[test]
    fn union_keeps_outside_edges_of_both() {
        let out_in = FragmentClass::Endpoints(Containment::Outside, Containment::Boundary);
        assert!(should_keep_fragment(Source::A, out_in, BooleanOp::Union));
        assert!(should_keep_fragment(Source::B, out_in, BooleanOp::Union));
        let inside = FragmentClass::Endpoints(Containment::Boundary, Containment::Inside);
        assert!(!should_keep_fragment(Source::A, inside, BooleanOp::Union));
    }

    #[test]
    fn difference_keeps_b_inside_a() {
        let inside = FragmentClass::Endpoints(Containment::Inside, Containment::Inside);
        assert!(should_keep_fragment(Source::B, inside, BooleanOp::Difference));
        assert!(!should_keep_fragment(Source::A, inside, BooleanOp::Difference));
    }

    #[test]
    fn boundary_chord_uses_midpoint() {
        let chord = FragmentClass::Midpoint(Containment::Inside);
        assert!(should_keep_fragment(Source::A, chord, BooleanOp::Intersect));
        assert!(!should_keep_fragment(Source::A, chord, BooleanOp::Union));
    }

    #[test]
    fn shared_edges_come_from_a_only() {
        let same = FragmentClass::Shared { same_direction: true };
        let opposite = FragmentClass::Shared { same_direction: false };
        for op in [BooleanOp::Union, BooleanOp::Intersect, BooleanOp::Difference] {
            assert!(should_keep_fragment(Source::A, same, op));
            assert!(!should_keep_fragment(Source::B, same, op));
            assert!(!should_keep_fragment(Source::A, opposite, op));
        }
    }
}
