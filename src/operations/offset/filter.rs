use std::collections::BTreeMap;

use crate::math::polygon_2d::winding_number;
use crate::math::{Vector, VECTOR_EPSILON};
use crate::operations::boolean::assemble::PointMerger;

/// Distance from a piece at which its side windings are sampled.
const SIDE_OFFSET: f64 = 1e-6;

/// Total winding number of the raw offset rings around `p`.
#[must_use]
pub fn total_winding(rings: &[Vec<Vector>], p: Vector) -> i32 {
    rings.iter().map(|ring| winding_number(ring, p)).sum()
}

/// Whether area with winding `winding` belongs to the offset result.
///
/// With at least one island, area wound once or more is covered: shrunk
/// corners wind to zero or below and folds at grown reflex corners wind
/// twice inside covered area. Holes alone describe material all around
/// them, so there the uncovered level is below zero.
#[must_use]
pub fn is_covered(winding: i32, has_islands: bool) -> bool {
    if has_islands {
        winding > 0
    } else {
        winding >= 0
    }
}

/// A boundary piece with the windings on either side.
#[derive(Debug, Clone, Copy)]
pub struct SidedPiece {
    pub start: Vector,
    pub end: Vector,
    pub left: i32,
    pub right: i32,
}

/// Merges coincident pieces and measures the winding on each side.
///
/// Pieces running both ways over the same stretch cancel in the
/// multiplicity, so only the left winding needs a sample; the right one
/// differs by the net number of pieces crossed.
#[must_use]
pub fn side_windings(rings: &[Vec<Vector>], pieces: &[(Vector, Vector)]) -> Vec<SidedPiece> {
    let mut merger = PointMerger::new(VECTOR_EPSILON);
    let mut multiplicity: BTreeMap<(usize, usize), i32> = BTreeMap::new();
    for &(start, end) in pieces {
        let s = merger.get_or_insert(start);
        let e = merger.get_or_insert(end);
        if s == e {
            continue;
        }
        let (key, sign) = if s < e { ((s, e), 1) } else { ((e, s), -1) };
        *multiplicity.entry(key).or_default() += sign;
    }

    multiplicity
        .into_iter()
        .filter_map(|((s, e), net)| {
            let (start, end) = (merger.point(s), merger.point(e));
            let side = (end - start).normalize()?.left_normal();
            let left = total_winding(rings, start.midpoint(end) + side * SIDE_OFFSET);
            Some(SidedPiece {
                start,
                end,
                left,
                right: left - net,
            })
        })
        .collect()
}

/// The directed edge of `piece` with covered area on its left, if the piece
/// separates covered from uncovered area.
#[must_use]
pub fn boundary_edge(piece: &SidedPiece, has_islands: bool) -> Option<(Vector, Vector)> {
    match (
        is_covered(piece.left, has_islands),
        is_covered(piece.right, has_islands),
    ) {
        (true, false) => Some((piece.start, piece.end)),
        (false, true) => Some((piece.end, piece.start)),
        _ => None,
    }
}
