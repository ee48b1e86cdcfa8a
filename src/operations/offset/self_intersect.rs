use crate::math::distance_2d::distance_point_segment_squared;
use crate::math::intersect_2d::{ring_edges, segment_segment_params};
use crate::math::{Vector, VECTOR_EPSILON};

/// Parameter margin keeping split points off the segment ends.
const END_MARGIN: f64 = 1e-7;

/// Cuts every edge of the raw offset rings at every point where another
/// edge meets it, across rings too.
///
/// Three kinds of contact produce nodes: proper crossings, T-junctions
/// where an endpoint of one edge lies inside another, and the ends of
/// collinear overlaps. Afterwards two pieces either share an endpoint,
/// coincide, or are disjoint. Pieces keep the direction of their edge.
#[must_use]
pub fn split_at_nodes(rings: &[Vec<Vector>]) -> Vec<(Vector, Vector)> {
    let edges: Vec<(Vector, Vector)> = rings
        .iter()
        .flat_map(|ring| ring_edges(ring))
        .filter(|(a, b)| a != b)
        .collect();
    let eps_sq = VECTOR_EPSILON * VECTOR_EPSILON;

    let mut pieces = Vec::with_capacity(edges.len() * 2);
    for (i, &(a, b)) in edges.iter().enumerate() {
        let ab = b - a;
        let len_sq = ab.length_squared();
        let mut cuts: Vec<(f64, Vector)> = Vec::new();

        for (j, &(c, d)) in edges.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some((point, t, _)) = segment_segment_params(a, b, c, d) {
                if t > END_MARGIN && t < 1.0 - END_MARGIN {
                    cuts.push((t, point));
                }
            }
            // Parallel edges never cross; their endpoints still touch.
            for end in [c, d] {
                let t = (end - a).dot(ab) / len_sq;
                if t > END_MARGIN
                    && t < 1.0 - END_MARGIN
                    && distance_point_segment_squared(end, a, b) < eps_sq
                {
                    cuts.push((t, end));
                }
            }
        }

        cuts.sort_by(|x, y| x.0.total_cmp(&y.0));
        let mut start = a;
        for end in cuts.into_iter().map(|(_, p)| p).chain(std::iter::once(b)) {
            if end != start {
                pieces.push((start, end));
                start = end;
            }
        }
    }
    pieces
}
