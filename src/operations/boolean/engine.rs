use tracing::debug;

use crate::debug::{emit, Color, DebugSink};
use crate::error::{OperationError, Result};
use crate::geometry::Polygon;
use crate::math::distance_2d::distance_point_segment_squared;
use crate::math::intersect_2d::{intersect_segment_segment, ring_edges};
use crate::math::polygon_2d::{contains_point, Containment};
use crate::math::{Vector, VECTOR_EPSILON};

use super::assemble::assemble_loops;
use super::ring::{Ring, RingVertex};
use super::select::{should_keep_fragment, BooleanOp, FragmentClass, Source};

/// Executes a boolean operation on two simple polygons.
///
/// Orchestrates the full pipeline: orientation, vertex classification,
/// edge-edge intersection, ring extension, edge selection, loop assembly
/// and cleanup. Neither input is modified.
pub fn boolean_execute(
    a: &Polygon,
    b: &Polygon,
    op: BooleanOp,
    sink: &mut Option<&mut dyn DebugSink>,
) -> Result<Vec<Polygon>> {
    if a.len() < 3 || b.len() < 3 {
        return Err(OperationError::InvalidInput(format!(
            "boolean operands need at least 3 points, got {} and {}",
            a.len(),
            b.len()
        ))
        .into());
    }

    // Step 1: Work on copies; B is re-oriented so that union and intersection
    // see equal windings and difference sees opposite windings.
    let poly_a = a.clone();
    let same_winding = a.is_clockwise() == b.is_clockwise();
    let poly_b = if same_winding == (op != BooleanOp::Difference) {
        b.clone()
    } else {
        b.flipped()
    };
    let (pa, pb) = (poly_a.points(), poly_b.points());

    // Step 2: Tag original vertices against the other polygon
    let mut ring_a = Ring::build(pa, pb);
    let mut ring_b = Ring::build(pb, pa);

    // Step 3: Intersection points per edge, then splice them into the rings
    let (cuts_a, cuts_b) = collect_edge_cuts(pa, pb, sink);
    let mut cut_count = 0usize;
    for (edge, cuts) in cuts_a.iter().enumerate() {
        ring_a.insert_on_edge(edge, cuts)?;
        cut_count += cuts.len();
    }
    for (edge, cuts) in cuts_b.iter().enumerate() {
        ring_b.insert_on_edge(edge, cuts)?;
    }

    // Step 4: Select edge fragments
    let edges_a = ring_a.edges()?;
    let edges_b = ring_b.edges()?;
    let mut fragments: Vec<(Vector, Vector)> = Vec::new();
    for (edges, other, other_edges, source) in [
        (&edges_a, pb, &edges_b, Source::A),
        (&edges_b, pa, &edges_a, Source::B),
    ] {
        for (p, q) in edges {
            let class = classify_edge(p, q, other, other_edges);
            if should_keep_fragment(source, class, op) {
                fragments.push((p.point, q.point));
            }
        }
    }

    // Step 5: Assemble and clean up
    let result: Vec<Polygon> = assemble_loops(&fragments)?
        .iter()
        .map(Polygon::simplify)
        .filter(|poly| poly.len() >= 3)
        .collect();

    debug!(
        ?op,
        cuts = cut_count,
        fragments = fragments.len(),
        polygons = result.len(),
        "boolean operation finished"
    );
    Ok(result)
}

/// Collects, for every edge of `a` and of `b`, the boundary points that must
/// be spliced into it, sorted along the edge.
///
/// These are proper crossings with the other polygon plus vertices of the
/// other polygon lying on the edge. A crossing within tolerance of an
/// existing vertex is snapped to that vertex, and a point is never added to
/// an edge it already bounds.
fn collect_edge_cuts(
    a: &[Vector],
    b: &[Vector],
    sink: &mut Option<&mut dyn DebugSink>,
) -> (Vec<Vec<Vector>>, Vec<Vec<Vector>>) {
    let mut cuts_a: Vec<Vec<Vector>> = vec![Vec::new(); a.len()];
    let mut cuts_b: Vec<Vec<Vector>> = vec![Vec::new(); b.len()];

    for (i, (a1, a2)) in ring_edges(a).enumerate() {
        for (j, (b1, b2)) in ring_edges(b).enumerate() {
            let Some(hit) = intersect_segment_segment(a1, a2, b1, b2) else {
                continue;
            };
            let hit = [a1, a2, b1, b2]
                .into_iter()
                .find(|&corner| corner == hit)
                .unwrap_or(hit);
            if hit != a1 && hit != a2 {
                cuts_a[i].push(hit);
            }
            if hit != b1 && hit != b2 {
                cuts_b[j].push(hit);
            }
            emit(sink, hit, Color::YELLOW, "intersection");
        }
    }

    add_touching_vertices(a, b, &mut cuts_b);
    add_touching_vertices(b, a, &mut cuts_a);

    for (cuts, (start, end)) in cuts_a.iter_mut().zip(ring_edges(a)) {
        sort_along_edge(start, end, cuts);
    }
    for (cuts, (start, end)) in cuts_b.iter_mut().zip(ring_edges(b)) {
        sort_along_edge(start, end, cuts);
    }

    (cuts_a, cuts_b)
}

/// Vertices of `points` lying on an edge of `other` (T-junctions and
/// collinear overlaps) become cut points of that edge.
fn add_touching_vertices(points: &[Vector], other: &[Vector], cuts: &mut [Vec<Vector>]) {
    let eps_sq = VECTOR_EPSILON * VECTOR_EPSILON;
    for &p in points {
        for (j, (q1, q2)) in ring_edges(other).enumerate() {
            if p != q1 && p != q2 && distance_point_segment_squared(p, q1, q2) < eps_sq {
                cuts[j].push(p);
            }
        }
    }
}

/// Orders cut points from `start` towards `end` along the dominant axis of
/// the edge and removes duplicates.
fn sort_along_edge(start: Vector, end: Vector, cuts: &mut Vec<Vector>) {
    let d = end - start;
    let along_x = d.x.abs() >= d.y.abs();
    cuts.sort_by(|p, q| {
        let by_x = if d.x >= 0.0 { p.x.total_cmp(&q.x) } else { q.x.total_cmp(&p.x) };
        let by_y = if d.y >= 0.0 { p.y.total_cmp(&q.y) } else { q.y.total_cmp(&p.y) };
        if along_x {
            by_x.then(by_y)
        } else {
            by_y.then(by_x)
        }
    });
    cuts.dedup();
    cuts.retain(|&p| p != start && p != end);
}

fn classify_edge(
    p: &RingVertex,
    q: &RingVertex,
    other: &[Vector],
    other_edges: &[(RingVertex, RingVertex)],
) -> FragmentClass {
    if p.tag != Containment::Boundary || q.tag != Containment::Boundary {
        return FragmentClass::Endpoints(p.tag, q.tag);
    }
    match contains_point(other, p.point.midpoint(q.point)) {
        Containment::Boundary => FragmentClass::Shared {
            same_direction: other_edges
                .iter()
                .any(|(s, e)| s.point == p.point && e.point == q.point),
        },
        location => FragmentClass::Midpoint(location),
    }
}
