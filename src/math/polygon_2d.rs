use super::distance_2d::distance_point_segment_squared;
use super::intersect_2d::ring_edges;
use super::{Vector, TOLERANCE, VECTOR_EPSILON};

/// Location of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    Outside,
    Inside,
    Boundary,
}

/// Twice the signed area of the triangle `a-b-c`.
///
/// Positive when `c` lies to the left of `a -> b` (counter-clockwise turn),
/// negative to the right, zero when collinear.
#[must_use]
pub fn orientation(a: Vector, b: Vector, c: Vector) -> f64 {
    (b - a).cross(c - a)
}

/// Tests whether `p` lies strictly inside the triangle `a-b-c` (either winding).
#[must_use]
pub fn point_in_triangle(p: Vector, a: Vector, b: Vector, c: Vector) -> bool {
    let d1 = orientation(a, b, p);
    let d2 = orientation(b, c, p);
    let d3 = orientation(c, a, p);
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Vector]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    ring_edges(points).map(|(a, b)| a.cross(b)).sum::<f64>() * 0.5
}

/// Index of the leftmost vertex, breaking ties by smallest y.
///
/// The vertex is a local minimum of the ring and therefore always convex.
#[must_use]
pub fn leftmost_bottom_index(points: &[Vector]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, pt) in points.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) => {
                let b = points[b];
                if pt.x < b.x - TOLERANCE || ((pt.x - b.x).abs() < TOLERANCE && pt.y < b.y) {
                    best = Some(i);
                }
            }
        }
    }
    best
}

/// Classifies `p` against the closed ring `points`.
///
/// Boundary membership is tested first against every edge with a squared
/// tolerance of `VECTOR_EPSILON^2`. Otherwise a ray is cast towards `+x` and
/// edge crossings are counted. A vertex exactly on the ray counts as lying
/// above it, so the two edges meeting there contribute one crossing when
/// they continue on opposite sides of the ray (a true transit) and zero or
/// two when they turn back.
///
/// The crossings are counted in place instead of through
/// [`intersect_poly_ray`](super::intersect_2d::intersect_poly_ray): that
/// helper returns one point per edge hit, so a ray through a vertex would
/// need its hits regrouped by vertex before the tie-break could apply. The
/// half-open test above gives the same count in one pass.
#[must_use]
pub fn contains_point(points: &[Vector], p: Vector) -> Containment {
    if points.is_empty() {
        return Containment::Outside;
    }

    let eps_sq = VECTOR_EPSILON * VECTOR_EPSILON;
    if ring_edges(points).any(|(a, b)| distance_point_segment_squared(p, a, b) < eps_sq) {
        return Containment::Boundary;
    }

    let mut crossings = 0usize;
    for (a, b) in ring_edges(points) {
        let a_above = a.y >= p.y;
        let b_above = b.y >= p.y;
        if a_above == b_above {
            continue;
        }
        // Horizontal edges never reach here; a.y != b.y.
        let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x > p.x {
            crossings += 1;
        }
    }

    if crossings % 2 == 1 {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// Winding number of the closed ring `points` around `p`.
///
/// Counts signed crossings of edges with the horizontal ray to the right of
/// `p`: upward edges with `p` on their left add one, downward edges with `p`
/// on their right subtract one.
#[must_use]
pub fn winding_number(points: &[Vector], p: Vector) -> i32 {
    let mut wn = 0;
    for (a, b) in ring_edges(points) {
        if a.y <= p.y {
            if b.y > p.y && orientation(a, b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && orientation(a, b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}
