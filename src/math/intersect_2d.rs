use super::Vector;

/// Parametric intersection of the infinite lines through `p1-p2` and `q1-q2`.
///
/// Returns `(u_p, u_q)` such that the intersection point is
/// `p1 + (p2 - p1) * u_p == q1 + (q2 - q1) * u_q`. Parallel and coincident
/// lines give `None`; the determinant is compared against exact zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn line_line_params(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> Option<(f64, f64)> {
    let d = (q2.y - q1.y) * (p2.x - p1.x) - (q2.x - q1.x) * (p2.y - p1.y);
    if d == 0.0 {
        return None;
    }
    let n_p = (q2.x - q1.x) * (p1.y - q1.y) - (q2.y - q1.y) * (p1.x - q1.x);
    let n_q = (p2.x - p1.x) * (p1.y - q1.y) - (p2.y - p1.y) * (p1.x - q1.x);
    Some((n_p / d, n_q / d))
}

/// Point at parameter `u` along `p1-p2`.
#[must_use]
pub fn point_at(p1: Vector, p2: Vector, u: f64) -> Vector {
    Vector::new(p1.x + u * (p2.x - p1.x), p1.y + u * (p2.y - p1.y))
}

/// Intersects two infinite lines.
#[must_use]
pub fn intersect_line_line(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> Option<Vector> {
    line_line_params(p1, p2, q1, q2).map(|(u, _)| point_at(p1, p2, u))
}

/// Intersects the segment `p1-p2` with the infinite line through `q1-q2`.
#[must_use]
pub fn intersect_segment_line(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> Option<Vector> {
    let (u, _) = line_line_params(p1, p2, q1, q2)?;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(point_at(p1, p2, u))
}

/// Intersects the segment `p1-p2` with the ray starting at `q1` through `q2`.
#[must_use]
pub fn intersect_segment_ray(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> Option<Vector> {
    let (u, v) = line_line_params(p1, p2, q1, q2)?;
    if !(0.0..=1.0).contains(&u) || v < 0.0 {
        return None;
    }
    Some(point_at(p1, p2, u))
}

/// Cheap rejection when the bounding boxes of two segments are disjoint.
fn bounding_boxes_disjoint(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> bool {
    q1.x.max(q2.x) < p1.x.min(p2.x)
        || q1.x.min(q2.x) > p1.x.max(p2.x)
        || q1.y.max(q2.y) < p1.y.min(p2.y)
        || q1.y.min(q2.y) > p1.y.max(p2.y)
}

/// Segment-segment intersection with both parameters.
///
/// Returns `(point, u_p, u_q)` with both parameters in `[0, 1]`.
#[must_use]
pub fn segment_segment_params(
    p1: Vector,
    p2: Vector,
    q1: Vector,
    q2: Vector,
) -> Option<(Vector, f64, f64)> {
    if bounding_boxes_disjoint(p1, p2, q1, q2) {
        return None;
    }
    let (u, v) = line_line_params(p1, p2, q1, q2)?;
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }
    Some((point_at(p1, p2, u), u, v))
}

/// Intersects two line segments.
#[must_use]
pub fn intersect_segment_segment(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> Option<Vector> {
    segment_segment_params(p1, p2, q1, q2).map(|(pt, _, _)| pt)
}

/// Tests whether two segments intersect without building the point.
#[must_use]
pub fn check_intersect_segment_segment(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> bool {
    segment_segment_params(p1, p2, q1, q2).is_some()
}

/// Iterates the closed edges `(points[i], points[i + 1])` of a ring.
pub fn ring_edges(points: &[Vector]) -> impl Iterator<Item = (Vector, Vector)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Intersects every edge of a closed ring with the segment `p1-p2`.
#[must_use]
pub fn intersect_poly_segment(points: &[Vector], p1: Vector, p2: Vector) -> Vec<Vector> {
    ring_edges(points)
        .filter_map(|(a, b)| intersect_segment_segment(a, b, p1, p2))
        .collect()
}

/// Intersects every edge of a closed ring with the ray from `p1` through `p2`.
///
/// Edges whose endpoint coincides with `p2` are skipped.
#[must_use]
pub fn intersect_poly_ray(points: &[Vector], p1: Vector, p2: Vector) -> Vec<Vector> {
    ring_edges(points)
        .filter(|&(a, b)| a != p2 && b != p2)
        .filter_map(|(a, b)| intersect_segment_ray(a, b, p1, p2))
        .collect()
}

/// All intersection points between the edges of two closed rings.
#[must_use]
pub fn intersect_poly_poly(points_a: &[Vector], points_b: &[Vector]) -> Vec<Vector> {
    ring_edges(points_a)
        .flat_map(|(a1, a2)| intersect_poly_segment(points_b, a1, a2))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let pt = intersect_line_line(v(0.0, 0.0), v(1.0, 0.0), v(0.5, -1.0), v(0.5, 1.0)).unwrap();
        assert_relative_eq!(pt.x, 0.5);
        assert_relative_eq!(pt.y, 0.0);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        assert!(intersect_line_line(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0)).is_none());
        assert!(intersect_line_line(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(3.0, 0.0)).is_none());
    }

    #[test]
    fn line_meets_beyond_segments() {
        let pt = intersect_line_line(v(0.0, 0.0), v(1.0, 0.0), v(5.0, 1.0), v(5.0, 2.0)).unwrap();
        assert_relative_eq!(pt.x, 5.0);
        assert!(intersect_segment_segment(v(0.0, 0.0), v(1.0, 0.0), v(5.0, 1.0), v(5.0, 2.0)).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let (pt, u, w) = segment_segment_params(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0)).unwrap();
        assert_relative_eq!(pt.x, 1.0);
        assert_relative_eq!(pt.y, 1.0);
        assert_relative_eq!(u, 0.5);
        assert_relative_eq!(w, 0.5);
        assert!(check_intersect_segment_segment(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0)));
    }

    #[test]
    fn segment_segment_touching_endpoint() {
        let pt = intersect_segment_segment(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)).unwrap();
        assert_eq!(pt, v(1.0, 0.0));
    }

    #[test]
    fn segment_line_requires_segment_parameter() {
        assert!(intersect_segment_line(v(0.0, 0.0), v(1.0, 0.0), v(0.5, 5.0), v(0.5, 6.0)).is_some());
        assert!(intersect_segment_line(v(0.0, 0.0), v(1.0, 0.0), v(1.5, 5.0), v(1.5, 6.0)).is_none());
    }

    #[test]
    fn segment_ray_is_one_sided() {
        let ahead = intersect_segment_ray(v(2.0, -1.0), v(2.0, 1.0), v(0.0, 0.0), v(1.0, 0.0));
        assert_eq!(ahead.unwrap(), v(2.0, 0.0));
        let behind = intersect_segment_ray(v(-2.0, -1.0), v(-2.0, 1.0), v(0.0, 0.0), v(1.0, 0.0));
        assert!(behind.is_none());
    }

    #[test]
    fn poly_ray_counts_crossings() {
        let square = [v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)];
        let hits = intersect_poly_ray(&square, v(2.0, 1.0), v(3.0, 1.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], v(4.0, 1.0));
    }

    #[test]
    fn poly_poly_square_and_triangle() {
        let square = [v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)];
        let triangle = [v(2.0, 2.0), v(3.0, 6.0), v(1.0, 6.0)];
        let hits = intersect_poly_poly(&square, &triangle);
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&v(2.5, 4.0)));
        assert!(hits.contains(&v(1.5, 4.0)));
    }
}
