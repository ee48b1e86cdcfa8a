use super::{Vector, TOLERANCE};

/// Squared distance from `p` to the segment `a-b`.
///
/// Projects `p` onto the supporting line with
/// `r = dot(p - a, b - a) / |b - a|^2`. Outside `[0, 1]` the nearest endpoint
/// wins; inside, the perpendicular distance is used.
#[must_use]
pub fn distance_point_segment_squared(p: Vector, a: Vector, b: Vector) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return (p - a).length_squared();
    }

    let r = (p - a).dot(ab) / len_sq;
    if r <= 0.0 {
        (p - a).length_squared()
    } else if r >= 1.0 {
        (p - b).length_squared()
    } else {
        let cross = (p - a).cross(ab);
        cross * cross / len_sq
    }
}

/// Distance from `p` to the segment `a-b`.
#[must_use]
pub fn distance_point_segment(p: Vector, a: Vector, b: Vector) -> f64 {
    distance_point_segment_squared(p, a, b).sqrt()
}
