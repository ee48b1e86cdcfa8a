use crate::geometry::Polygon;
use crate::math::polygon_2d::orientation;
use crate::math::{Vector, TOLERANCE};

/// Merges adjacent convex pieces while their union stays convex
/// (Hertel-Mehlhorn).
///
/// Pieces must be counter-clockwise and meet edge to edge. Each merge removes
/// one shared diagonal. Collinear vertices are kept, so every edge shared by
/// two result pieces appears with identical endpoints in both.
#[must_use]
pub fn merge_convex(pieces: Vec<Polygon>) -> Vec<Polygon> {
    let mut pieces: Vec<Vec<Vector>> = pieces.into_iter().map(Polygon::into_points).collect();

    'search: loop {
        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                if let Some(merged) = try_merge(&pieces[i], &pieces[j]) {
                    pieces[i] = merged;
                    pieces.swap_remove(j);
                    continue 'search;
                }
            }
        }
        break;
    }

    pieces.into_iter().map(Polygon::from_points).collect()
}

/// Joins `p` and `q` across a shared edge if the result is convex.
///
/// The shared edge runs `u -> v` in `p` and `v -> u` in `q`.
fn try_merge(p: &[Vector], q: &[Vector]) -> Option<Vec<Vector>> {
    let (np, nq) = (p.len(), q.len());
    for k in 0..np {
        let (u, v) = (p[k], p[(k + 1) % np]);
        let Some(m) = q.iter().position(|&x| x == v) else {
            continue;
        };
        if q[(m + 1) % nq] != u {
            continue;
        }

        // p from v around to u, then q strictly between u and v.
        let mut merged: Vec<Vector> = (0..np).map(|s| p[(k + 1 + s) % np]).collect();
        merged.extend((2..nq).map(|s| q[(m + s) % nq]));

        if is_convex_ccw(&merged) {
            return Some(merged);
        }
    }
    None
}

/// No clockwise turns; collinear vertices are allowed.
fn is_convex_ccw(points: &[Vector]) -> bool {
    let n = points.len();
    (0..n).all(|i| {
        let (a, b, c) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
        let scale = (b - a).length() * (c - b).length();
        orientation(a, b, c) >= -TOLERANCE * scale.max(1.0)
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Polygon {
        Polygon::from_tuples(&[a, b, c])
    }

    #[test]
    fn two_triangles_become_square() {
        let pieces = vec![
            tri((0.0, 0.0), (1.0, 0.0), (1.0, 1.0)),
            tri((0.0, 0.0), (1.0, 1.0), (0.0, 1.0)),
        ];
        let merged = merge_convex(pieces);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 4);
        assert!(merged[0].is_convex());
        assert_relative_eq!(merged[0].signed_area(), 1.0);
    }

    #[test]
    fn concave_union_is_not_merged() {
        // Together these form a dart with a reflex vertex at (1, 0.5).
        let pieces = vec![
            tri((0.0, 0.0), (1.0, 0.5), (0.0, 1.0)),
            tri((0.0, 0.0), (3.0, 0.5), (1.0, 0.5)),
        ];
        let merged = merge_convex(pieces);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn collinear_vertex_is_kept() {
        // Three triangles fanning from (0, 0) over a straight top edge.
        let pieces = vec![
            tri((0.0, 0.0), (2.0, 0.0), (2.0, 1.0)),
            tri((0.0, 0.0), (2.0, 1.0), (1.0, 1.0)),
            tri((0.0, 0.0), (1.0, 1.0), (0.0, 1.0)),
        ];
        let merged = merge_convex(pieces);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 5);
        assert_relative_eq!(merged[0].area(), 2.0);
    }

    #[test]
    fn unrelated_pieces_stay_apart() {
        let pieces = vec![
            tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0)),
            tri((5.0, 5.0), (6.0, 5.0), (5.0, 6.0)),
        ];
        assert_eq!(merge_convex(pieces).len(), 2);
    }
}
