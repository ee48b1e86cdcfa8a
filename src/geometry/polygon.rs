use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::math::intersect_2d::ring_edges;
use crate::math::polygon_2d::{
    contains_point, leftmost_bottom_index, orientation, signed_area_2d, Containment,
};
use crate::math::{Transform, Vector, TOLERANCE, VECTOR_EPSILON};

/// A closed polygon stored as an ordered list of points.
///
/// The edge from the last point back to the first is implicit. Winding is
/// not stored; it is derived from the geometry when needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Vector>,
}

impl Polygon {
    /// Creates an empty polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polygon from its vertices in order.
    #[must_use]
    pub fn from_points(points: Vec<Vector>) -> Self {
        Self { points }
    }

    /// Creates a polygon from `(x, y)` pairs.
    #[must_use]
    pub fn from_tuples(tuples: &[(f64, f64)]) -> Self {
        tuples.iter().map(|&t| Vector::from(t)).collect()
    }

    /// Creates a regular polygon with `sides` corners on a circle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn regular(center: Vector, radius: f64, sides: usize) -> Self {
        let step = TAU / sides as f64;
        (0..sides)
            .map(|i| {
                let (s, c) = (i as f64 * step).sin_cos();
                Vector::new(center.x + radius * c, center.y + radius * s)
            })
            .collect()
    }

    /// Appends a vertex.
    pub fn push(&mut self, point: Vector) {
        self.points.push(point);
    }

    /// Removes and returns the last vertex.
    pub fn pop(&mut self) -> Option<Vector> {
        self.points.pop()
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Mutable access for in-place editing.
    pub fn points_mut(&mut self) -> &mut Vec<Vector> {
        &mut self.points
    }

    /// Consumes the polygon, returning its vertices.
    #[must_use]
    pub fn into_points(self) -> Vec<Vector> {
        self.points
    }

    /// Iterates the vertices.
    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.points.iter()
    }

    /// Iterates the closed edges of the polygon.
    pub fn edges(&self) -> impl Iterator<Item = (Vector, Vector)> + '_ {
        ring_edges(&self.points)
    }

    /// Signed area: positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Center of mass of the enclosed area.
    ///
    /// Falls back to the vertex average for degenerate (zero-area) polygons.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Vector {
        if self.points.is_empty() {
            return Vector::default();
        }
        let area = self.signed_area();
        if area.abs() < TOLERANCE {
            let sum = self.points.iter().fold(Vector::default(), |acc, &p| acc + p);
            return sum / self.points.len() as f64;
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (a, b) in self.edges() {
            let f = a.cross(b);
            cx += (a.x + b.x) * f;
            cy += (a.y + b.y) * f;
        }
        Vector::new(cx / (6.0 * area), cy / (6.0 * area))
    }

    /// Tests the winding with the turn at the leftmost-bottom vertex.
    ///
    /// That vertex is a local minimum and always convex, so the sign of its
    /// turn is the sign of the whole ring. A collinear turn falls back to the
    /// signed area.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        let n = self.points.len();
        let Some(i) = leftmost_bottom_index(&self.points) else {
            return false;
        };
        if n < 3 {
            return false;
        }
        let prev = self.points[(i + n - 1) % n];
        let next = self.points[(i + 1) % n];
        let turn = orientation(prev, self.points[i], next);
        if turn.abs() > TOLERANCE {
            turn < 0.0
        } else {
            self.signed_area() < 0.0
        }
    }

    /// Tests whether every turn has the same sign (collinear turns allowed).
    #[must_use]
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut left_turns: Option<bool> = None;
        for i in 0..n {
            let turn = orientation(
                self.points[i],
                self.points[(i + 1) % n],
                self.points[(i + 2) % n],
            );
            if turn.abs() <= TOLERANCE {
                continue;
            }
            match left_turns {
                None => left_turns = Some(turn > 0.0),
                Some(left) if left != (turn > 0.0) => return false,
                Some(_) => {}
            }
        }
        true
    }

    /// Reverses the winding in place.
    pub fn flip(&mut self) {
        self.points.reverse();
    }

    /// Returns a reversed copy.
    #[must_use]
    pub fn flipped(&self) -> Self {
        self.points.iter().rev().copied().collect()
    }

    /// Returns a copy with counter-clockwise winding.
    #[must_use]
    pub fn clone_ccw(&self) -> Self {
        if self.is_clockwise() {
            self.flipped()
        } else {
            self.clone()
        }
    }

    /// Returns a copy with clockwise winding.
    #[must_use]
    pub fn clone_cw(&self) -> Self {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.flipped()
        }
    }

    /// Re-orders the points by their angle around `center`.
    pub fn sort_around(&mut self, center: Vector) {
        let angle = |p: &Vector| {
            let d = *p - center;
            let phi = d.y.atan2(d.x);
            if phi < 0.0 {
                phi + TAU
            } else {
                phi
            }
        };
        self.points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
    }

    /// Classifies `p` as inside, outside or on the border.
    #[must_use]
    pub fn contains_point(&self, p: Vector) -> Containment {
        contains_point(&self.points, p)
    }

    /// Removes points that coincide with a neighbor or lie on the line
    /// through their neighbors (within `VECTOR_EPSILON`).
    #[must_use]
    pub fn simplify(&self) -> Self {
        let mut pts = self.points.clone();
        'scan: while pts.len() >= 3 {
            let n = pts.len();
            for i in 0..n {
                let prev = pts[(i + n - 1) % n];
                let next = pts[(i + 1) % n];
                if is_redundant(prev, pts[i], next) {
                    pts.remove(i);
                    continue 'scan;
                }
            }
            break;
        }
        Self::from_points(pts)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vector, Vector)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Vector::new(lo.x.min(p.x), lo.y.min(p.y)),
                Vector::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Applies `transform` to every vertex.
    #[must_use]
    pub fn transform(&self, transform: &Transform) -> Self {
        transform.apply_polygon(self)
    }

    /// The vertices as `(x, y)` pairs.
    #[must_use]
    pub fn as_tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| p.as_tuple()).collect()
    }
}

fn is_redundant(prev: Vector, cur: Vector, next: Vector) -> bool {
    if cur == prev || cur == next || prev == next {
        return true;
    }
    let base = (next - prev).length();
    (orientation(prev, cur, next) / base).abs() < VECTOR_EPSILON
}

impl Index<usize> for Polygon {
    type Output = Vector;
    fn index(&self, index: usize) -> &Vector {
        &self.points[index]
    }
}

impl IndexMut<usize> for Polygon {
    fn index_mut(&mut self, index: usize) -> &mut Vector {
        &mut self.points[index]
    }
}

impl FromIterator<Vector> for Polygon {
    fn from_iter<I: IntoIterator<Item = Vector>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

impl Extend<Vector> for Polygon {
    fn extend<I: IntoIterator<Item = Vector>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<Vector>> for Polygon {
    fn from(points: Vec<Vector>) -> Self {
        Self::from_points(points)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon [")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({:.2}, {:.2})", p.x, p.y)?;
        }
        write!(f, "]")
    }
}
