use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{NavigationError, Result};
use crate::geometry::Polygon;
use crate::math::Vector;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates `boundary` minus `holes` with a constrained Delaunay
/// triangulation.
///
/// Every returned triangle is counter-clockwise. Holes must lie inside the
/// boundary and must not cross each other.
///
/// # Errors
///
/// Returns `NavigationError::Decomposition` if a point cannot be inserted or
/// two boundary edges cross.
pub fn triangulate(boundary: &Polygon, holes: &[Polygon]) -> Result<Vec<Polygon>> {
    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, boundary.points())?;
    for hole in holes {
        insert_constraint_loop(&mut cdt, hole.points())?;
    }

    let inside = inside_faces(&cdt);

    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        if !inside[face.fix().index()] {
            continue;
        }
        let triangle: Polygon = face
            .vertices()
            .iter()
            .map(|vertex| {
                let pos = vertex.position();
                Vector::new(pos.x, pos.y)
            })
            .collect();
        triangles.push(triangle.clone_ccw());
    }

    Ok(triangles)
}

/// Inserts a closed ring as vertices joined by constraint edges.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[Vector]) -> Result<()> {
    if points.len() < 3 {
        return Err(NavigationError::Decomposition(
            "constraint loop needs at least 3 points".into(),
        )
        .into());
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(SpadePoint2::new(pt.x, pt.y))
            .map_err(|e: InsertionError| {
                NavigationError::Decomposition(format!("CDT insert: {e}"))
            })?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(NavigationError::Decomposition(format!(
                "constraint edge from {} crosses another boundary edge",
                points[i]
            ))
            .into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Marks each face of the CDT as inside or outside the region, indexed by
/// face index.
///
/// Walks the faces outwards-in from the convex hull. Crossing a constraint
/// edge flips between inside and outside, so the boundary ring and every
/// hole ring toggle the state once.
fn inside_faces(cdt: &Cdt) -> Vec<bool> {
    let mut state: Vec<Option<bool>> = vec![None; cdt.num_all_faces()];
    let mut pending = Vec::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges().filter(|e| e.face().fix() == outer) {
        if let Some(face) = edge.rev().face().as_inner() {
            let crossed = cdt.is_constraint_edge(edge.as_undirected().fix());
            pending.push((face.fix(), crossed));
        }
    }

    while let Some((face, inside)) = pending.pop() {
        if state[face.index()].is_some() {
            continue;
        }
        state[face.index()] = Some(inside);
        for edge in cdt.face(face).adjacent_edges() {
            let Some(next) = edge.rev().face().as_inner() else {
                continue;
            };
            if state[next.fix().index()].is_none() {
                let crossed = cdt.is_constraint_edge(edge.as_undirected().fix());
                pending.push((next.fix(), inside != crossed));
            }
        }
    }

    state.into_iter().map(|s| s == Some(true)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::from_tuples(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn total_area(polygons: &[Polygon]) -> f64 {
        polygons.iter().map(Polygon::area).sum()
    }

    #[test]
    fn square_gives_two_triangles() {
        let triangles = triangulate(&square(0.0, 0.0, 2.0), &[]).unwrap();
        assert_eq!(triangles.len(), 2);
        assert_relative_eq!(total_area(&triangles), 4.0, epsilon = 1e-9);
        assert!(triangles.iter().all(|t| !t.is_clockwise()));
    }

    #[test]
    fn concave_outline_excludes_notch() {
        let l_shape = Polygon::from_tuples(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let triangles = triangulate(&l_shape, &[]).unwrap();
        assert_eq!(triangles.len(), 4);
        assert_relative_eq!(total_area(&triangles), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_is_left_uncovered() {
        let outer = square(0.0, 0.0, 10.0);
        let hole = square(4.0, 4.0, 2.0).flipped();
        let triangles = triangulate(&outer, &[hole]).unwrap();
        assert_relative_eq!(total_area(&triangles), 96.0, epsilon = 1e-9);
        let center = Vector::new(5.0, 5.0);
        assert!(triangles
            .iter()
            .all(|t| t.contains_point(center) == crate::math::polygon_2d::Containment::Outside));
    }

    #[test]
    fn crossing_constraints_are_rejected() {
        let outer = square(0.0, 0.0, 4.0);
        let hole = square(3.0, 1.0, 2.0);
        assert!(triangulate(&outer, &[hole]).is_err());
    }

    #[test]
    fn degenerate_loop_is_rejected() {
        let outer = Polygon::from_tuples(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(triangulate(&outer, &[]).is_err());
    }
}
