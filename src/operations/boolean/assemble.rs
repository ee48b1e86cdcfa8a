use std::collections::{BTreeMap, HashMap};

use crate::error::{OperationError, Result};
use crate::geometry::Polygon;
use crate::math::{Vector, TOLERANCE, VECTOR_EPSILON};

/// Links kept edge fragments into closed loops.
///
/// Fragment endpoints are merged by tolerance, each fragment becomes a
/// directed link `start -> end`, and loops are walked until every link is
/// consumed. Where several links leave a node the walk takes the sharpest
/// left turn, so regions that only touch at a vertex come out as separate
/// loops. A walk that comes back to a node it already passed closes that
/// part as its own loop, which keeps every loop free of repeated vertices.
/// A node with no outgoing link left means the fragments do not close,
/// which aborts the operation.
///
/// # Errors
///
/// Returns `OperationError::Inconsistent` if a walk reaches a dead end.
pub fn assemble_loops(fragments: &[(Vector, Vector)]) -> Result<Vec<Polygon>> {
    let mut merger = PointMerger::new(VECTOR_EPSILON);
    let mut successors: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut links = 0usize;

    for &(start, end) in fragments {
        let s = merger.get_or_insert(start);
        let e = merger.get_or_insert(end);
        if s == e {
            continue;
        }
        successors.entry(s).or_default().push(e);
        links += 1;
    }

    let mut loops = Vec::new();
    let mut steps = 0usize;
    loop {
        let Some(first) = successors
            .iter()
            .find(|(_, next)| !next.is_empty())
            .map(|(&id, _)| id)
        else {
            break;
        };

        let mut ids = vec![first];
        loop {
            let current = ids[ids.len() - 1];
            let incoming = ids
                .len()
                .checked_sub(2)
                .map(|k| merger.point(current) - merger.point(ids[k]));
            let next = successors
                .get_mut(&current)
                .and_then(|targets| take_sharpest_left(targets, &merger, current, incoming))
                .ok_or_else(|| {
                    OperationError::Inconsistent(format!(
                        "no outgoing edge at {}",
                        merger.point(current)
                    ))
                })?;
            steps += 1;
            if steps > links {
                return Err(OperationError::Inconsistent("edge walk does not close".into()).into());
            }
            if next == first {
                break;
            }
            if let Some(k) = ids.iter().position(|&id| id == next) {
                // Pinch: split off the part walked since the last visit.
                let mut cut = vec![merger.point(next)];
                cut.extend(ids.drain(k + 1..).map(|id| merger.point(id)));
                loops.push(Polygon::from_points(cut));
                continue;
            }
            ids.push(next);
        }

        loops.push(ids.into_iter().map(|id| merger.point(id)).collect());
    }

    Ok(loops)
}

/// Removes and returns the target turning furthest left from `incoming`.
/// Without an incoming direction the last target is taken; a reversal
/// ranks below every real turn.
fn take_sharpest_left(
    targets: &mut Vec<usize>,
    merger: &PointMerger,
    from: usize,
    incoming: Option<Vector>,
) -> Option<usize> {
    let Some(dir) = incoming else {
        return targets.pop();
    };
    let turn = |id: usize| {
        let out = merger.point(id) - merger.point(from);
        let angle = dir.cross(out).atan2(dir.dot(out));
        if angle >= std::f64::consts::PI - TOLERANCE {
            -std::f64::consts::PI
        } else {
            angle
        }
    };
    let best = (0..targets.len()).max_by(|&a, &b| turn(targets[a]).total_cmp(&turn(targets[b])))?;
    Some(targets.swap_remove(best))
}

/// Assigns stable ids to points, merging points closer than `cell_size`.
pub(crate) struct PointMerger {
    cell_size: f64,
    points: Vec<Vector>,
    map: HashMap<(i64, i64), Vec<usize>>,
}

impl PointMerger {
    pub(crate) fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            points: Vec::new(),
            map: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: Vector) -> (i64, i64) {
        let inv = 1.0 / self.cell_size;
        ((p.x * inv).floor() as i64, (p.y * inv).floor() as i64)
    }

    pub(crate) fn get_or_insert(&mut self, point: Vector) -> usize {
        let key = self.cell_key(point);

        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.map.get(&(key.0 + dx, key.1 + dy)) {
                    if let Some(&id) = ids.iter().find(|&&id| self.points[id] == point) {
                        return id;
                    }
                }
            }
        }

        let id = self.points.len();
        self.points.push(point);
        self.map.entry(key).or_default().push(id);
        id
    }

    pub(crate) fn point(&self, id: usize) -> Vector {
        self.points[id]
    }
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
    fn fragments_close_into_loop() {
        let fragments = [
            (v(0.0, 0.0), v(1.0, 0.0)),
            (v(1.0, 1.0), v(0.0, 1.0)),
            (v(1.0, 0.0), v(1.0, 1.0)),
            (v(0.0, 1.0), v(0.0, 0.0)),
        ];
        let loops = assemble_loops(&fragments).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_relative_eq!(loops[0].signed_area(), 1.0);
    }

    #[test]
    fn near_coincident_endpoints_merge() {
        let fragments = [
            (v(0.0, 0.0), v(2.0, 0.0)),
            (v(2.000_01, 0.0), v(0.0, 2.0)),
            (v(0.0, 2.0), v(0.0, 0.000_01)),
        ];
        let loops = assemble_loops(&fragments).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
    }

    #[test]
    fn separate_loops() {
        let fragments = [
            (v(0.0, 0.0), v(1.0, 0.0)),
            (v(1.0, 0.0), v(0.0, 1.0)),
            (v(0.0, 1.0), v(0.0, 0.0)),
            (v(5.0, 5.0), v(6.0, 5.0)),
            (v(6.0, 5.0), v(5.0, 6.0)),
            (v(5.0, 6.0), v(5.0, 5.0)),
        ];
        assert_eq!(assemble_loops(&fragments).unwrap().len(), 2);
    }

    #[test]
    fn figure_eight_splits_at_shared_vertex() {
        let fragments = [
            (v(0.0, 0.0), v(1.0, 0.0)),
            (v(1.0, 0.0), v(1.0, 1.0)),
            (v(1.0, 1.0), v(0.0, 1.0)),
            (v(0.0, 1.0), v(0.0, 0.0)),
            (v(1.0, 1.0), v(2.0, 1.0)),
            (v(2.0, 1.0), v(2.0, 2.0)),
            (v(2.0, 2.0), v(1.0, 2.0)),
            (v(1.0, 2.0), v(1.0, 1.0)),
        ];
        let loops = assemble_loops(&fragments).unwrap();
        assert_eq!(loops.len(), 2);
        for ring in &loops {
            assert_eq!(ring.len(), 4);
            assert_relative_eq!(ring.signed_area(), 1.0);
        }
    }

    #[test]
    fn revisited_node_closes_inner_loop() {
        // The sharpest left turn at (2, 0) leads into a side loop that
        // comes back to (2, 0) before the walk returns to (0, 0).
        let fragments = [
            (v(0.0, 0.0), v(2.0, 0.0)),
            (v(2.0, 0.0), v(1.0, 1.0)),
            (v(1.0, 1.0), v(0.0, 0.0)),
            (v(2.0, 0.0), v(0.5, 0.1)),
            (v(0.5, 0.1), v(1.0, 0.5)),
            (v(1.0, 0.5), v(2.0, 0.0)),
        ];
        let loops = assemble_loops(&fragments).unwrap();
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|ring| ring.len() == 3));
        assert_relative_eq!(loops[0].signed_area(), -0.325, epsilon = 1e-12);
        assert_relative_eq!(loops[1].signed_area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn open_chain_is_inconsistent() {
        let fragments = [(v(0.0, 0.0), v(1.0, 0.0)), (v(1.0, 0.0), v(1.0, 1.0))];
        assert!(matches!(
            assemble_loops(&fragments),
            Err(crate::PolynavError::Operation(OperationError::Inconsistent(_)))
        ));
    }
}
