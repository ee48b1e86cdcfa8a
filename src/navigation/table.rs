use super::cell::NavCell;

/// One entry of the all-pairs table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathEntry {
    /// Shortest known distance; `f64::INFINITY` when unreachable.
    pub distance: f64,
    /// Intermediate cell of the shortest route, `None` for a direct link.
    pub via: Option<usize>,
}

/// All-pairs shortest paths over the cell adjacency graph (Floyd-Warshall).
#[derive(Debug, Clone)]
pub struct PathTable {
    size: usize,
    entries: Vec<PathEntry>,
}

impl PathTable {
    /// Builds the table from the cells' neighbor links.
    ///
    /// Runs in `O(n^3)` for `n` cells.
    #[must_use]
    pub fn build(cells: &[NavCell]) -> Self {
        let n = cells.len();
        let mut entries = vec![
            PathEntry {
                distance: f64::INFINITY,
                via: None,
            };
            n * n
        ];

        for (i, cell) in cells.iter().enumerate() {
            entries[i * n + i].distance = 0.0;
            for neighbor in &cell.neighbors {
                let entry = &mut entries[i * n + neighbor.cell.index()];
                entry.distance = entry.distance.min(neighbor.distance);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = entries[i * n + k].distance;
                if d_ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let candidate = d_ik + entries[k * n + j].distance;
                    let entry = &mut entries[i * n + j];
                    if candidate < entry.distance {
                        entry.distance = candidate;
                        entry.via = Some(k);
                    }
                }
            }
        }

        Self { size: n, entries }
    }

    /// Number of cells covered by the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the table covers no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Entry for the pair `(from, to)`, or `None` for an out-of-range index.
    #[must_use]
    pub fn entry(&self, from: usize, to: usize) -> Option<PathEntry> {
        if from >= self.size || to >= self.size {
            return None;
        }
        Some(self.entries[from * self.size + to])
    }

    /// Shortest distance, or `None` if unreachable.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.entry(from, to)
            .map(|e| e.distance)
            .filter(|d| d.is_finite())
    }

    /// The cells of the shortest route from `from` to `to`, both included.
    ///
    /// Expands intermediate cells with an explicit stack, so the depth of the
    /// `via` chain never grows the call stack.
    #[must_use]
    pub fn route(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.distance(from, to)?;

        let mut route = vec![from];
        let mut pending = vec![(from, to)];
        while let Some((a, b)) = pending.pop() {
            if a == b {
                continue;
            }
            match self.entry(a, b)?.via {
                Some(k) => {
                    pending.push((k, b));
                    pending.push((a, k));
                }
                None => route.push(b),
            }
            if route.len() > self.size {
                return None;
            }
        }
        Some(route)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Polygon;
    use crate::math::Vector;
    use crate::navigation::cell::{CellId, Neighbor, Portal};

    /// Cells on a line, linked `i <-> i + 1` with the given weights.
    fn chain(weights: &[f64]) -> Vec<NavCell> {
        let mut cells: Vec<NavCell> = (0..=weights.len())
            .map(|i| NavCell::new(CellId(i), Polygon::new()))
            .collect();
        let portal = Portal {
            start: Vector::new(0.0, 0.0),
            end: Vector::new(0.0, 1.0),
        };
        for (i, &w) in weights.iter().enumerate() {
            cells[i].link(Neighbor {
                cell: CellId(i + 1),
                distance: w,
                portal,
            });
            cells[i + 1].link(Neighbor {
                cell: CellId(i),
                distance: w,
                portal,
            });
        }
        cells
    }

    #[test]
    fn diagonal_is_zero() {
        let table = PathTable::build(&chain(&[1.0, 2.0, 3.0]));
        for i in 0..table.len() {
            assert_relative_eq!(table.distance(i, i).unwrap(), 0.0);
            assert_eq!(table.route(i, i).unwrap(), vec![i]);
        }
    }

    #[test]
    fn chain_distances_accumulate() {
        let table = PathTable::build(&chain(&[1.0, 2.0, 3.0]));
        assert_relative_eq!(table.distance(0, 3).unwrap(), 6.0);
        assert_eq!(table.route(0, 3).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(table.route(3, 0).unwrap(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn triangle_inequality_holds() {
        let mut cells = chain(&[1.0, 1.0, 1.0, 1.0]);
        // Shortcut 0 <-> 4 that is longer than the chain.
        let portal = Portal {
            start: Vector::new(0.0, 0.0),
            end: Vector::new(1.0, 0.0),
        };
        cells[0].link(Neighbor { cell: CellId(4), distance: 5.0, portal });
        cells[4].link(Neighbor { cell: CellId(0), distance: 5.0, portal });
        let table = PathTable::build(&cells);
        let n = table.len();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let (ij, ik, kj) = (
                        table.distance(i, j).unwrap(),
                        table.distance(i, k).unwrap(),
                        table.distance(k, j).unwrap(),
                    );
                    assert!(ij <= ik + kj + 1e-12);
                }
            }
        }
        assert_relative_eq!(table.distance(0, 4).unwrap(), 4.0);
    }

    #[test]
    fn disconnected_cells_are_unreachable() {
        let mut cells = chain(&[1.0]);
        cells.push(NavCell::new(CellId(2), Polygon::new()));
        let table = PathTable::build(&cells);
        assert!(table.distance(0, 2).is_none());
        assert!(table.route(0, 2).is_none());
        assert!(table.entry(0, 9).is_none());
    }
}
