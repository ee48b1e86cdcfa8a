use crate::geometry::Polygon;

/// Travel cost between two adjacent cells. Must be non-negative.
pub trait CellDistance {
    fn distance(&self, a: &Polygon, b: &Polygon) -> f64;
}

impl<F> CellDistance for F
where
    F: Fn(&Polygon, &Polygon) -> f64,
{
    fn distance(&self, a: &Polygon, b: &Polygon) -> f64 {
        self(a, b)
    }
}

/// Euclidean distance between the cell centroids.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentroidDistance;

impl CellDistance for CentroidDistance {
    fn distance(&self, a: &Polygon, b: &Polygon) -> f64 {
        (a.centroid() - b.centroid()).length()
    }
}
