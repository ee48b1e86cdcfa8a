use crate::debug::{emit, Color, DebugSink};
use crate::math::intersect_2d::ring_edges;
use crate::math::Vector;

use super::tip::TipDecorator;

/// An edge shifted along its outward normal, with its unit direction.
struct OffsetSeg {
    start: Vector,
    end: Vector,
    dir: Vector,
}

/// Builds the raw (untrimmed) offset ring of one closed polygon.
///
/// Every edge is moved by `amount` along its right-hand normal, which points
/// away from the filled area for counter-clockwise islands and into the gap
/// for clockwise holes. Consecutive shifted edges are joined directly where
/// they overlap. Where they separate, the tip decorator decides the points
/// that close the gap.
///
/// Zero-length edges are skipped; a polygon left with fewer than three
/// edges yields an empty ring.
pub fn build(
    points: &[Vector],
    amount: f64,
    tip: &dyn TipDecorator,
    sink: &mut Option<&mut dyn DebugSink>,
) -> Vec<Vector> {
    // Phase A: Shift every edge.
    let segs: Vec<OffsetSeg> = ring_edges(points)
        .filter_map(|(p, q)| {
            let dir = (q - p).normalize()?;
            let shift = dir.right_normal() * amount;
            Some(OffsetSeg {
                start: p + shift,
                end: q + shift,
                dir,
            })
        })
        .collect();
    if segs.len() < 3 {
        return Vec::new();
    }

    // Phase B: Chain the shifted edges, decorating corners that open a gap.
    let mut ring = Vec::with_capacity(segs.len() * 3);
    for (i, seg) in segs.iter().enumerate() {
        let next = &segs[(i + 1) % segs.len()];
        ring.push(seg.start);
        ring.push(seg.end);

        let turn = seg.dir.cross(next.dir);
        if turn * amount > 0.0 {
            ring.extend(tip.decorate(seg.start, seg.end, next.start, next.end, turn > 0.0));
        }
    }

    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    for &p in &ring {
        emit(sink, p, Color::CYAN, "raw offset");
    }
    ring
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::polygon_2d::signed_area_2d;
    use crate::operations::offset::tip::{FlatTip, PointyTip};

    fn square(size: f64) -> Vec<Vector> {
        vec![
            Vector::new(0.0, 0.0),
            Vector::new(size, 0.0),
            Vector::new(size, size),
            Vector::new(0.0, size),
        ]
    }

    #[test]
    fn grow_square_pointy() {
        let ring = build(&square(10.0), 1.0, &PointyTip, &mut None);
        // Each edge keeps two shifted endpoints plus one miter corner.
        assert_eq!(ring.len(), 12);
        assert!(ring.contains(&Vector::new(11.0, -1.0)));
        assert_relative_eq!(signed_area_2d(&ring), 144.0, epsilon = 1e-9);
    }

    #[test]
    fn grow_square_flat() {
        let ring = build(&square(10.0), 1.0, &FlatTip, &mut None);
        assert_eq!(ring.len(), 8);
        assert_relative_eq!(signed_area_2d(&ring), 142.0, epsilon = 1e-9);
    }

    #[test]
    fn shrink_leaves_crossing_corners() {
        let ring = build(&square(10.0), -1.0, &PointyTip, &mut None);
        assert_eq!(ring.len(), 8);
        assert_eq!(ring[0], Vector::new(0.0, 1.0));
        assert_eq!(ring[1], Vector::new(10.0, 1.0));
    }

    #[test]
    fn collapsed_polygon_is_empty() {
        let pts = [Vector::new(0.0, 0.0), Vector::new(1.0, 0.0), Vector::new(1.0, 0.0)];
        assert!(build(&pts, 1.0, &PointyTip, &mut None).is_empty());
    }
}
