use crate::math::intersect_2d::intersect_line_line;
use crate::math::Vector;

/// Strategy for closing the gap an offset opens at a corner.
///
/// `a-b` is the offset segment entering the corner and `c-d` the one leaving
/// it. The returned points are inserted between `b` and `c`.
pub trait TipDecorator {
    fn decorate(&self, a: Vector, b: Vector, c: Vector, d: Vector, is_convex: bool) -> Vec<Vector>;
}

impl<F> TipDecorator for F
where
    F: Fn(Vector, Vector, Vector, Vector, bool) -> Vec<Vector>,
{
    fn decorate(&self, a: Vector, b: Vector, c: Vector, d: Vector, is_convex: bool) -> Vec<Vector> {
        self(a, b, c, d, is_convex)
    }
}

/// Miter join: extends both offset segments until their supporting lines meet.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointyTip;

impl TipDecorator for PointyTip {
    fn decorate(&self, a: Vector, b: Vector, c: Vector, d: Vector, _is_convex: bool) -> Vec<Vector> {
        intersect_line_line(a, b, c, d).into_iter().collect()
    }
}

/// Bevel join: leaves the corner cut by the straight edge `b-c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTip;

impl TipDecorator for FlatTip {
    fn decorate(&self, _a: Vector, _b: Vector, _c: Vector, _d: Vector, _is_convex: bool) -> Vec<Vector> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn pointy_meets_supporting_lines() {
        let tip = PointyTip.decorate(v(0.0, -1.0), v(10.0, -1.0), v(11.0, 0.0), v(11.0, 10.0), true);
        assert_eq!(tip, vec![v(11.0, -1.0)]);
    }

    #[test]
    fn pointy_on_parallel_segments_is_empty() {
        let tip = PointyTip.decorate(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0), true);
        assert!(tip.is_empty());
    }

    #[test]
    fn flat_adds_nothing() {
        assert!(FlatTip.decorate(v(0.0, -1.0), v(10.0, -1.0), v(11.0, 0.0), v(11.0, 10.0), true).is_empty());
    }

    #[test]
    fn closures_are_decorators() {
        let center = |_: Vector, b: Vector, c: Vector, _: Vector, _: bool| vec![b.midpoint(c)];
        assert_eq!(center.decorate(v(0.0, 0.0), v(2.0, 0.0), v(4.0, 2.0), v(4.0, 4.0), true), vec![v(3.0, 1.0)]);
    }
}
