//! Optional diagnostic hook for visualizing intermediate geometry.
//!
//! Engines report interesting points (intersections, raw offset vertices,
//! cell centers) to a [`DebugSink`]. Sinks only observe; nothing they do can
//! change a computed result.

use crate::math::Vector;

/// RGB color attached to a diagnostic point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const RED: Self = Self(255, 0, 0);
    pub const GREEN: Self = Self(0, 255, 0);
    pub const BLUE: Self = Self(0, 0, 255);
    pub const YELLOW: Self = Self(255, 255, 0);
    pub const CYAN: Self = Self(0, 255, 255);
}

/// Receiver for labelled diagnostic points.
pub trait DebugSink {
    fn point(&mut self, point: Vector, color: Color, label: &str);
}

impl<F> DebugSink for F
where
    F: FnMut(Vector, Color, &str),
{
    fn point(&mut self, point: Vector, color: Color, label: &str) {
        self(point, color, label);
    }
}

/// Sink that forwards every point as a `tracing` event at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn point(&mut self, point: Vector, color: Color, label: &str) {
        tracing::trace!(x = point.x, y = point.y, ?color, label, "debug point");
    }
}

/// Reports to the sink if one is attached.
pub(crate) fn emit(sink: &mut Option<&mut dyn DebugSink>, point: Vector, color: Color, label: &str) {
    if let Some(sink) = sink.as_deref_mut() {
        sink.point(point, color, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: Vector, c: Color, label: &str| seen.push((p, c, label.to_owned()));
            let mut hook: Option<&mut dyn DebugSink> = Some(&mut sink);
            emit(&mut hook, Vector::new(1.0, 2.0), Color::RED, "a");
        }
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].2, "a");
    }

    #[test]
    fn missing_sink_is_ignored() {
        let mut hook: Option<&mut dyn DebugSink> = None;
        emit(&mut hook, Vector::new(0.0, 0.0), Color::BLUE, "ignored");
    }
}
