//! Cubic Bezier shaper
//!
//! The curve is pinned to `(0, 0)` and `(1, 1)`; only the two inner control
//! points move. Control points outside `[0, 1]` bend the curve past its
//! endpoints (overshoot), which is allowed.

use super::UnitShaper;

/// Cubic Bezier curve over the unit interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierUnitShaper {
    y2: f64,
    y3: f64,
}

impl BezierUnitShaper {
    const Y1: f64 = 0.0;
    const Y4: f64 = 1.0;

    /// Create a shaper from the two inner control points
    pub fn new(y2: f64, y3: f64) -> Self {
        Self { y2, y3 }
    }

    /// First control point
    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// Second control point
    pub fn y3(&self) -> f64 {
        self.y3
    }
}

impl UnitShaper for BezierUnitShaper {
    fn shape(&self, t: f64) -> f64 {
        let u = 1.0 - t;
        u * u * Self::Y1
            + 3.0 * u * u * t * self.y2
            + 3.0 * u * t * t * self.y3
            + t * t * t * Self::Y4
    }
}
