//! Closed numeric interval

/// An immutable closed interval with `low <= high`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    low: f64,
    high: f64,
}

impl Range {
    /// Create a range from two bounds in either order
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The unit interval `[0, 1]`
    pub fn unit() -> Self {
        Self { low: 0.0, high: 1.0 }
    }

    /// Lower bound
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Distance between the bounds, never negative
    pub fn length(&self) -> f64 {
        self.high - self.low
    }

    /// Whether `value` lies inside the interval, bounds included
    ///
    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Clamp `value` into the interval
    pub fn constrain(&self, value: f64) -> f64 {
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }
}
