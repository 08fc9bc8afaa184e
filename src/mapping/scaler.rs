//! Linear rescaling between ranges

use super::Range;

/// Maps values from an input range onto an output range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    input: Range,
    output: Range,
}

impl Scaler {
    /// Create a scaler from `input` to `output`
    pub fn new(input: Range, output: Range) -> Self {
        Self { input, output }
    }

    /// Create a scaler that normalizes `input` to `[0, 1]`
    pub fn to_unit(input: Range) -> Self {
        Self::new(input, Range::unit())
    }

    /// The input range
    pub fn input(&self) -> Range {
        self.input
    }

    /// The output range
    pub fn output(&self) -> Range {
        self.output
    }

    /// Rescale `value`
    ///
    /// Values outside the input range extrapolate. A zero-width input range
    /// maps everything to `output.low()`.
    pub fn scale(&self, value: f64) -> f64 {
        self.normalize(value) * self.output.length() + self.output.low()
    }

    fn normalize(&self, value: f64) -> f64 {
        let length = self.input.length();
        if length == 0.0 {
            return 0.0;
        }
        (value - self.input.low()) / length
    }
}
