//! Animation progress clock
//!
//! A low frequency ramp that drives a voice from its start frequency to its
//! target. One ramp cycle is one full transition.

/// Default peak amplitude of the ramp; progress spans `[-0.5, 0.5)` before
/// it is offset into `[0, 1)`
pub const PROGRESS_AMPLITUDE: f64 = 0.5;

/// Repeating rising ramp at control rate
#[derive(Debug, Clone)]
pub struct ProgressClock {
    sample_rate: f64,
    frequency: f64,
    amplitude: f64,
    phase: f64,
    /// Set when the last step crossed the end of a cycle
    wrapped: bool,
}

impl ProgressClock {
    /// Create a new clock, stopped at the start of its ramp
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            frequency: 0.0,
            amplitude: PROGRESS_AMPLITUDE,
            phase: 0.0,
            wrapped: false,
        }
    }

    /// Set the cycle frequency in Hz
    ///
    /// Negative and non-finite rates stop the clock.
    pub fn set_frequency(&mut self, hz: f64) {
        self.frequency = if hz.is_finite() { hz.max(0.0) } else { 0.0 };
    }

    /// Get the cycle frequency
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Get the ramp amplitude
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Snap back to the start of the ramp
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.wrapped = false;
    }

    /// Whether the previous `process` call finished a cycle
    pub fn cycle_completed(&self) -> bool {
        self.wrapped
    }

    /// Next ramp value in `[-amplitude, amplitude)`
    pub fn process(&mut self) -> f64 {
        let value = (2.0 * self.phase - 1.0) * self.amplitude;

        self.phase += self.frequency / self.sample_rate;
        self.wrapped = self.phase >= 1.0;
        if self.wrapped {
            self.phase -= self.phase.floor();
        }

        value
    }

    /// Next ramp value offset into `[0, 2 * amplitude)`
    pub fn process_unipolar(&mut self) -> f64 {
        self.process() + self.amplitude
    }
}
