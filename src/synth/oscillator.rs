//! Raw waveform oscillator
//!
//! The voice treats this as a black box: set a frequency, pull a sample.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Triangle,
    /// Naive sawtooth, falling from +1 to -1
    Saw,
    /// Naive rising ramp, -1 to +1
    Ramp,
    Square,
    /// Band-limited sawtooth
    PolyBlepSaw,
    /// Band-limited square
    PolyBlepSquare,
}

/// A phase-accumulating oscillator
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f64,
    frequency: f64,
    amplitude: f64,
    sample_rate: f64,
    /// Phase increment per sample, derived from frequency and sample rate
    increment: f64,
}

impl Oscillator {
    /// Create a new oscillator
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        let mut osc = Self {
            waveform,
            phase: 0.0,
            frequency: 0.0,
            amplitude: 1.0,
            sample_rate,
            increment: 0.0,
        };
        osc.set_frequency(frequency);
        osc
    }

    /// Set the frequency in Hz
    ///
    /// Negative frequencies run the phase backwards. Non-finite values
    /// silence the phase advance.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        let increment = frequency / self.sample_rate;
        self.increment = if increment.is_finite() { increment } else { 0.0 };
    }

    /// Get the current frequency
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Set the peak amplitude
    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    /// Get the peak amplitude
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Set the waveform
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Get the waveform
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Reset the phase
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Current phase in `[0, 1)`
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Generate the next sample
    pub fn process(&mut self) -> f64 {
        let p = self.phase;
        let dt = self.increment.abs().min(0.5);

        let sample = match self.waveform {
            Waveform::Sine => (p * 2.0 * PI).sin(),
            Waveform::Triangle => {
                if p < 0.25 {
                    4.0 * p
                } else if p < 0.75 {
                    2.0 - 4.0 * p
                } else {
                    4.0 * p - 4.0
                }
            }
            Waveform::Saw => 1.0 - 2.0 * p,
            Waveform::Ramp => 2.0 * p - 1.0,
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::PolyBlepSaw => (2.0 * p - 1.0) - poly_blep(p, dt),
            Waveform::PolyBlepSquare => {
                let naive = if p < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(p, dt) - poly_blep((p + 0.5) % 1.0, dt)
            }
        };

        self.phase += self.increment;
        self.phase -= self.phase.floor();
        if self.phase >= 1.0 {
            // tiny negative phases round up to exactly 1.0
            self.phase = 0.0;
        }

        sample * self.amplitude
    }
}

/// Polynomial band-limited step correction around a phase discontinuity
fn poly_blep(t: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_oscillator() {
        let mut osc = Oscillator::new(Waveform::Sine, 440.0, 44100.0);

        // First sample should be 0 (sin(0))
        let sample = osc.process();
        assert!((sample - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_square_oscillator() {
        let mut osc = Oscillator::new(Waveform::Square, 1.0, 4.0);

        // 4 samples per cycle at 1 Hz, 4 Hz sample rate
        assert_eq!(osc.process(), 1.0); // phase 0.0
        assert_eq!(osc.process(), 1.0); // phase 0.25
        assert_eq!(osc.process(), -1.0); // phase 0.5
        assert_eq!(osc.process(), -1.0); // phase 0.75
    }

    #[test]
    fn test_ramp_oscillator() {
        let mut osc = Oscillator::new(Waveform::Ramp, 1.0, 4.0);

        assert_eq!(osc.process(), -1.0);
        assert_eq!(osc.process(), -0.5);
        assert_eq!(osc.process(), 0.0);
        assert_eq!(osc.process(), 0.5);
        assert_eq!(osc.process(), -1.0); // wrapped
    }

    #[test]
    fn test_saw_falls() {
        let mut osc = Oscillator::new(Waveform::Saw, 1.0, 4.0);

        assert_eq!(osc.process(), 1.0);
        assert_eq!(osc.process(), 0.5);
    }

    #[test]
    fn test_amplitude() {
        let mut osc = Oscillator::new(Waveform::Square, 1.0, 4.0);
        osc.set_amplitude(0.5);
        assert_eq!(osc.process(), 0.5);
    }

    #[test]
    fn test_frequency_change() {
        let mut osc = Oscillator::new(Waveform::Sine, 440.0, 44100.0);
        assert_eq!(osc.frequency(), 440.0);

        osc.set_frequency(880.0);
        assert_eq!(osc.frequency(), 880.0);
    }

    #[test]
    fn test_polyblep_saw_is_bounded() {
        let mut osc = Oscillator::new(Waveform::PolyBlepSaw, 440.0, 48000.0);
        for _ in 0..48000 {
            let sample = osc.process();
            assert!((-1.0..=1.0).contains(&sample), "sample out of range: {}", sample);
        }
    }

    #[test]
    fn test_phase_stays_wrapped_for_extreme_frequencies() {
        for frequency in [-1000.0, 0.0, 0.001, 24000.0, 30000.0, 96000.0, 250000.0] {
            let mut osc = Oscillator::new(Waveform::PolyBlepSaw, frequency, 48000.0);
            for _ in 0..1000 {
                let sample = osc.process();
                assert!(sample.is_finite());
                assert!(sample.abs() <= 2.0, "{} Hz gave {}", frequency, sample);
                assert!((0.0..1.0).contains(&osc.phase()));
            }
        }
    }

    #[test]
    fn test_non_finite_frequency_is_silenced() {
        let mut osc = Oscillator::new(Waveform::PolyBlepSaw, 440.0, 48000.0);
        osc.set_frequency(f64::NAN);
        for _ in 0..10 {
            assert!(osc.process().is_finite());
        }
    }
}
