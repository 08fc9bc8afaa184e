//! Bank of detuned oscillators
//!
//! Every oscillator follows the same base frequency, offset by its rung on a
//! symmetric detune ladder. Storage is a fixed array so the bank never
//! allocates once built.

use super::{Oscillator, Waveform};
use crate::error::VoiceError;

/// Upper bound on oscillators per bank
pub const MAX_OSCILLATORS: usize = 16;

#[derive(Debug, Clone)]
struct DetunedOscillator {
    oscillator: Oscillator,
    /// Offset from the bank frequency in Hz
    detune: f64,
}

/// Fixed-capacity set of oscillators sharing one frequency input
#[derive(Debug, Clone)]
pub struct OscillatorBank {
    slots: [DetunedOscillator; MAX_OSCILLATORS],
    count: usize,
    detune_hz: f64,
}

impl OscillatorBank {
    /// Create a bank of `count` band-limited saw oscillators
    pub fn new(count: usize, frequency: f64, sample_rate: f64) -> Result<Self, VoiceError> {
        if count == 0 || count > MAX_OSCILLATORS {
            return Err(VoiceError::InvalidOscillatorCount {
                count,
                max: MAX_OSCILLATORS,
            });
        }

        let slots = std::array::from_fn(|_| DetunedOscillator {
            oscillator: Oscillator::new(Waveform::PolyBlepSaw, frequency, sample_rate),
            detune: 0.0,
        });

        Ok(Self {
            slots,
            count,
            detune_hz: 0.0,
        })
    }

    /// Number of active oscillators
    pub fn count(&self) -> usize {
        self.count
    }

    /// Spacing of the detune ladder in Hz
    pub fn detune_hz(&self) -> f64 {
        self.detune_hz
    }

    /// Rebuild the detune ladder with `detune_hz` between rungs
    pub fn detune_oscillators(&mut self, detune_hz: f64) {
        self.detune_hz = detune_hz;
        let count = self.count;
        for (i, slot) in self.active_mut().iter_mut().enumerate() {
            slot.detune = ladder_rung(i, count) as f64 * detune_hz;
        }
    }

    /// Detune offsets of the active oscillators, in Hz
    pub fn detune_amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.slots[..self.count].iter().map(|slot| slot.detune)
    }

    /// Waveform shared by every oscillator
    pub fn waveform(&self) -> Waveform {
        self.slots[0].oscillator.waveform()
    }

    /// Switch every oscillator to `waveform`
    pub fn set_waveform(&mut self, waveform: Waveform) {
        for slot in self.active_mut() {
            slot.oscillator.set_waveform(waveform);
        }
    }

    /// Retune to `frequency` plus each offset and return the summed sample
    ///
    /// The sum is not normalized; callers attenuate.
    pub fn process(&mut self, frequency: f64) -> f64 {
        let mut sum = 0.0;
        for slot in self.active_mut() {
            slot.oscillator.set_frequency(frequency + slot.detune);
            sum += slot.oscillator.process();
        }
        sum
    }

    fn active_mut(&mut self) -> &mut [DetunedOscillator] {
        &mut self.slots[..self.count]
    }
}

/// Ladder position of oscillator `index` out of `count`
///
/// Rungs run from `-count / 2` upward and skip zero, so a bank of one is the
/// only one with an undetuned oscillator.
fn ladder_rung(index: usize, count: usize) -> i64 {
    if count <= 1 {
        return 0;
    }
    let rung = index as i64 - (count / 2) as i64;
    if rung >= 0 {
        rung + 1
    } else {
        rung
    }
}
