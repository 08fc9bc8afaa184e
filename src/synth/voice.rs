//! Deep Note voice
//!
//! A bank of detuned oscillators whose shared frequency glides from a start
//! pitch to a target pitch, then holds. The glide is driven by a ramp LFO,
//! reshaped by a Bezier curve and scaled into the span between the two
//! pitches.
//!
//! The state machine moves through three states:
//!
//! ```text
//!   set_target_frequency
//!          |
//!          v
//!   PendingTransitToTarget --process--> InTransitToTarget --arrived--> AtTarget
//!          ^                                                              |
//!          +------------------- set_target_frequency --------------------+
//! ```
//!
//! Re-targeting is allowed in any state and always restarts the glide from
//! the frequency the voice is currently sounding.
//!
//! `process` is real-time safe: no allocation, locking, logging or I/O.

use super::bank::OscillatorBank;
use super::trace::{NoTrace, TraceEvent, VoiceObserver};
use super::{ProgressClock, Waveform};
use crate::error::VoiceError;
use crate::mapping::{BezierUnitShaper, Range, Scaler, UnitShaper};
use crate::types::{
    AnimationMultiplier, ControlPoint1, ControlPoint2, DetuneHz, OscillatorFrequency,
    OutputSample, SampleRate,
};

/// Detune ladder spacing used by [`init_voice`]
pub const DEFAULT_DETUNE_HZ: f64 = 2.5;

/// How close to the target a glide must get before it snaps and holds
pub const DEFAULT_ARRIVAL_TOLERANCE_HZ: f64 = 1.0;

/// Where a voice is in its glide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// A new target was set; the glide starts on the next sample
    PendingTransitToTarget,
    /// Gliding toward the target
    InTransitToTarget,
    /// Holding the target frequency
    AtTarget,
}

impl VoiceState {
    /// Stable numeric code, used in traces
    pub fn code(self) -> u8 {
        match self {
            VoiceState::PendingTransitToTarget => 0,
            VoiceState::InTransitToTarget => 1,
            VoiceState::AtTarget => 2,
        }
    }
}

/// One gliding bank of detuned oscillators
#[derive(Debug, Clone)]
pub struct DeepnoteVoice {
    state: VoiceState,
    start_frequency: f64,
    target_frequency: f64,
    current_frequency: f64,
    sample_rate: f64,
    lfo_base_frequency: f64,
    arrival_tolerance: f64,
    clock: ProgressClock,
    bank: OscillatorBank,
}

impl DeepnoteVoice {
    /// Build a voice resting at `start_frequency`
    ///
    /// The voice starts out pending with start, target and current frequency
    /// all equal, so its first processed sample settles it at rest.
    pub fn init(
        oscillator_count: usize,
        start_frequency: OscillatorFrequency,
        sample_rate: SampleRate,
        lfo_base_frequency: OscillatorFrequency,
        detune: DetuneHz,
    ) -> Result<Self, VoiceError> {
        let sample_rate = sample_rate.get();
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(VoiceError::InvalidSampleRate(sample_rate));
        }
        let start = check_frequency("start frequency", start_frequency.get())?;
        let lfo_base = check_frequency("animation base frequency", lfo_base_frequency.get())?;
        let detune = check_finite("detune", detune.get())?;

        let mut bank = OscillatorBank::new(oscillator_count, start, sample_rate)?;
        bank.detune_oscillators(detune);

        log::debug!(
            "voice init: {} oscillators at {} Hz, sample rate {}, animation {} Hz, detune {} Hz",
            oscillator_count,
            start,
            sample_rate,
            lfo_base,
            detune
        );

        Ok(Self {
            state: VoiceState::PendingTransitToTarget,
            start_frequency: start,
            target_frequency: start,
            current_frequency: start,
            sample_rate,
            lfo_base_frequency: lfo_base,
            arrival_tolerance: DEFAULT_ARRIVAL_TOLERANCE_HZ,
            clock: ProgressClock::new(sample_rate),
            bank,
        })
    }

    /// Start a new glide from the current frequency to `frequency`
    pub fn set_target_frequency(&mut self, frequency: OscillatorFrequency) -> Result<(), VoiceError> {
        let target = check_frequency("target frequency", frequency.get())?;
        self.start_frequency = self.current_frequency;
        self.target_frequency = target;
        self.state = VoiceState::PendingTransitToTarget;
        Ok(())
    }

    /// Move the base point of the current glide
    ///
    /// Does not change state; a voice holding its target keeps holding it.
    pub fn set_start_frequency(&mut self, frequency: OscillatorFrequency) -> Result<(), VoiceError> {
        self.start_frequency = check_frequency("start frequency", frequency.get())?;
        Ok(())
    }

    /// Respace the detune ladder
    ///
    /// Negative spacing mirrors the ladder; zero removes detuning.
    pub fn detune_oscillators(&mut self, detune: DetuneHz) -> Result<(), VoiceError> {
        let detune = check_finite("detune", detune.get())?;
        self.bank.detune_oscillators(detune);
        Ok(())
    }

    /// Set the un-multiplied animation rate
    pub fn set_lfo_base_freq(&mut self, frequency: OscillatorFrequency) -> Result<(), VoiceError> {
        self.lfo_base_frequency = check_frequency("animation base frequency", frequency.get())?;
        Ok(())
    }

    /// Set how close to the target counts as arrived, in Hz
    pub fn set_arrival_tolerance(&mut self, tolerance_hz: f64) -> Result<(), VoiceError> {
        self.arrival_tolerance = check_frequency("arrival tolerance", tolerance_hz)?;
        Ok(())
    }

    /// Change the waveform of every oscillator
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.bank.set_waveform(waveform);
    }

    pub fn waveform(&self) -> Waveform {
        self.bank.waveform()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_at_target(&self) -> bool {
        self.state == VoiceState::AtTarget
    }

    pub fn current_frequency(&self) -> OscillatorFrequency {
        OscillatorFrequency::new(self.current_frequency)
    }

    pub fn start_frequency(&self) -> OscillatorFrequency {
        OscillatorFrequency::new(self.start_frequency)
    }

    pub fn target_frequency(&self) -> OscillatorFrequency {
        OscillatorFrequency::new(self.target_frequency)
    }

    pub fn lfo_base_freq(&self) -> OscillatorFrequency {
        OscillatorFrequency::new(self.lfo_base_frequency)
    }

    pub fn sample_rate(&self) -> SampleRate {
        SampleRate::new(self.sample_rate)
    }

    pub fn oscillator_count(&self) -> usize {
        self.bank.count()
    }

    pub fn detune(&self) -> DetuneHz {
        DetuneHz::new(self.bank.detune_hz())
    }

    pub fn arrival_tolerance(&self) -> f64 {
        self.arrival_tolerance
    }

    /// Detune offset of every active oscillator, in Hz
    pub fn detune_amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.bank.detune_amounts()
    }

    /// Produce one output sample
    pub fn process(
        &mut self,
        multiplier: AnimationMultiplier,
        cp1: ControlPoint1,
        cp2: ControlPoint2,
    ) -> OutputSample {
        self.process_observed(multiplier, cp1, cp2, &mut NoTrace)
    }

    /// Produce one output sample and report the voice internals to `observer`
    pub fn process_observed<O>(
        &mut self,
        multiplier: AnimationMultiplier,
        cp1: ControlPoint1,
        cp2: ControlPoint2,
        observer: &mut O,
    ) -> OutputSample
    where
        O: VoiceObserver + ?Sized,
    {
        let in_state = self.state;

        if self.state == VoiceState::PendingTransitToTarget {
            self.clock.reset();
            self.state = VoiceState::InTransitToTarget;
        }

        let mut lfo_value = 0.0;
        let mut shaped_value = 1.0;
        let mut computed_frequency = self.target_frequency;

        if self.state == VoiceState::InTransitToTarget {
            self.clock
                .set_frequency(self.lfo_base_frequency * sanitize_multiplier(multiplier.get()));
            lfo_value = self.clock.process_unipolar();

            shaped_value = BezierUnitShaper::new(cp1.get(), cp2.get()).shape(lfo_value);
            if self.start_frequency > self.target_frequency {
                shaped_value = 1.0 - shaped_value;
            }

            let range = Range::new(self.start_frequency, self.target_frequency);
            computed_frequency = Scaler::new(Range::unit(), range).scale(shaped_value);

            let arrived =
                (computed_frequency - self.target_frequency).abs() <= self.arrival_tolerance;
            // Out-of-range progress means the curve overshot; NaN lands here too.
            let overshot = !Range::unit().contains(shaped_value) || !computed_frequency.is_finite();

            if arrived || overshot || self.clock.cycle_completed() {
                self.current_frequency = self.target_frequency;
                self.state = VoiceState::AtTarget;
            } else {
                self.current_frequency = range.constrain(computed_frequency);
            }
        } else {
            self.current_frequency = self.target_frequency;
        }

        let output = self.bank.process(self.current_frequency);

        observer.observe(&TraceEvent {
            start_frequency: self.start_frequency,
            target_frequency: self.target_frequency,
            in_state,
            out_state: self.state,
            lfo_value,
            shaped_value,
            computed_frequency,
            frequency: self.current_frequency,
            output,
        });

        OutputSample::new(output)
    }
}

/// Build a voice with the default detune spacing
pub fn init_voice(
    oscillator_count: usize,
    start_frequency: OscillatorFrequency,
    sample_rate: SampleRate,
    lfo_base_frequency: OscillatorFrequency,
) -> Result<DeepnoteVoice, VoiceError> {
    DeepnoteVoice::init(
        oscillator_count,
        start_frequency,
        sample_rate,
        lfo_base_frequency,
        DetuneHz::new(DEFAULT_DETUNE_HZ),
    )
}

/// Produce one output sample from `voice`
pub fn process_voice(
    voice: &mut DeepnoteVoice,
    multiplier: AnimationMultiplier,
    cp1: ControlPoint1,
    cp2: ControlPoint2,
) -> OutputSample {
    voice.process(multiplier, cp1, cp2)
}

fn check_frequency(name: &'static str, value: f64) -> Result<f64, VoiceError> {
    let value = check_finite(name, value)?;
    if value < 0.0 {
        return Err(VoiceError::NegativeFrequency { name, value });
    }
    Ok(value)
}

fn check_finite(name: &'static str, value: f64) -> Result<f64, VoiceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VoiceError::NonFiniteValue { name, value })
    }
}

fn sanitize_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        0.0
    }
}
