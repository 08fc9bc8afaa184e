//! Per-sample voice observation
//!
//! A voice can hand a snapshot of its internals to an observer after every
//! processed sample. Observation is a side channel and never feeds back into
//! the audio.

use super::VoiceState;

/// Snapshot of one `process` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEvent {
    pub start_frequency: f64,
    pub target_frequency: f64,
    pub in_state: VoiceState,
    pub out_state: VoiceState,
    /// Raw animation progress before shaping, in `[0, 1)`
    pub lfo_value: f64,
    /// Progress after Bezier shaping and direction correction
    pub shaped_value: f64,
    /// Unclamped frequency produced by the scaler
    pub computed_frequency: f64,
    /// Frequency actually sent to the oscillator bank
    pub frequency: f64,
    pub output: f64,
}

/// Receives one [`TraceEvent`] per processed sample
pub trait VoiceObserver {
    fn observe(&mut self, event: &TraceEvent);
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl VoiceObserver for NoTrace {
    #[inline]
    fn observe(&mut self, _event: &TraceEvent) {}
}

impl<F> VoiceObserver for F
where
    F: FnMut(&TraceEvent),
{
    fn observe(&mut self, event: &TraceEvent) {
        self(event)
    }
}
