//! Synthesis: oscillators, the animation clock and the Deep Note voice

mod bank;
mod frequency_table;
mod oscillator;
mod progress;
mod trace;
mod voice;

pub use bank::{OscillatorBank, MAX_OSCILLATORS};
pub use frequency_table::{FrequencySpec, FrequencyTable};
pub use oscillator::{Oscillator, Waveform};
pub use progress::{ProgressClock, PROGRESS_AMPLITUDE};
pub use trace::{NoTrace, TraceEvent, VoiceObserver};
pub use voice::{
    init_voice, process_voice, DeepnoteVoice, VoiceState, DEFAULT_ARRIVAL_TOLERANCE_HZ,
    DEFAULT_DETUNE_HZ,
};
