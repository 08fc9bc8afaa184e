//! Render engine
//!
//! Owns every voice of a configuration, applies chords and mixes the voices
//! down to one channel.

mod csv_trace;
mod recorder;

pub use csv_trace::CsvTrace;
pub use recorder::Recorder;

use crate::config::DeepnoteConfig;
use crate::synth::{DeepnoteVoice, FrequencyTable, NoTrace, VoiceObserver};
use crate::types::{
    AnimationMultiplier, ControlPoint1, ControlPoint2, DetuneHz, OscillatorFrequency, SampleRate,
};
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A set of Deep Note voices mixed together
pub struct Engine {
    voices: Vec<DeepnoteVoice>,
    chords: FrequencyTable,
    rng: StdRng,
    sample_rate: f64,
    volume: f64,
    multiplier: AnimationMultiplier,
    cp1: ControlPoint1,
    cp2: ControlPoint2,
    samples_processed: u64,
}

impl Engine {
    /// Build every voice described by `config`
    pub fn new(config: &DeepnoteConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let sample_rate = config.audio.sample_rate as f64;
        let animation = &config.animation;

        let mut voices = Vec::with_capacity(config.voices.len());
        for voice_config in &config.voices {
            let start = voice_config.start.resolve(&mut rng);
            let mut voice = DeepnoteVoice::init(
                voice_config.oscillators,
                start,
                SampleRate::new(sample_rate),
                OscillatorFrequency::new(animation.base_frequency),
                DetuneHz::new(animation.detune),
            )?;
            voice.set_arrival_tolerance(animation.arrival_tolerance)?;
            if let Some(waveform) = voice_config.waveform {
                voice.set_waveform(waveform);
            }
            voices.push(voice);
        }

        log::info!(
            "engine ready: {} voices, {} oscillators total",
            voices.len(),
            voices.iter().map(|v| v.oscillator_count()).sum::<usize>()
        );

        Ok(Self {
            voices,
            chords: FrequencyTable::new(config.chords.clone()),
            rng,
            sample_rate,
            volume: config.master.volume,
            multiplier: AnimationMultiplier::new(animation.multiplier),
            cp1: ControlPoint1::new(animation.control_point_1),
            cp2: ControlPoint2::new(animation.control_point_2),
            samples_processed: 0,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// All voices, in configuration order
    pub fn voices(&self) -> &[DeepnoteVoice] {
        &self.voices
    }

    /// Number of samples generated so far
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Whether every voice is holding its target
    pub fn all_at_target(&self) -> bool {
        self.voices.iter().all(DeepnoteVoice::is_at_target)
    }

    /// Retarget every voice to its pitch in chord `row`
    pub fn apply_chord(&mut self, row: usize) -> Result<()> {
        if self.chords.is_empty() {
            bail!("no chords configured");
        }
        for (i, voice) in self.voices.iter_mut().enumerate() {
            if let Some(frequency) = self.chords.get(row, i, &mut self.rng) {
                voice.set_target_frequency(frequency)?;
            }
        }
        log::info!(
            "chord {} applied at {:.2}s",
            row,
            self.samples_processed as f64 / self.sample_rate
        );
        Ok(())
    }

    /// Generate the next sample (mix of all voices)
    pub fn process(&mut self) -> f64 {
        self.process_traced(usize::MAX, &mut NoTrace)
    }

    /// Generate the next sample, reporting voice `traced` to `observer`
    pub fn process_traced<O>(&mut self, traced: usize, observer: &mut O) -> f64
    where
        O: VoiceObserver + ?Sized,
    {
        let mut output = 0.0;
        for (i, voice) in self.voices.iter_mut().enumerate() {
            let sample = if i == traced {
                voice.process_observed(self.multiplier, self.cp1, self.cp2, observer)
            } else {
                voice.process(self.multiplier, self.cp1, self.cp2)
            };
            output += sample.get();
        }
        self.samples_processed += 1;

        // Apply master volume
        output * self.volume
    }
}
