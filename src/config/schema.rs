//! Configuration schema definitions

use crate::synth::{
    FrequencySpec, Waveform, DEFAULT_ARRIVAL_TOLERANCE_HZ, DEFAULT_DETUNE_HZ, MAX_OSCILLATORS,
};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for a Deep Note render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepnoteConfig {
    /// Audio output settings
    pub audio: AudioConfig,

    /// Master settings
    #[serde(default)]
    pub master: MasterConfig,

    /// Glide animation shared by all voices
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Voices, each a bank of detuned oscillators
    pub voices: Vec<VoiceConfig>,

    /// Frequency table: one row per chord, one column per voice (wrapping)
    #[serde(default)]
    pub chords: Vec<Vec<FrequencySpec>>,

    /// When to glide to which chord
    #[serde(default)]
    pub cues: Vec<CueConfig>,

    /// Seed for random start and chord pitches (None = from entropy)
    pub seed: Option<u64>,
}

impl DeepnoteConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate audio settings
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }
        if !(self.audio.duration_secs.is_finite() && self.audio.duration_secs > 0.0) {
            bail!("Duration must be a positive number of seconds");
        }

        // Validate master settings
        if !(0.0..=1.0).contains(&self.master.volume) {
            bail!("Master volume must be between 0.0 and 1.0");
        }

        // Validate animation settings
        let animation = &self.animation;
        if !(animation.base_frequency.is_finite() && animation.base_frequency >= 0.0) {
            bail!("Animation base frequency must not be negative");
        }
        if !(animation.multiplier.is_finite() && animation.multiplier >= 0.0) {
            bail!("Animation multiplier must not be negative");
        }
        if !animation.control_point_1.is_finite() || !animation.control_point_2.is_finite() {
            bail!("Control points must be finite");
        }
        if !animation.detune.is_finite() {
            bail!("Detune must be finite");
        }
        if !(animation.arrival_tolerance.is_finite() && animation.arrival_tolerance >= 0.0) {
            bail!("Arrival tolerance must not be negative");
        }

        // Validate voices
        if self.voices.is_empty() {
            bail!("At least one voice is required");
        }
        for (i, voice) in self.voices.iter().enumerate() {
            if voice.oscillators == 0 || voice.oscillators > MAX_OSCILLATORS {
                bail!(
                    "Voice {} must have between 1 and {} oscillators",
                    i,
                    MAX_OSCILLATORS
                );
            }
            check_spec(&voice.start, &format!("voice {} start", i))?;
        }

        // Validate chords and the cues that reference them
        for (i, chord) in self.chords.iter().enumerate() {
            if chord.is_empty() {
                bail!("Chord {} is empty", i);
            }
            for spec in chord {
                check_spec(spec, &format!("chord {}", i))?;
            }
        }
        for cue in &self.cues {
            if cue.chord >= self.chords.len() {
                bail!("Cue at {}s references unknown chord {}", cue.at_secs, cue.chord);
            }
            if !(cue.at_secs.is_finite() && cue.at_secs >= 0.0) {
                bail!("Cue time must not be negative");
            }
        }

        Ok(())
    }

    /// Cues ordered by time
    pub fn sorted_cues(&self) -> Vec<CueConfig> {
        let mut cues = self.cues.clone();
        cues.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        cues
    }
}

fn check_spec(spec: &FrequencySpec, what: &str) -> Result<()> {
    let range = spec.range();
    if !range.low().is_finite() || !range.high().is_finite() {
        bail!("Frequency for {} must be finite", what);
    }
    if range.low() < 0.0 {
        bail!("Frequency for {} must not be negative", what);
    }
    Ok(())
}

/// Audio output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 48000)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Render length in seconds (default: 10)
    #[serde(default = "default_duration")]
    pub duration_secs: f64,
}

fn default_sample_rate() -> u32 { 48000 }
fn default_duration() -> f64 { 10.0 }

/// Master settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterConfig {
    /// Master volume 0.0-1.0 applied to the voice sum (default: 0.05)
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_volume() -> f64 { 0.05 }

impl Default for MasterConfig {
    fn default() -> Self {
        Self { volume: default_volume() }
    }
}

/// Glide animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Animation LFO rate in Hz; one cycle is one full glide (default: 0.25)
    #[serde(default = "default_base_frequency")]
    pub base_frequency: f64,

    /// Multiplier on the base rate (default: 1.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// First Bezier control point (default: 0.08)
    #[serde(default = "default_control_point_1")]
    pub control_point_1: f64,

    /// Second Bezier control point (default: 0.5)
    #[serde(default = "default_control_point_2")]
    pub control_point_2: f64,

    /// Detune ladder spacing in Hz (default: 2.5)
    #[serde(default = "default_detune")]
    pub detune: f64,

    /// Distance from the target that counts as arrived, in Hz (default: 1.0)
    #[serde(default = "default_arrival_tolerance")]
    pub arrival_tolerance: f64,
}

fn default_base_frequency() -> f64 { 0.25 }
fn default_multiplier() -> f64 { 1.0 }
fn default_control_point_1() -> f64 { 0.08 }
fn default_control_point_2() -> f64 { 0.5 }
fn default_detune() -> f64 { DEFAULT_DETUNE_HZ }
fn default_arrival_tolerance() -> f64 { DEFAULT_ARRIVAL_TOLERANCE_HZ }

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            base_frequency: default_base_frequency(),
            multiplier: default_multiplier(),
            control_point_1: default_control_point_1(),
            control_point_2: default_control_point_2(),
            detune: default_detune(),
            arrival_tolerance: default_arrival_tolerance(),
        }
    }
}

/// A single voice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Oscillators in the bank, 1-16 (default: 3)
    #[serde(default = "default_oscillators")]
    pub oscillators: usize,

    /// Starting pitch: fixed Hz or a `{low, high}` range to draw from
    pub start: FrequencySpec,

    /// Oscillator waveform (default: band-limited saw)
    #[serde(default)]
    pub waveform: Option<Waveform>,
}

fn default_oscillators() -> usize { 3 }

/// Glide every voice to a chord at a given time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CueConfig {
    /// Time in seconds from the start of the render
    pub at_secs: f64,

    /// Row of `chords` to glide to
    pub chord: usize,
}
