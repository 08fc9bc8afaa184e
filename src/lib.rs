//! Deep Note - Gliding voices of detuned oscillators
//!
//! Each voice is a bank of detuned oscillators whose pitch travels from a
//! start frequency to a target along a Bezier-shaped curve, driven by a
//! slow progress clock. An engine mixes many voices and renders them to WAV.

pub mod config;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod synth;
pub mod types;

pub use config::DeepnoteConfig;
pub use engine::Engine;
pub use error::VoiceError;
pub use synth::{init_voice, process_voice, DeepnoteVoice, VoiceState};
