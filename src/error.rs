//! Voice configuration errors

use thiserror::Error;

/// Rejected voice configuration
///
/// Raised only by initialisation and setters, never while processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoiceError {
    #[error("oscillator count must be between 1 and {max}, got {count}")]
    InvalidOscillatorCount { count: usize, max: usize },

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("{name} must not be negative, got {value}")]
    NegativeFrequency { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFiniteValue { name: &'static str, value: f64 },
}
