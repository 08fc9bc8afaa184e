//! Strongly typed scalar values
//!
//! Frequencies, sample rates and control points are all plain floats at
//! runtime. Wrapping each in its own tagged type keeps them from being
//! swapped at call sites.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// A single value tagged with a marker type
pub struct NamedType<T, Tag> {
    value: T,
    _tag: PhantomData<Tag>,
}

impl<T, Tag> NamedType<T, Tag> {
    /// Wrap a raw value
    pub const fn new(value: T) -> Self {
        Self {
            value,
            _tag: PhantomData,
        }
    }

    /// Unwrap into the raw value
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, Tag> NamedType<T, Tag> {
    /// Get the raw value
    pub fn get(&self) -> T {
        self.value
    }
}

// Manual impls so the tag type itself needs no bounds.
impl<T: Clone, Tag> Clone for NamedType<T, Tag> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: Copy, Tag> Copy for NamedType<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq for NamedType<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialOrd, Tag> PartialOrd for NamedType<T, Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: fmt::Debug, Tag> fmt::Debug for NamedType<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: fmt::Display, Tag> fmt::Display for NamedType<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: Default, Tag> Default for NamedType<T, Tag> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

pub enum OscillatorFrequencyTag {}
pub enum SampleRateTag {}
pub enum DetuneHzTag {}
pub enum AnimationMultiplierTag {}
pub enum ControlPoint1Tag {}
pub enum ControlPoint2Tag {}
pub enum OutputSampleTag {}

/// Frequency in Hz
pub type OscillatorFrequency = NamedType<f64, OscillatorFrequencyTag>;
/// Sample rate in Hz
pub type SampleRate = NamedType<f64, SampleRateTag>;
/// Spacing between neighbouring oscillators in the detune ladder, in Hz
pub type DetuneHz = NamedType<f64, DetuneHzTag>;
/// Scales the animation LFO base rate
pub type AnimationMultiplier = NamedType<f64, AnimationMultiplierTag>;
/// First Bezier control point (y2)
pub type ControlPoint1 = NamedType<f64, ControlPoint1Tag>;
/// Second Bezier control point (y3)
pub type ControlPoint2 = NamedType<f64, ControlPoint2Tag>;
/// One summed output sample of a voice
pub type OutputSample = NamedType<f64, OutputSampleTag>;
