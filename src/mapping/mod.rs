//! Ranges, scaling and progress shaping
//!
//! The numeric building blocks the voice uses to turn animation progress
//! into a frequency.

mod bezier;
mod linear;
mod range;
mod scaler;
mod shaper;

pub use bezier::BezierUnitShaper;
pub use linear::LinearUnitShaper;
pub use range::Range;
pub use scaler::Scaler;
pub use shaper::UnitShaper;
