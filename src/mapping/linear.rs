//! Identity shaper

use super::UnitShaper;

/// Leaves progress untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearUnitShaper;

impl UnitShaper for LinearUnitShaper {
    fn shape(&self, value: f64) -> f64 {
        value
    }
}
