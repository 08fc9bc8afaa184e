//! Unit shaper trait

/// Reshapes linear progress in `[0, 1]`
///
/// Implementations are pure: the same input always yields the same output.
/// Inputs outside `[0, 1]` are allowed and must not panic.
pub trait UnitShaper {
    /// Shape a progress value
    fn shape(&self, value: f64) -> f64;
}
