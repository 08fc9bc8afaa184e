//! Chord tables
//!
//! Rows are chords, columns are voices. Each cell is either a fixed pitch or
//! a range to draw a random pitch from, so a chord can be voiced slightly
//! differently every time it is applied.

use crate::mapping::Range;
use crate::types::OscillatorFrequency;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One table cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencySpec {
    /// Always this frequency, in Hz
    Fixed(f64),
    /// Uniformly random between the bounds, in Hz
    Between { low: f64, high: f64 },
}

impl FrequencySpec {
    /// The span this cell can produce
    pub fn range(&self) -> Range {
        match *self {
            FrequencySpec::Fixed(hz) => Range::new(hz, hz),
            FrequencySpec::Between { low, high } => Range::new(low, high),
        }
    }

    /// Pick a concrete frequency
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> OscillatorFrequency {
        let range = self.range();
        if range.length() > 0.0 {
            OscillatorFrequency::new(rng.gen_range(range.low()..=range.high()))
        } else {
            OscillatorFrequency::new(range.low())
        }
    }
}

/// A grid of frequencies indexed by chord and voice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    rows: Vec<Vec<FrequencySpec>>,
}

impl FrequencyTable {
    pub fn new(rows: Vec<Vec<FrequencySpec>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Frequency for `voice` in chord `row`
    ///
    /// Both indices wrap around the table, so a short chord repeats across
    /// many voices. Returns `None` only for an empty table or an empty row.
    pub fn get<R: Rng + ?Sized>(&self, row: usize, voice: usize, rng: &mut R) -> Option<OscillatorFrequency> {
        if self.rows.is_empty() {
            return None;
        }
        let chord = &self.rows[row % self.rows.len()];
        if chord.is_empty() {
            return None;
        }
        Some(chord[voice % chord.len()].resolve(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed(hz: f64) -> FrequencySpec {
        FrequencySpec::Fixed(hz)
    }

    #[test]
    fn test_table_lookup() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = FrequencyTable::new(vec![vec![fixed(1.0), fixed(2.0)], vec![fixed(3.0), fixed(4.0)]]);

        assert_eq!(table.get(0, 0, &mut rng), Some(OscillatorFrequency::new(1.0)));
        assert_eq!(table.get(0, 1, &mut rng), Some(OscillatorFrequency::new(2.0)));
        assert_eq!(table.get(1, 0, &mut rng), Some(OscillatorFrequency::new(3.0)));
        assert_eq!(table.get(1, 1, &mut rng), Some(OscillatorFrequency::new(4.0)));
    }

    #[test]
    fn test_table_indices_wrap() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = FrequencyTable::new(vec![vec![fixed(1.0), fixed(2.0)], vec![fixed(3.0), fixed(4.0)]]);

        // (5, 5) wraps to (1, 1)
        assert_eq!(table.get(5, 5, &mut rng), Some(OscillatorFrequency::new(4.0)));
    }

    #[test]
    fn test_empty_table() {
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(FrequencyTable::default().get(0, 0, &mut rng), None);
        assert_eq!(FrequencyTable::new(vec![vec![]]).get(0, 3, &mut rng), None);
    }

    #[test]
    fn test_random_cell_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let spec = FrequencySpec::Between { low: 400.0, high: 200.0 };

        for _ in 0..1000 {
            let hz = spec.resolve(&mut rng).get();
            assert!((200.0..=400.0).contains(&hz));
        }
    }

    #[test]
    fn test_seeded_resolution_is_repeatable() {
        let spec = FrequencySpec::Between { low: 200.0, high: 400.0 };
        let a = spec.resolve(&mut StdRng::seed_from_u64(7));
        let b = spec.resolve(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_spec_from_yaml() {
        let specs: Vec<FrequencySpec> = serde_yaml::from_str("[440.0, {low: 200, high: 400}]").unwrap();
        assert_eq!(specs[0], FrequencySpec::Fixed(440.0));
        assert_eq!(specs[1], FrequencySpec::Between { low: 200.0, high: 400.0 });
    }
}
