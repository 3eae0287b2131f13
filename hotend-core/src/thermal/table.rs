//! Thermistor lookup table
//!
//! Maps raw analog readings to whole degrees Celsius and back using a
//! step table with no interpolation. Entries are `(raw, celsius)` with raw
//! strictly ascending and celsius strictly descending.

/// Raw/celsius translator over a static table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalTable {
    entries: &'static [(u16, i16)],
}

impl ThermalTable {
    /// Wrap a table; needs at least two entries
    pub const fn new(entries: &'static [(u16, i16)]) -> Self {
        assert!(entries.len() >= 2, "thermal table needs two entries");
        Self { entries }
    }

    /// Table entries
    pub fn entries(&self) -> &'static [(u16, i16)] {
        self.entries
    }

    /// Temperature of the step containing `raw`
    ///
    /// Returns the celsius of the last entry whose raw does not exceed
    /// `raw`. Readings below the first entry map to the first entry, and
    /// readings past the end map to the last.
    pub fn celsius_from_raw(&self, raw: u16) -> i16 {
        for i in 1..self.entries.len() {
            if self.entries[i].0 > raw {
                return self.entries[i - 1].1;
            }
        }
        self.entries[self.entries.len() - 1].1
    }

    /// Raw reading that corresponds to `celsius`
    ///
    /// Returns the raw of the last entry whose celsius is not below
    /// `celsius`, clamping to the ends of the table.
    pub fn raw_from_celsius(&self, celsius: i16) -> u16 {
        for i in 1..self.entries.len() {
            if self.entries[i].1 < celsius {
                return self.entries[i - 1].0;
            }
        }
        self.entries[self.entries.len() - 1].0
    }

    /// Largest raw distance between neighbouring entries (or to zero)
    pub fn max_step(&self) -> u16 {
        let mut widest = self.entries[0].0;
        for pair in self.entries.windows(2) {
            widest = widest.max(pair[1].0.saturating_sub(pair[0].0));
        }
        widest
    }
}
