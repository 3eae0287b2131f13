//! Threshold (bang-bang) control law
//!
//! Heats while the reading is colder than the target. Works on raw
//! readings where colder means a higher value. An optional hysteresis
//! band holds the previous output while the reading is inside it.

use hotend_core::traits::ControlLaw;

/// Bang-bang controller on raw readings
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdControl {
    hysteresis_raw: u16,
    heating: bool,
}

impl ThresholdControl {
    /// Switch exactly at the target
    pub const fn new() -> Self {
        Self {
            hysteresis_raw: 0,
            heating: false,
        }
    }

    /// Switch at `target ± hysteresis_raw`
    pub const fn with_hysteresis(hysteresis_raw: u16) -> Self {
        Self {
            hysteresis_raw,
            heating: false,
        }
    }
}

impl ControlLaw for ThresholdControl {
    fn output(&mut self, current_raw: u16, target_raw: u16) -> bool {
        let upper = target_raw.saturating_add(self.hysteresis_raw);
        let lower = target_raw.saturating_sub(self.hysteresis_raw);
        if current_raw > upper {
            self.heating = true;
        } else if current_raw <= lower {
            self.heating = false;
        }
        self.heating
    }

    fn reset(&mut self) {
        self.heating = false;
    }
}
