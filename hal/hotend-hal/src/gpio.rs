//! GPIO pin abstractions
//!
//! Step, direction, enable, heater and fan lines are all plain digital
//! outputs; endstops are plain digital inputs.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// An output that is not fitted on this board.
///
/// Writes are discarded and the pin always reads back low.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl OutputPin for NoPin {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}

    fn is_set_high(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch(bool);

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state_drives_level() {
        let mut pin = Latch(false);
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_no_pin_reads_low() {
        let mut pin = NoPin;
        pin.set_high();
        assert!(pin.is_set_low());
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn test_no_pin_is_loggable() {
        fn loggable<T: defmt::Format>(_: &T) {}
        loggable(&NoPin);
    }
}
