//! Endstop switch on a digital input

use hotend_core::traits::Endstop;
use hotend_hal::InputPin;

/// Limit switch
///
/// With `inverting` set, the switch reads high when open (normally
/// closed to ground with a pull-up), so a low level means triggered.
pub struct EndstopSwitch<P> {
    pin: P,
    inverting: bool,
}

impl<P: InputPin> EndstopSwitch<P> {
    pub fn new(pin: P, inverting: bool) -> Self {
        Self { pin, inverting }
    }
}

impl<P: InputPin> Endstop for EndstopSwitch<P> {
    fn is_triggered(&self) -> bool {
        self.pin.is_high() != self.inverting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockInput(bool);

    impl InputPin for MockInput {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_inverting_switch() {
        assert!(!EndstopSwitch::new(MockInput(true), true).is_triggered());
        assert!(EndstopSwitch::new(MockInput(false), true).is_triggered());
    }

    #[test]
    fn test_plain_switch() {
        assert!(EndstopSwitch::new(MockInput(true), false).is_triggered());
        assert!(!EndstopSwitch::new(MockInput(false), false).is_triggered());
    }
}
