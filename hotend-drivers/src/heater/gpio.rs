//! GPIO heater output
//!
//! Hotend cartridge switched by a MOSFET or SSR on one digital output.

use hotend_core::traits::HeaterOutput;
use hotend_hal::OutputPin;

/// Heater on a digital output
pub struct GpioHeater<P> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> GpioHeater<P> {
    /// Wrap `pin`; the heater is switched off immediately
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut heater = Self {
            pin,
            active_low,
            on: true,
        };
        heater.set_on(false);
        heater
    }

    /// MOSFET gate driven high to heat
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, false)
    }
}

impl<P: OutputPin> HeaterOutput for GpioHeater<P> {
    fn set_on(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        self.on = on;
        self.pin.set_state(on != self.active_low);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
