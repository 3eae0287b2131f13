//! Blocking ADC channel

use embassy_rp::adc::{Adc, Blocking, Channel};
use hotend_hal::{adc::scale_12_to_16, AnalogInput, ANALOG_SATURATION};

/// One ADC channel read by blocking conversion
///
/// The RP2040 converts at 12 bits; readings are rescaled to full-scale
/// 16-bit so the core sees the same range on every board.
pub struct AdcInput {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl AdcInput {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for AdcInput {
    fn read_u16(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => scale_12_to_16(raw),
            // a failed conversion reads as an open sensor so the heater stays off
            Err(_) => ANALOG_SATURATION,
        }
    }
}
