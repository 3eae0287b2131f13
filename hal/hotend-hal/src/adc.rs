//! Analog input abstraction
//!
//! Readings are normalised to a full 16-bit scale regardless of the
//! converter's native resolution, so a disconnected (pulled-up) sensor
//! always reads [`ANALOG_SATURATION`].

/// Full-scale analog reading
pub const ANALOG_SATURATION: u16 = u16::MAX;

/// Single analog channel
pub trait AnalogInput {
    /// Take one reading, scaled to `0..=ANALOG_SATURATION`
    fn read_u16(&mut self) -> u16;
}

/// Scale a 12-bit conversion to the 16-bit range.
///
/// Replicates the top bits into the bottom nibble so that 0xFFF maps to
/// exactly [`ANALOG_SATURATION`].
pub const fn scale_12_to_16(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(scale_12_to_16(0), 0);
        assert_eq!(scale_12_to_16(0x0FFF), ANALOG_SATURATION);
    }

    #[test]
    fn test_scale_midpoint() {
        assert_eq!(scale_12_to_16(0x0800), 0x8008);
    }
}
