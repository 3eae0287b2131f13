//! Heater output and control-law traits

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit reads full scale)
    OpenCircuit,
}

impl SensorError {
    /// Host-facing description
    pub fn description(&self) -> &'static str {
        match self {
            SensorError::OpenCircuit => "thermistor disconnected",
        }
    }
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Trait for heater output control
///
/// Implementations control the heater element via GPIO, PWM, or SSR.
pub trait HeaterOutput {
    /// Turn the heater on or off
    fn set_on(&mut self, on: bool);

    /// Check if the heater is currently on
    fn is_on(&self) -> bool;
}

/// Closed-loop rule deciding the heater output from raw readings
///
/// Works in raw analog units. For the supported thermistors a colder
/// hotend reads a *higher* raw value.
pub trait ControlLaw {
    /// Decide whether the heater should be on
    ///
    /// Only called with a connected sensor and a non-zero target.
    fn output(&mut self, current_raw: u16, target_raw: u16) -> bool;

    /// Forget any accumulated state (target changed, fault cleared)
    fn reset(&mut self) {}
}
