//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::{Axis, AxisArray};

/// Host link speed
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Inactivity timeout at boot; 0 disables the check
pub const DEFAULT_MAX_INACTIVE_MS: u32 = 0;

/// Per-axis calibration and wiring
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConfig {
    /// Pulses per mm (per mm of filament for E)
    pub steps_per_unit: f32,
    /// Flip the direction line
    pub invert_direction: bool,
    /// Driver enable line level that enables the motor
    pub enable_active_high: bool,
    /// Release the motor after every move
    pub disable_after_move: bool,
    /// Travel length for the max software endstop (linear axes only)
    pub max_length: Option<f32>,
}

impl AxisConfig {
    /// Axis with active-low enable and no inversion
    pub const fn new(steps_per_unit: f32, max_length: Option<f32>) -> Self {
        Self {
            steps_per_unit,
            invert_direction: false,
            enable_active_high: false,
            disable_after_move: false,
            max_length,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Per-axis settings in X, Y, Z, E order
    pub axes: AxisArray<AxisConfig>,
    /// Upper bound on any requested feedrate (units/min)
    pub max_feedrate: f32,
    /// Standing feedrate at boot (units/min)
    pub initial_feedrate: f32,
    /// Endstop input level that means "not triggered" is high
    pub endstops_inverting: bool,
    /// Clamp X/Y/Z destinations at 0
    pub min_software_endstops: bool,
    /// Clamp X/Y/Z destinations at `max_length`
    pub max_software_endstops: bool,
    /// Ask the host to resend a rejected line instead of dropping it
    pub resend_on_error: bool,
    /// Serial baud rate
    pub baud_rate: u32,
}

impl MachineConfig {
    /// Calibration of the reference Mendel-style machine
    pub fn new() -> Self {
        let mut z = AxisConfig::new(2560.0, Some(70.0));
        z.invert_direction = true;
        Self {
            axes: AxisArray([
                AxisConfig::new(80.376, Some(200.0)),
                AxisConfig::new(80.376, Some(200.0)),
                z,
                AxisConfig::new(533.28, None),
            ]),
            max_feedrate: 18_000.0,
            initial_feedrate: 1_500.0,
            endstops_inverting: true,
            min_software_endstops: false,
            max_software_endstops: false,
            resend_on_error: false,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }

    /// Settings for one axis
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        &self.axes[axis]
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new()
    }
}
