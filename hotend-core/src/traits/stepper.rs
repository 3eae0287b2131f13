//! Stepper driver and endstop traits
//!
//! A stepper here is a plain step/direction/enable driver (A4988,
//! DRV8825, TMC in standalone mode). Pulse timing is owned by the
//! execution engine; the driver only toggles lines.

/// Direction of travel along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward larger coordinates
    #[default]
    Positive,
    /// Toward smaller coordinates (toward the min endstop)
    Negative,
}

impl Direction {
    /// Direction needed to travel from `current` to `destination`
    ///
    /// Zero-length moves count as positive.
    pub fn toward(current: f32, destination: f32) -> Self {
        if destination >= current {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// +1.0 or -1.0
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// Trait for step/direction stepper drivers
pub trait StepperDriver {
    /// Raise the step line (start of a pulse)
    fn step_high(&mut self);

    /// Lower the step line (end of a pulse)
    fn step_low(&mut self);

    /// Set the direction line
    ///
    /// Any per-axis inversion is applied by the implementation.
    fn set_direction(&mut self, dir: Direction);

    /// Get the last direction set
    fn direction(&self) -> Direction;

    /// Enable or disable the motor driver
    ///
    /// When disabled, the motor is free to rotate and does not hold position.
    fn enable(&mut self, enabled: bool);

    /// Check if the motor is enabled
    fn is_enabled(&self) -> bool;
}

/// Travel-limit switch
pub trait Endstop {
    /// True when the switch reports the axis at its limit
    ///
    /// Implementations apply any inversion of the raw input.
    fn is_triggered(&self) -> bool;
}
