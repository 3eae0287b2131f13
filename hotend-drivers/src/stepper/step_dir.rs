//! Step/direction stepper driver
//!
//! Any driver chip that takes a STEP pulse, a DIR level and an EN level
//! (A4988, DRV8825, TMC22xx in standalone mode).

use hotend_core::config::AxisConfig;
use hotend_core::traits::{Direction, StepperDriver};
use hotend_hal::OutputPin;

/// Step/dir/enable driver on three output pins
pub struct StepDirDriver<P> {
    step: P,
    dir: P,
    enable: P,
    /// DIR level is flipped relative to [`Direction::Positive`] = high
    invert_direction: bool,
    /// EN level that turns the driver on
    enable_active_high: bool,
    direction: Direction,
    enabled: bool,
}

impl<P: OutputPin> StepDirDriver<P> {
    /// Create a driver; starts disabled with the step line low
    pub fn new(
        step: P,
        dir: P,
        enable: P,
        invert_direction: bool,
        enable_active_high: bool,
    ) -> Self {
        let mut driver = Self {
            step,
            dir,
            enable,
            invert_direction,
            enable_active_high,
            direction: Direction::Positive,
            enabled: true,
        };
        driver.step.set_low();
        driver.set_direction(Direction::Positive);
        driver.enable(false);
        driver
    }

    /// Create a driver with the polarity settings of one axis
    pub fn from_config(step: P, dir: P, enable: P, config: &AxisConfig) -> Self {
        Self::new(
            step,
            dir,
            enable,
            config.invert_direction,
            config.enable_active_high,
        )
    }

    /// Release the pins
    pub fn release(self) -> (P, P, P) {
        (self.step, self.dir, self.enable)
    }
}

impl<P: OutputPin> StepperDriver for StepDirDriver<P> {
    fn step_high(&mut self) {
        self.step.set_high();
    }

    fn step_low(&mut self) {
        self.step.set_low();
    }

    fn set_direction(&mut self, dir: Direction) {
        self.direction = dir;
        let high = (dir == Direction::Positive) != self.invert_direction;
        self.dir.set_state(high);
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.enable.set_state(enabled == self.enable_active_high);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
