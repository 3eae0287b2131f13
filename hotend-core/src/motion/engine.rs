//! Stepper execution engine
//!
//! Emits the pulses of a planned move by busy-polling a clock. Each axis
//! fires whenever its interval has elapsed since its previous pulse. Min
//! endstops on X/Y/Z cut an axis short when it travels toward them. The
//! caller's `service` hook runs every [`SERVICE_INTERVAL_MS`] so the
//! heater stays regulated and the inactivity watchdog keeps running.

use hotend_hal::Clock;

use crate::config::MachineConfig;
use crate::safety::KillReason;
use crate::traits::{Direction, Endstop, StepperDriver};

use super::axis::{Axis, AxisArray, AxisState, LINEAR_AXIS_COUNT};
use super::planner::MoveExecution;

/// Width of the step pulse high phase
pub const STEP_PULSE_US: u32 = 2;

/// Idle time per polling iteration
pub const LOOP_IDLE_US: u32 = 2;

/// Period of the service hook during a move
pub const SERVICE_INTERVAL_MS: u64 = 500;

/// Drivers and endstops for all axes
pub struct Axes<S, N> {
    /// Step/direction drivers in X, Y, Z, E order
    pub drivers: AxisArray<S>,
    /// Min endstops for X, Y, Z; `None` if not fitted
    pub min_endstops: [Option<N>; LINEAR_AXIS_COUNT],
    /// Position and calibration
    pub state: AxisArray<AxisState>,
}

impl<S: StepperDriver, N: Endstop> Axes<S, N> {
    /// Bundle drivers and endstops; positions start at the origin
    pub fn new(
        drivers: AxisArray<S>,
        min_endstops: [Option<N>; LINEAR_AXIS_COUNT],
        steps_per_unit: AxisArray<f32>,
    ) -> Self {
        Self {
            drivers,
            min_endstops,
            state: steps_per_unit.map(|_, spu| AxisState::new(*spu)),
        }
    }

    /// Believed positions of all axes
    pub fn positions(&self) -> AxisArray<f32> {
        self.state.map(|_, s| s.position)
    }

    /// True if the min endstop for `axis` is fitted and triggered
    pub fn min_endstop_triggered(&self, axis: Axis) -> bool {
        if !axis.is_linear() {
            return false;
        }
        self.min_endstops[axis.index()]
            .as_ref()
            .map(|e| e.is_triggered())
            .unwrap_or(false)
    }

    /// Disable every driver
    pub fn disable_all(&mut self) {
        for (_, driver) in self.drivers.iter_mut() {
            driver.enable(false);
        }
    }

    /// Enable every driver
    pub fn enable_all(&mut self) {
        for (_, driver) in self.drivers.iter_mut() {
            driver.enable(true);
        }
    }
}

/// Microsecond timestamps recorded for the G93 report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingCounters {
    /// Clock at the start of the most recent move
    pub move_started_us: u64,
    /// Clock at the last pulse of each axis
    pub last_pulse_us: AxisArray<u64>,
}

/// Per-move pulse bookkeeping
///
/// Pure timing state with no hardware access, so the pulse schedule can
/// be tested against a simulated clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepScheduler {
    interval_us: AxisArray<f32>,
    remaining: AxisArray<u32>,
    emitted: AxisArray<u32>,
    last_pulse_us: AxisArray<u64>,
}

impl StepScheduler {
    /// Start a schedule at `now_us`
    ///
    /// The first pulse of each axis is due one interval after the start.
    pub fn new(exec: &MoveExecution, now_us: u64) -> Self {
        Self {
            interval_us: exec.interval_us.map(|_, i| i.unwrap_or(0.0)),
            remaining: exec.steps,
            emitted: AxisArray::default(),
            last_pulse_us: AxisArray([now_us; 4]),
        }
    }

    /// Pulses still owed on `axis`
    pub fn remaining(&self, axis: Axis) -> u32 {
        self.remaining[axis]
    }

    /// Pulses emitted so far
    pub fn emitted(&self) -> AxisArray<u32> {
        self.emitted
    }

    /// True once no axis owes pulses
    pub fn is_finished(&self) -> bool {
        self.remaining.0.iter().all(|r| *r == 0)
    }

    /// True if `axis` owes a pulse and its interval has elapsed
    pub fn is_due(&self, axis: Axis, now_us: u64) -> bool {
        if self.remaining[axis] == 0 {
            return false;
        }
        let elapsed = now_us.saturating_sub(self.last_pulse_us[axis]);
        elapsed as f32 >= self.interval_us[axis]
    }

    /// Account for one pulse on `axis` at `now_us`
    pub fn record_step(&mut self, axis: Axis, now_us: u64) {
        if self.remaining[axis] == 0 {
            return;
        }
        self.remaining[axis] -= 1;
        self.emitted[axis] += 1;
        self.last_pulse_us[axis] = now_us;
    }

    /// Drop the rest of `axis`'s pulses (endstop reached)
    pub fn halt_axis(&mut self, axis: Axis) {
        self.remaining[axis] = 0;
    }

    /// Timestamp of the most recent pulse on `axis`
    pub fn last_pulse_us(&self, axis: Axis) -> u64 {
        self.last_pulse_us[axis]
    }
}

/// Emit every pulse of `exec`
///
/// Positions are advanced by the pulses actually emitted, so an axis cut
/// short by its endstop ends where the motor stopped. Returns the emitted
/// counts, or the kill reason if `service` aborted the move.
pub fn execute<S, N, C, F>(
    exec: &MoveExecution,
    axes: &mut Axes<S, N>,
    clock: &mut C,
    config: &MachineConfig,
    counters: &mut TimingCounters,
    mut service: F,
) -> Result<AxisArray<u32>, KillReason>
where
    S: StepperDriver,
    N: Endstop,
    C: Clock,
    F: FnMut(&mut C) -> Result<(), KillReason>,
{
    for axis in Axis::ALL {
        let direction = exec.direction[axis];
        axes.drivers[axis].set_direction(direction);
        axes.state[axis].direction = direction;
        if exec.steps[axis] > 0 {
            axes.drivers[axis].enable(true);
        }
    }

    let start_us = clock.now_us();
    counters.move_started_us = start_us;
    let mut schedule = StepScheduler::new(exec, start_us);

    for axis in Axis::LINEAR {
        if blocked_by_endstop(axes, axis) {
            schedule.halt_axis(axis);
        }
    }

    let mut last_service_ms = clock.now_ms();
    while !schedule.is_finished() {
        for axis in Axis::ALL {
            if !schedule.is_due(axis, clock.now_us()) {
                continue;
            }
            axes.drivers[axis].step_high();
            clock.delay_us(STEP_PULSE_US);
            axes.drivers[axis].step_low();
            let now = clock.now_us();
            schedule.record_step(axis, now);
            counters.last_pulse_us[axis] = now;

            if axis.is_linear() && blocked_by_endstop(axes, axis) {
                schedule.halt_axis(axis);
            }
        }

        let now_ms = clock.now_ms();
        if now_ms.saturating_sub(last_service_ms) >= SERVICE_INTERVAL_MS {
            last_service_ms = now_ms;
            if let Err(reason) = service(clock) {
                apply_emitted(exec, axes, &schedule.emitted());
                return Err(reason);
            }
        }

        clock.delay_us(LOOP_IDLE_US);
    }

    let emitted = schedule.emitted();
    apply_emitted(exec, axes, &emitted);

    for axis in Axis::ALL {
        if config.axes[axis].disable_after_move {
            axes.drivers[axis].enable(false);
        }
    }

    Ok(emitted)
}

/// Moving toward a triggered min endstop
fn blocked_by_endstop<S: StepperDriver, N: Endstop>(axes: &Axes<S, N>, axis: Axis) -> bool {
    axes.state[axis].direction == Direction::Negative && axes.min_endstop_triggered(axis)
}

fn apply_emitted<S, N>(exec: &MoveExecution, axes: &mut Axes<S, N>, emitted: &AxisArray<u32>) {
    for axis in Axis::ALL {
        let state = &mut axes.state[axis];
        if emitted[axis] == 0 || state.steps_per_unit <= 0.0 {
            continue;
        }
        let travelled = emitted[axis] as f32 / state.steps_per_unit;
        state.position += exec.direction[axis].sign() * travelled;
    }
}
