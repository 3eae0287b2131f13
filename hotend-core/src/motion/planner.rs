//! Move planner
//!
//! Computes per-axis step counts and a constant pulse interval per axis
//! so that every axis finishes in the same time window. There is no
//! acceleration: every axis runs at a fixed rate for the whole move.

use crate::traits::Direction;

use super::axis::{Axis, AxisArray, AxisState};
use super::resolver::MoveRequest;

/// Microseconds per minute, the unit conversion for feedrates
pub const MICROS_PER_MINUTE: f32 = 60_000_000.0;

/// Step counts and timing for one move
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveExecution {
    /// Whole pulses to emit per axis
    pub steps: AxisArray<u32>,
    /// Travel direction per axis
    pub direction: AxisArray<Direction>,
    /// Microseconds between pulses; `None` for axes that do not move
    pub interval_us: AxisArray<Option<f32>>,
    /// Duration of the slowest axis at the requested feedrate
    pub time_for_move_us: f32,
    /// Destination the move was planned for
    pub destination: AxisArray<f32>,
}

impl MoveExecution {
    /// Total pulses across all axes
    pub fn total_steps(&self) -> u64 {
        self.steps.0.iter().map(|s| u64::from(*s)).sum()
    }

    /// True when no axis has anything to do
    pub fn is_empty(&self) -> bool {
        self.steps.0.iter().all(|s| *s == 0)
    }
}

fn abs(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}

/// Plan a move from the axes' believed positions
///
/// Fractional steps are truncated. An axis whose steps-per-unit or
/// distance yields zero steps takes no part in the timing.
pub fn plan(request: &MoveRequest, axes: &AxisArray<AxisState>) -> MoveExecution {
    let direction = AxisArray::from_fn(|axis| {
        Direction::toward(axes[axis].position, request.destination[axis])
    });

    // `as` saturates: NaN and negatives become 0
    let steps = AxisArray::from_fn(|axis| {
        let distance = abs(request.destination[axis] - axes[axis].position);
        (distance * axes[axis].steps_per_unit) as u32
    });

    let mut time_for_move_us = 0.0f32;
    for axis in Axis::ALL {
        if steps[axis] == 0 {
            continue;
        }
        let steps_per_us = axes[axis].steps_per_unit * request.feedrate / MICROS_PER_MINUTE;
        let axis_time = steps[axis] as f32 / steps_per_us;
        if axis_time > time_for_move_us {
            time_for_move_us = axis_time;
        }
    }

    let interval_us = AxisArray::from_fn(|axis| {
        if steps[axis] == 0 {
            None
        } else {
            Some(time_for_move_us / steps[axis] as f32)
        }
    });

    MoveExecution {
        steps,
        direction,
        interval_us,
        time_for_move_us,
        destination: request.destination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn axes(spu: [f32; 4], position: [f32; 4]) -> AxisArray<AxisState> {
        AxisArray::from_fn(|axis| AxisState {
            position: position[axis.index()],
            ..AxisState::new(spu[axis.index()])
        })
    }

    fn request(destination: [f32; 4], feedrate: f32) -> MoveRequest {
        MoveRequest {
            destination: AxisArray(destination),
            feedrate,
        }
    }

    #[test]
    fn test_single_axis_timing() {
        // 10mm at 100 steps/mm and 600 mm/min: 1000 steps over one second
        let exec = plan(
            &request([10.0, 0.0, 0.0, 0.0], 600.0),
            &axes([100.0; 4], [0.0; 4]),
        );
        assert_eq!(exec.steps.0, [1000, 0, 0, 0]);
        assert!((exec.time_for_move_us - 1_000_000.0).abs() < 1.0);
        assert!((exec.interval_us[Axis::X].unwrap() - 1000.0).abs() < 0.01);
        assert!(exec.interval_us[Axis::Y].is_none());
    }

    #[test]
    fn test_axes_share_time_window() {
        let exec = plan(
            &request([10.0, 5.0, 0.0, 0.0], 600.0),
            &axes([100.0; 4], [0.0; 4]),
        );
        let x = exec.steps[Axis::X] as f32 * exec.interval_us[Axis::X].unwrap();
        let y = exec.steps[Axis::Y] as f32 * exec.interval_us[Axis::Y].unwrap();
        assert!((x - y).abs() < 1.0);
        assert!((x - exec.time_for_move_us).abs() < 1.0);
    }

    #[test]
    fn test_fractional_steps_truncate() {
        let exec = plan(
            &request([10.0, 0.0, 0.0, 0.0], 1500.0),
            &axes([80.376, 80.376, 2560.0, 533.28], [0.0; 4]),
        );
        assert_eq!(exec.steps[Axis::X], 803);
    }

    #[test]
    fn test_direction_from_current_position() {
        let exec = plan(
            &request([-1.0, 3.0, 3.0, 0.0], 600.0),
            &axes([100.0; 4], [0.0, 5.0, 3.0, 0.0]),
        );
        assert_eq!(exec.direction[Axis::X], Direction::Negative);
        assert_eq!(exec.direction[Axis::Y], Direction::Negative);
        assert_eq!(exec.direction[Axis::Z], Direction::Positive);
        assert_eq!(exec.steps.0, [100, 200, 0, 0]);
    }

    #[test]
    fn test_zero_length_move_is_empty() {
        let exec = plan(
            &request([1.0, 2.0, 3.0, 4.0], 600.0),
            &axes([100.0; 4], [1.0, 2.0, 3.0, 4.0]),
        );
        assert!(exec.is_empty());
        assert_eq!(exec.time_for_move_us, 0.0);
        assert_eq!(exec.total_steps(), 0);
    }

    #[test]
    fn test_zero_steps_per_unit_does_not_move() {
        let exec = plan(
            &request([10.0, 0.0, 0.0, 0.0], 600.0),
            &axes([0.0, 100.0, 100.0, 100.0], [0.0; 4]),
        );
        assert!(exec.is_empty());
    }

    proptest! {
        #[test]
        fn prop_moving_axes_finish_together(
            dx in 0.5f32..100.0,
            dy in 0.5f32..100.0,
            de in 0.5f32..20.0,
            feedrate in 60.0f32..18000.0,
        ) {
            let exec = plan(
                &request([dx, dy, 0.0, de], feedrate),
                &axes([80.376, 80.376, 2560.0, 533.28], [0.0; 4]),
            );
            for axis in Axis::ALL {
                if let Some(interval) = exec.interval_us[axis] {
                    let total = interval * exec.steps[axis] as f32;
                    let tolerance = exec.time_for_move_us * 1e-4 + 1.0;
                    prop_assert!((total - exec.time_for_move_us).abs() <= tolerance);
                }
            }
        }
    }
}
