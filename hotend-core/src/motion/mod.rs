//! Motion: modal resolution, planning and pulse generation
//!
//! A G0/G1 flows through [`ModalState::resolve`], [`plan`] and
//! [`execute`] in that order.

pub mod axis;
pub mod engine;
pub mod planner;
pub mod resolver;

pub use axis::{Axis, AxisArray, AxisState, AXIS_COUNT, LINEAR_AXIS_COUNT};
pub use engine::{
    execute, Axes, StepScheduler, TimingCounters, LOOP_IDLE_US, SERVICE_INTERVAL_MS,
    STEP_PULSE_US,
};
pub use planner::{plan, MoveExecution, MICROS_PER_MINUTE};
pub use resolver::{ModalState, MoveRequest};
