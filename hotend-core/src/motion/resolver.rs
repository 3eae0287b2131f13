//! Modal state and target resolution
//!
//! Turns the axis words of a G0/G1 into absolute destinations, applying
//! absolute/relative mode (with the extruder tracked separately), the
//! standing feedrate and the optional software endstops.

use hotend_protocol::Command;

use crate::config::MachineConfig;

use super::axis::{Axis, AxisArray};

/// Modal settings that persist between commands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModalState {
    /// G91: X/Y/Z words are offsets
    pub relative_mode: bool,
    /// M83: E words are offsets even under G90
    pub relative_mode_e: bool,
    /// Standing feedrate in units/min
    pub feedrate: f32,
}

/// Fully resolved linear move
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveRequest {
    /// Absolute destination per axis
    pub destination: AxisArray<f32>,
    /// Feedrate in units/min, already clamped to the machine maximum
    pub feedrate: f32,
}

impl ModalState {
    /// Absolute mode, given starting feedrate
    pub const fn new(feedrate: f32) -> Self {
        Self {
            relative_mode: false,
            relative_mode_e: false,
            feedrate,
        }
    }

    /// True if `axis` words are interpreted as offsets
    pub fn is_relative(&self, axis: Axis) -> bool {
        match axis {
            Axis::E => self.relative_mode_e || self.relative_mode,
            _ => self.relative_mode,
        }
    }

    /// Resolve the destination and feedrate of a linear move
    ///
    /// A positive `F` word updates the standing feedrate. The standing feedrate
    /// is clamped to `max_feedrate` so the clamp persists across moves.
    pub fn resolve(
        &mut self,
        cmd: &Command<'_>,
        current: &AxisArray<f32>,
        config: &MachineConfig,
    ) -> MoveRequest {
        let destination = AxisArray::from_fn(|axis| {
            let target = match cmd.value(axis.letter()) {
                Some(word) if self.is_relative(axis) => current[axis] + word,
                Some(word) => word,
                None => current[axis],
            };
            clamp_to_travel(axis, target, config)
        });

        if let Some(f) = cmd.value(b'F') {
            if f > 0.0 {
                self.feedrate = f;
            }
        }
        if self.feedrate > config.max_feedrate {
            self.feedrate = config.max_feedrate;
        }

        MoveRequest {
            destination,
            feedrate: self.feedrate,
        }
    }
}

/// Apply the software endstops enabled in `config`
fn clamp_to_travel(axis: Axis, target: f32, config: &MachineConfig) -> f32 {
    if !axis.is_linear() {
        return target;
    }
    let mut target = target;
    if config.min_software_endstops && target < 0.0 {
        target = 0.0;
    }
    if config.max_software_endstops {
        if let Some(max) = config.axes[axis].max_length {
            if target > max {
                target = max;
            }
        }
    }
    target
}
