//! Axis identifiers and per-axis storage

use core::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::Direction;

/// Number of driven axes (X, Y, Z, extruder)
pub const AXIS_COUNT: usize = 4;

/// Number of linear axes fitted with a min endstop
pub const LINEAR_AXIS_COUNT: usize = 3;

/// Axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
    /// Extruder
    E,
}

impl Axis {
    /// All axes in storage order
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// The axes that carry endstops and travel limits
    pub const LINEAR: [Axis; LINEAR_AXIS_COUNT] = [Axis::X, Axis::Y, Axis::Z];

    /// Storage index
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::E => 3,
        }
    }

    /// G-code word letter for this axis
    pub const fn letter(self) -> u8 {
        match self {
            Axis::X => b'X',
            Axis::Y => b'Y',
            Axis::Z => b'Z',
            Axis::E => b'E',
        }
    }

    /// True for X, Y and Z
    pub const fn is_linear(self) -> bool {
        !matches!(self, Axis::E)
    }
}

/// One value per axis, indexable by [`Axis`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisArray<T>(pub [T; AXIS_COUNT]);

impl<T> AxisArray<T> {
    /// Build from a per-axis constructor
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self(core::array::from_fn(|i| f(Axis::ALL[i])))
    }

    /// Iterate `(axis, value)` pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate `(axis, value)` pairs mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Axis, &mut T)> {
        Axis::ALL.into_iter().zip(self.0.iter_mut())
    }

    /// Map every value
    pub fn map<U>(&self, mut f: impl FnMut(Axis, &T) -> U) -> AxisArray<U> {
        AxisArray::from_fn(|axis| f(axis, &self[axis]))
    }
}

impl<T> Index<Axis> for AxisArray<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.0[axis.index()]
    }
}

impl<T> IndexMut<Axis> for AxisArray<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis.index()]
    }
}

/// Runtime state of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    /// Pulses per unit of travel (mm, or mm of filament for E)
    pub steps_per_unit: f32,
    /// Believed position in units
    pub position: f32,
    /// Direction of the most recent move
    pub direction: Direction,
}

impl AxisState {
    /// Create an axis at the origin
    pub const fn new(steps_per_unit: f32) -> Self {
        Self {
            steps_per_unit,
            position: 0.0,
            direction: Direction::Positive,
        }
    }
}
