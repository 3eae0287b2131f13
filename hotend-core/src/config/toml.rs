//! Minimal TOML parser for machine configuration
//!
//! Handles only the subset used by `machine.toml`:
//!
//! - `key = value` pairs (float, integer, boolean)
//! - `[axis.x]` style section headers
//! - Comments (`# ...`), full-line or trailing
//!
//! Keys not set in the file keep their [`MachineConfig::new`] defaults.

use crate::motion::Axis;

use super::types::{AxisConfig, MachineConfig};

/// Parse error, carrying the 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Section header is not `[axis.<x|y|z|e>]`
    InvalidSection { line: usize },
    /// Line is neither a header nor `key = value`
    Syntax { line: usize },
    /// Key not valid in the current section
    UnknownKey { line: usize },
    /// Value has the wrong type or is out of range
    InvalidValue { line: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidSection { line } => write!(f, "line {}: invalid section", line),
            ConfigError::Syntax { line } => write!(f, "line {}: expected key = value", line),
            ConfigError::UnknownKey { line } => write!(f, "line {}: unknown key", line),
            ConfigError::InvalidValue { line } => write!(f, "line {}: invalid value", line),
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy)]
enum Section {
    Root,
    Axis(Axis),
}

/// Parse TOML configuration into MachineConfig
pub fn parse_config(input: &str) -> Result<MachineConfig, ConfigError> {
    let mut config = MachineConfig::new();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ConfigError::InvalidSection { line: line_no });
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ConfigError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Syntax { line: line_no })?;
        match section {
            Section::Root => apply_root(&mut config, key, value, line_no)?,
            Section::Axis(axis) => apply_axis(&mut config.axes[axis], axis, key, value, line_no)?,
        }
    }

    Ok(config)
}

/// Parse a section header such as "axis.x"
fn parse_section_header(header: &str) -> Option<Section> {
    let (kind, name) = header.trim().split_once('.')?;
    if kind.trim() != "axis" {
        return None;
    }
    let axis = match name.trim() {
        "x" | "X" => Axis::X,
        "y" | "Y" => Axis::Y,
        "z" | "Z" => Axis::Z,
        "e" | "E" => Axis::E,
        _ => return None,
    };
    Some(Section::Axis(axis))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_root(
    config: &mut MachineConfig,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ConfigError> {
    match key {
        "max_feedrate" => config.max_feedrate = parse_positive(value, line)?,
        "initial_feedrate" => config.initial_feedrate = parse_positive(value, line)?,
        "endstops_inverting" => config.endstops_inverting = parse_bool(value, line)?,
        "min_software_endstops" => config.min_software_endstops = parse_bool(value, line)?,
        "max_software_endstops" => config.max_software_endstops = parse_bool(value, line)?,
        "resend_on_error" => config.resend_on_error = parse_bool(value, line)?,
        "baud_rate" => {
            config.baud_rate = value
                .parse::<u32>()
                .ok()
                .filter(|b| *b > 0)
                .ok_or(ConfigError::InvalidValue { line })?
        }
        _ => return Err(ConfigError::UnknownKey { line }),
    }
    Ok(())
}

fn apply_axis(
    axis_config: &mut AxisConfig,
    axis: Axis,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ConfigError> {
    match key {
        "steps_per_unit" => axis_config.steps_per_unit = parse_positive(value, line)?,
        "invert_direction" => axis_config.invert_direction = parse_bool(value, line)?,
        "enable_active_high" => axis_config.enable_active_high = parse_bool(value, line)?,
        "disable_after_move" => axis_config.disable_after_move = parse_bool(value, line)?,
        "max_length" if axis.is_linear() => {
            axis_config.max_length = Some(parse_positive(value, line)?)
        }
        _ => return Err(ConfigError::UnknownKey { line }),
    }
    Ok(())
}

fn parse_bool(value: &str, line: usize) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue { line }),
    }
}

/// Finite, strictly positive number; integers and `_` separators accepted
fn parse_positive(value: &str, line: usize) -> Result<f32, ConfigError> {
    let mut digits: heapless::String<32> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ConfigError::InvalidValue { line })?;
    }
    digits
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(ConfigError::InvalidValue { line })
}
