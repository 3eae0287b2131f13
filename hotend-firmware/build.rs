//! Build script for hotend-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const ROOT_KEYS: &[&str] = &[
    "max_feedrate",
    "initial_feedrate",
    "endstops_inverting",
    "min_software_endstops",
    "max_software_endstops",
    "resend_on_error",
    "baud_rate",
];

const AXIS_KEYS: &[&str] = &[
    "steps_per_unit",
    "invert_direction",
    "enable_active_high",
    "disable_after_move",
    "max_length",
];

const AXES: &[&str] = &["x", "y", "z", "e"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds machine.toml as its calibration.            ║\n\
            ║  Please create one in the hotend-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_root(&config, &mut errors);
    validate_axes(&config, &mut errors);
    report_errors("Invalid machine configuration", &errors);

    println!("cargo:warning=machine.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with every collected error in one box
fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn as_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn check_positive(scope: &str, key: &str, value: &toml::Value, errors: &mut Vec<String>) {
    match as_number(value) {
        Some(n) if n > 0.0 => {}
        _ => errors.push(format!("{} '{}' must be a positive number", scope, key)),
    }
}

fn check_bool(scope: &str, key: &str, value: &toml::Value, errors: &mut Vec<String>) {
    if !value.is_bool() {
        errors.push(format!("{} '{}' must be true or false", scope, key));
    }
}

/// Validate top-level keys
fn validate_root(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (key, value) in root {
        if key == "axis" {
            continue;
        }
        if !ROOT_KEYS.contains(&key.as_str()) {
            errors.push(format!("unknown key '{}'", key));
            continue;
        }
        match key.as_str() {
            "max_feedrate" | "initial_feedrate" => check_positive("root", key, value, errors),
            "baud_rate" => match value.as_integer() {
                Some(baud) if baud > 0 && baud <= i64::from(u32::MAX) => {}
                _ => errors.push("'baud_rate' must be a positive integer".to_string()),
            },
            _ => check_bool("root", key, value, errors),
        }
    }

    if let (Some(initial), Some(max)) = (
        root.get("initial_feedrate").and_then(as_number),
        root.get("max_feedrate").and_then(as_number),
    ) {
        if initial > max {
            errors.push("'initial_feedrate' exceeds 'max_feedrate'".to_string());
        }
    }
}

/// Validate [axis.*] sections
fn validate_axes(config: &toml::Value, errors: &mut Vec<String>) {
    let axes = match config.get("axis") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[axis] must contain [axis.x|y|z|e] tables".to_string());
            return;
        }
        None => return,
    };

    for (name, axis) in axes {
        if !AXES.contains(&name.as_str()) {
            errors.push(format!("[axis.{}] is not an axis (x, y, z, e)", name));
            continue;
        }
        let axis = match axis {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[axis.{}] must be a table", name));
                continue;
            }
        };
        let scope = format!("[axis.{}]", name);

        for (key, value) in axis {
            if !AXIS_KEYS.contains(&key.as_str()) {
                errors.push(format!("{} unknown key '{}'", scope, key));
                continue;
            }
            match key.as_str() {
                "steps_per_unit" => check_positive(&scope, key, value, errors),
                "max_length" if name == "e" => {
                    errors.push("[axis.e] has no travel limit, remove 'max_length'".to_string())
                }
                "max_length" => check_positive(&scope, key, value, errors),
                _ => check_bool(&scope, key, value, errors),
            }
        }
    }
}
