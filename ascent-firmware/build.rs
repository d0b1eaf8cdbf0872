//! Build script for ascent-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watchface.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Size of the face artwork in pixels
const FACE_SIZE: i64 = 180;

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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate watchface.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=watchface.toml");

    let config_path = Path::new("watchface.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: watchface.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds watchface.toml for the face layout.         ║\n\
            ║  Please create one in the ascent-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read watchface.toml                            ║\n\
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
                ║  ERROR: Invalid TOML syntax in watchface.toml                    ║\n\
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
    validate_gauge(&config, &mut errors);
    validate_layout(&config, &mut errors);
    validate_clock(&config, &mut errors);
    validate_weather(&config, &mut errors);
    validate_battery(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid watchface configuration                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=watchface.toml validated successfully");
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

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Integer in `min..=max`, if present
fn check_int(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => None,
    }
}

fn validate_gauge(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(gauge) = section(config, "gauge") else {
        return;
    };

    check_int(gauge, "gauge", "middle", -1000, 1000, errors);
    check_int(gauge, "gauge", "range", 1, 1000, errors);

    for key in [
        "left_start",
        "left_end",
        "right_start",
        "right_end",
        "slider_center",
    ] {
        match gauge.get(key) {
            Some(toml::Value::Array(point)) => {
                let valid = point.len() == 2
                    && point
                        .iter()
                        .all(|c| matches!(c, toml::Value::Integer(v) if (0..FACE_SIZE).contains(v)));
                if !valid {
                    errors.push(format!("[gauge] {} must be [x, y] within the face", key));
                }
            }
            Some(_) => errors.push(format!("[gauge] {} must be an [x, y] array", key)),
            None => {}
        }
    }
}

fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(layout) = section(config, "layout") else {
        return;
    };

    check_int(layout, "layout", "screen_width", FACE_SIZE, 1024, errors);
    check_int(layout, "layout", "screen_height", FACE_SIZE, 1024, errors);
}

fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(clock) = section(config, "clock") else {
        return;
    };

    match clock.get("style") {
        Some(toml::Value::String(style)) if style == "24h" || style == "12h" => {}
        Some(_) => errors.push("[clock] style must be '24h' or '12h'".to_string()),
        None => {}
    }
    if let Some(v) = clock.get("use_24h") {
        if !v.is_bool() {
            errors.push("[clock] use_24h must be true or false".to_string());
        }
    }
}

fn validate_weather(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(weather) = section(config, "weather") else {
        return;
    };

    check_int(weather, "weather", "check_rate_min", 1, 1440, errors);
}

fn validate_battery(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(battery) = section(config, "battery") else {
        return;
    };

    check_int(battery, "battery", "bar_width", 1, 255, errors);
    let empty = check_int(battery, "battery", "empty_mv", 0, 65535, errors);
    let full = check_int(battery, "battery", "full_mv", 0, 65535, errors);

    if let (Some(empty), Some(full)) = (empty, full) {
        if empty >= full {
            errors.push("[battery] empty_mv must be below full_mv".to_string());
        }
    }
}
