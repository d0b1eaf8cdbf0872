//! Simple TOML parser for the face configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `watchface.toml`. It does NOT support the full TOML spec and needs no
//! allocator.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Two-element integer arrays for points: `left_start = [43, 126]`
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Dotted or nested tables
//! - Floats and datetimes

use super::face::FaceConfig;
use crate::geometry::Point;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Gauge,
    Layout,
    Clock,
    Weather,
    Battery,
}

/// Parse TOML text into a `FaceConfig`
///
/// Missing keys keep their defaults and unknown keys are ignored. The
/// result is not validated.
pub fn parse_face_config(input: &str) -> Result<FaceConfig, ParseError> {
    let mut config = FaceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "gauge" => Ok(Section::Gauge),
        "layout" => Ok(Section::Layout),
        "clock" => Ok(Section::Clock),
        "weather" => Ok(Section::Weather),
        "battery" => Ok(Section::Battery),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut FaceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Gauge => {
            let g = &mut config.gauge;
            match key {
                "middle" => g.middle = parse_int(value)?,
                "range" => g.range = parse_int(value)?,
                "left_start" => g.left_start = parse_point(value)?,
                "left_end" => g.left_end = parse_point(value)?,
                "right_start" => g.right_start = parse_point(value)?,
                "right_end" => g.right_end = parse_point(value)?,
                "slider_center" => g.slider_center = parse_point(value)?,
                _ => {}
            }
        }
        Section::Layout => match key {
            "screen_width" => config.layout.screen_width = parse_int(value)?,
            "screen_height" => config.layout.screen_height = parse_int(value)?,
            _ => {}
        },
        Section::Clock => match key {
            "style" => config.clock.use_24h = parse_clock_style(value)?,
            "use_24h" => config.clock.use_24h = parse_bool(value)?,
            _ => {}
        },
        Section::Weather => match key {
            "check_rate_min" => config.weather.check_rate_min = parse_int(value)?,
            _ => {}
        },
        Section::Battery => match key {
            "bar_width" => config.battery.bar_width = parse_int(value)?,
            "empty_mv" => config.battery.empty_mv = parse_int(value)?,
            "full_mv" => config.battery.full_mv = parse_int(value)?,
            _ => {}
        },
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a point like "[43, 126]"
fn parse_point(value: &str) -> Result<Point, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut parts = inner.split(',');
    let x = parse_int(parts.next().ok_or(ParseError::InvalidValue)?.trim())?;
    let y = parse_int(parts.next().ok_or(ParseError::InvalidValue)?.trim())?;
    if parts.next().is_some() {
        return Err(ParseError::InvalidValue);
    }

    Ok(Point::new(x, y))
}

/// Parse "24h" or "12h"
fn parse_clock_style(value: &str) -> Result<bool, ParseError> {
    match parse_string(value)? {
        "24h" => Ok(true),
        "12h" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("[43, 126]"), Ok(Point::new(43, 126)));
        assert_eq!(parse_point("[-5,8]"), Ok(Point::new(-5, 8)));
        assert_eq!(parse_point("[1, 2, 3]"), Err(ParseError::InvalidValue));
        assert_eq!(parse_point("43, 126"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("gauge"), Ok(Section::Gauge));
        assert_eq!(parse_section_header(" battery "), Ok(Section::Battery));
        assert_eq!(
            parse_section_header("stepper.spin"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_inline_comments() {
        assert_eq!(
            parse_key_value("middle = 70 # warmer"),
            Some(("middle", "70"))
        );
        assert_eq!(
            parse_key_value("style = \"12h\" # \"a\" b"),
            Some(("style", "\"12h\""))
        );
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_face_config(""), Ok(FaceConfig::default()));
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Stock face on a larger panel
[gauge]
middle = 20
range = 15
left_start = [40, 130]
slider_center = [4, 7]

[layout]
screen_width = 200
screen_height = 228

[clock]
style = "12h"

[weather]
check_rate_min = 30

[battery] # cell limits
bar_width = 80
empty_mv = 3400
full_mv = 4150
"#;

        let config = parse_face_config(config_str).unwrap();
        assert_eq!(config.gauge.middle, 20);
        assert_eq!(config.gauge.range, 15);
        assert_eq!(config.gauge.left_start, Point::new(40, 130));
        assert_eq!(config.gauge.left_end, Point::new(90, 120)); // default kept
        assert_eq!(config.gauge.slider_center, Point::new(4, 7));
        assert_eq!(config.layout.screen_width, 200);
        assert_eq!(config.layout.screen_height, 228);
        assert!(!config.clock.use_24h);
        assert_eq!(config.weather.check_rate_min, 30);
        assert_eq!(config.battery.bar_width, 80);
        assert_eq!(config.battery.empty_mv, 3400);
        assert_eq!(config.battery.full_mv, 4150);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            parse_face_config("[battery]\nbar_width = 300"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_face_config("[clock]\nstyle = \"13h\""),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_face_config("[weather]\ncheck_rate_min = soon"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_face_config("[motors]\nrpm = 3"),
            Err(ParseError::InvalidSection)
        );
    }
}
