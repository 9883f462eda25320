//! Minimal TOML parser for the face configuration
//!
//! Handles only the subset face.toml uses, not full TOML syntax.
//!
//! Supported features:
//! - Key = value pairs (integer, float)
//! - [gesture], [chase] and [burst] section headers
//! - Comments (# ...), whole line or trailing
//!
//! NOT supported:
//! - Strings, booleans, arrays and tables as values
//! - Digit separators (3_000)
//! - Dotted keys

use catcompass_core::config::{
    BurstConfig, ChaseConfig, ConfigError, FaceConfig, GestureConfig,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value does not parse as the key's type
    InvalidValue,
    /// Key not known in its section
    UnknownKey,
    /// Parsed but rejected by `FaceConfig::validate`
    Invalid(ConfigError),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Gesture,
    Chase,
    Burst,
}

/// Parse TOML configuration into a validated FaceConfig
pub fn parse_config(input: &str) -> Result<FaceConfig, ParseError> {
    let mut config = FaceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(ParseError::InvalidLine);
        }

        match section {
            Section::Root => parse_root_key(&mut config, key, value)?,
            Section::Gesture => parse_gesture_key(&mut config.gesture, key, value)?,
            Section::Chase => parse_chase_key(&mut config.chase, key, value)?,
            Section::Burst => parse_burst_key(&mut config.burst, key, value)?,
        }
    }

    config.validate().map_err(ParseError::Invalid)?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "gesture" => Ok(Section::Gesture),
        "chase" => Ok(Section::Chase),
        "burst" => Ok(Section::Burst),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_root_key(c: &mut FaceConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "heading_smoothing" => c.heading_smoothing = parse_float(value)?,
        "bezel_sensitivity" => c.bezel_sensitivity = parse_float(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_gesture_key(g: &mut GestureConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "long_press_ms" => g.long_press_ms = parse_int(value)?,
        "double_tap_ms" => g.double_tap_ms = parse_int(value)?,
        "confirm_slack_ms" => g.confirm_slack_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_chase_key(c: &mut ChaseConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "catch_threshold" => c.catch_threshold = parse_float(value)?,
        "motion_epsilon" => c.motion_epsilon = parse_float(value)?,
        "idle_timeout_ms" => c.idle_timeout_ms = parse_int(value)?,
        "evader_speed_factor" => c.evader_speed_factor = parse_float(value)?,
        "reference_tick_ms" => c.reference_tick_ms = parse_int(value)?,
        "evader_start_fraction" => c.evader_start_fraction = parse_float(value)?,
        "timeout_ms" => c.timeout_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_burst_key(b: &mut BurstConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "duration_ms" => b.duration_ms = parse_int(value)?,
        "particle_count" => b.particle_count = parse_int(value)?,
        "min_speed" => b.min_speed = parse_float(value)?,
        "max_speed" => b.max_speed = parse_float(value)?,
        "gravity" => b.gravity = parse_float(value)?,
        "drag" => b.drag = parse_float(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a float value; integers are accepted
fn parse_float(value: &str) -> Result<f32, ParseError> {
    let v: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidValue)
    }
}
