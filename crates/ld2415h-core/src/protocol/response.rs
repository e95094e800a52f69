//! Response decoding
//!
//! Classifies completed lines from the framer by their leading tag
//! character and parses them into typed values. The sensor speaks
//! three line shapes:
//!
//! - firmware: `No.:20230801E v5.0`
//! - configuration dump: `X1:01 X2:00 X3:05 ... X0:01`
//! - measurement: `V+001.9` (two concatenated signed decimals; the
//!   second is usually omitted for a single reading)
//!
//! Malformed input is reported and discarded; it never corrupts
//! already-applied state.

use tracing::{debug, error};

use super::ProtocolError;
use crate::config::{
    NegotiationMode, TrackingMode, UnitOfMeasure, FIRMWARE_CAPACITY,
};

/// One field decoded from a configuration dump line, in line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigUpdate {
    MinSpeedThreshold(u8),
    CompensationAngle(u8),
    Sensitivity(u8),
    TrackingMode(TrackingMode),
    SampleRate(u8),
    UnitOfMeasure(UnitOfMeasure),
    VibrationCorrection(u8),
    RelayTriggerDuration(u8),
    RelayTriggerSpeed(u8),
    NegotiationMode(NegotiationMode),
}

/// A fully classified and parsed response line
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Firmware version string, already truncated to capacity
    Firmware(String),
    /// Configuration fields in the order they appeared on the line.
    /// May be a prefix of the line if a later token was malformed.
    Config(Vec<ConfigUpdate>),
    /// One decoded speed reading
    Measurement { velocity: f64, speed: f64 },
}

/// Classify a completed line by its leading tag and parse it.
pub fn decode(line: &[u8]) -> Result<Response, ProtocolError> {
    let text = String::from_utf8_lossy(line);

    match line.first() {
        Some(b'N') => parse_firmware(&text),
        Some(b'X') => Ok(Response::Config(parse_config(&text))),
        Some(b'V') => parse_measurement(&text),
        _ => Err(ProtocolError::UnknownResponse(text.into_owned())),
    }
}

/// Parse a firmware line: everything after the first `:`, bounded to
/// the firmware field capacity.
fn parse_firmware(text: &str) -> Result<Response, ProtocolError> {
    let (_, version) = text
        .split_once(':')
        .ok_or(ProtocolError::MalformedFirmware)?;

    let mut version = version.to_string();
    version.truncate(FIRMWARE_CAPACITY);
    Ok(Response::Firmware(version))
}

/// Parse a configuration dump line into an ordered list of updates.
///
/// Tokens alternate key and value, split on `:` and spaces. A key or
/// value of the wrong length aborts the rest of the line; updates
/// decoded before that point stand. An unknown parameter is skipped
/// and parsing continues with the next pair.
fn parse_config(text: &str) -> Vec<ConfigUpdate> {
    let mut updates = Vec::new();
    let mut tokens = text.split([':', ' ']).filter(|t| !t.is_empty());

    while let Some(key) = tokens.next() {
        if key.len() != 2 {
            error!("{}", ProtocolError::InvalidKey(key.to_string()));
            break;
        }

        let Some(value) = tokens.next() else {
            error!("{}", ProtocolError::InvalidValue(String::new()));
            break;
        };
        if value.len() != 2 {
            error!("{}", ProtocolError::InvalidValue(value.to_string()));
            break;
        }

        match parse_config_param(key, value) {
            Ok(Some(update)) => updates.push(update),
            Ok(None) => {}
            Err(err) => error!("{err}"),
        }
    }

    updates
}

/// Decode one key/value pair. Returns `Ok(None)` when the pair is
/// recognizable but carries no update (never the case today, reserved
/// for read-only parameters).
fn parse_config_param(key: &str, value: &str) -> Result<Option<ConfigUpdate>, ProtocolError> {
    if !key.starts_with('X') {
        return Err(ProtocolError::UnknownParameter {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    let raw = u8::from_str_radix(value, 16).map_err(|_| ProtocolError::InvalidValue(value.to_string()))?;

    let update = match key.as_bytes()[1] {
        b'1' => ConfigUpdate::MinSpeedThreshold(raw),
        b'2' => ConfigUpdate::CompensationAngle(raw),
        b'3' => ConfigUpdate::Sensitivity(raw),
        b'4' => ConfigUpdate::TrackingMode(TrackingMode::from_raw_clamped(raw)),
        b'5' => ConfigUpdate::SampleRate(raw),
        b'6' => ConfigUpdate::UnitOfMeasure(UnitOfMeasure::from_raw_clamped(raw)),
        b'7' => ConfigUpdate::VibrationCorrection(raw),
        b'8' => ConfigUpdate::RelayTriggerDuration(raw),
        b'9' => ConfigUpdate::RelayTriggerSpeed(raw),
        b'0' => ConfigUpdate::NegotiationMode(NegotiationMode::from_raw_clamped(raw)),
        _ => {
            debug!("unknown parameter {key}:{value}");
            return Ok(None);
        }
    };

    Ok(Some(update))
}

/// Parse a measurement line.
///
/// Reads the longest valid signed decimal right after the `V` marker
/// as velocity, then a second token as speed. Single-reading frames
/// carry only the velocity; speed falls back to its magnitude.
fn parse_measurement(text: &str) -> Result<Response, ProtocolError> {
    let rest = text
        .split_once('V')
        .map(|(_, rest)| rest)
        .ok_or_else(|| ProtocolError::MalformedMeasurement(text.to_string()))?;

    let (velocity, len) = leading_decimal(rest)
        .ok_or_else(|| ProtocolError::MalformedMeasurement(text.to_string()))?;

    let speed = match leading_decimal(&rest[len..]) {
        Some((speed, _)) => speed,
        None => velocity.abs(),
    };

    Ok(Response::Measurement { velocity, speed })
}

/// Scan the longest leading signed decimal number in `s`.
///
/// Returns the parsed value and the number of bytes consumed. Locale
/// independent: a `.` is the only radix point accepted.
fn leading_decimal(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }

    s[..end].parse().ok().map(|value| (value, end))
}
