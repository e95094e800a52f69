//! Sensor configuration model
//!
//! Typed configuration and measurement state for the LD2415H, along
//! with the raw byte codes and symbolic name tables the device
//! protocol uses for its enumerated settings.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::protocol::ProtocolError;

/// Which direction of motion the sensor reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingMode {
    /// Report targets moving in either direction (0x00)
    #[default]
    ApproachingAndRetreating,
    /// Report approaching targets only (0x01)
    Approaching,
    /// Report retreating targets only (0x02)
    Retreating,
}

impl TrackingMode {
    /// The byte code used on the wire
    pub fn raw(&self) -> u8 {
        match self {
            TrackingMode::ApproachingAndRetreating => 0x00,
            TrackingMode::Approaching => 0x01,
            TrackingMode::Retreating => 0x02,
        }
    }

    /// Decode a wire byte
    pub fn from_raw(raw: u8) -> Result<Self, ProtocolError> {
        match raw {
            0x00 => Ok(TrackingMode::ApproachingAndRetreating),
            0x01 => Ok(TrackingMode::Approaching),
            0x02 => Ok(TrackingMode::Retreating),
            _ => Err(ProtocolError::InvalidTrackingMode(raw)),
        }
    }

    /// Decode a wire byte, clamping out-of-range values to the default
    pub fn from_raw_clamped(raw: u8) -> Self {
        Self::from_raw(raw).unwrap_or_else(|err| {
            error!("{err}");
            TrackingMode::ApproachingAndRetreating
        })
    }

    /// Symbolic name, as shown in selectors
    pub fn name(&self) -> &'static str {
        match self {
            TrackingMode::ApproachingAndRetreating => "Approaching and Retreating",
            TrackingMode::Approaching => "Approaching",
            TrackingMode::Retreating => "Retreating",
        }
    }

    /// Resolve a symbolic name
    pub fn from_name(name: &str) -> Result<Self, ProtocolError> {
        match name {
            "Approaching and Retreating" => Ok(TrackingMode::ApproachingAndRetreating),
            "Approaching" => Ok(TrackingMode::Approaching),
            "Retreating" => Ok(TrackingMode::Retreating),
            _ => Err(ProtocolError::UnknownName(name.to_string())),
        }
    }
}

/// Unit the sensor reports speeds in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    /// Kilometres per hour (0x00)
    #[default]
    Kph,
    /// Miles per hour (0x01)
    Mph,
    /// Metres per second (0x02)
    Mps,
}

impl UnitOfMeasure {
    /// The byte code used on the wire
    pub fn raw(&self) -> u8 {
        match self {
            UnitOfMeasure::Kph => 0x00,
            UnitOfMeasure::Mph => 0x01,
            UnitOfMeasure::Mps => 0x02,
        }
    }

    /// Decode a wire byte
    pub fn from_raw(raw: u8) -> Result<Self, ProtocolError> {
        match raw {
            0x00 => Ok(UnitOfMeasure::Kph),
            0x01 => Ok(UnitOfMeasure::Mph),
            0x02 => Ok(UnitOfMeasure::Mps),
            _ => Err(ProtocolError::InvalidUnitOfMeasure(raw)),
        }
    }

    /// Decode a wire byte, clamping out-of-range values to km/h
    pub fn from_raw_clamped(raw: u8) -> Self {
        Self::from_raw(raw).unwrap_or_else(|err| {
            error!("{err}");
            UnitOfMeasure::Kph
        })
    }

    /// Symbolic name
    pub fn name(&self) -> &'static str {
        match self {
            UnitOfMeasure::Kph => "km/h",
            UnitOfMeasure::Mph => "mph",
            UnitOfMeasure::Mps => "m/s",
        }
    }

    /// Resolve a symbolic name
    pub fn from_name(name: &str) -> Result<Self, ProtocolError> {
        match name {
            "km/h" => Ok(UnitOfMeasure::Kph),
            "mph" => Ok(UnitOfMeasure::Mph),
            "m/s" => Ok(UnitOfMeasure::Mps),
            _ => Err(ProtocolError::UnknownName(name.to_string())),
        }
    }
}

/// Device-side handshake protocol selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationMode {
    /// Vendor custom agreement (0x01)
    #[default]
    CustomAgreement,
    /// Standard protocol (0x02)
    StandardProtocol,
}

impl NegotiationMode {
    /// The byte code used on the wire
    pub fn raw(&self) -> u8 {
        match self {
            NegotiationMode::CustomAgreement => 0x01,
            NegotiationMode::StandardProtocol => 0x02,
        }
    }

    /// Decode a wire byte
    pub fn from_raw(raw: u8) -> Result<Self, ProtocolError> {
        match raw {
            0x01 => Ok(NegotiationMode::CustomAgreement),
            0x02 => Ok(NegotiationMode::StandardProtocol),
            _ => Err(ProtocolError::InvalidNegotiationMode(raw)),
        }
    }

    /// Decode a wire byte, clamping out-of-range values to the default
    pub fn from_raw_clamped(raw: u8) -> Self {
        Self::from_raw(raw).unwrap_or_else(|err| {
            error!("{err}");
            NegotiationMode::CustomAgreement
        })
    }

    /// Symbolic name
    pub fn name(&self) -> &'static str {
        match self {
            NegotiationMode::CustomAgreement => "Custom Agreement",
            NegotiationMode::StandardProtocol => "Standard Protocol",
        }
    }

    /// Resolve a symbolic name
    pub fn from_name(name: &str) -> Result<Self, ProtocolError> {
        match name {
            "Custom Agreement" => Ok(NegotiationMode::CustomAgreement),
            "Standard Protocol" => Ok(NegotiationMode::StandardProtocol),
            _ => Err(ProtocolError::UnknownName(name.to_string())),
        }
    }
}

/// Name table for the sample-rate setting.
///
/// The raw byte indexes a fixed frame-rate table in the firmware; only
/// these three values are documented.
pub const SAMPLE_RATES: [(&str, u8); 3] = [("~22 fps", 0x00), ("~11 fps", 0x01), ("~6 fps", 0x02)];

/// Resolve a symbolic sample-rate name to its raw byte
pub fn sample_rate_from_name(name: &str) -> Result<u8, ProtocolError> {
    SAMPLE_RATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, raw)| *raw)
        .ok_or_else(|| ProtocolError::UnknownName(name.to_string()))
}

/// Symbolic name for a raw sample-rate byte
pub fn sample_rate_name(raw: u8) -> &'static str {
    SAMPLE_RATES
        .iter()
        .find(|(_, r)| *r == raw)
        .map(|(name, _)| *name)
        .unwrap_or("Unknown")
}

/// Maximum length of the firmware version string, in bytes
pub const FIRMWARE_CAPACITY: usize = 20;

/// Last-known-good sensor configuration.
///
/// Fields start at the module's power-on defaults and are overwritten
/// only by a successful parse of device output; a failed parse never
/// leaves a field half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarConfig {
    /// Minimum speed that produces a report, in the configured unit
    pub min_speed_threshold: u8,
    /// Installation angle compensation
    pub compensation_angle: u8,
    /// Detection sensitivity
    pub sensitivity: u8,
    /// Direction filter
    pub tracking_mode: TrackingMode,
    /// Raw index into the firmware frame-rate table
    pub sample_rate: u8,
    /// Reporting unit
    pub unit_of_measure: UnitOfMeasure,
    /// Anti-vibration compensation level
    pub vibration_correction: u8,
    /// How long the relay output stays closed after a trigger
    pub relay_trigger_duration: u8,
    /// Speed at which the relay output triggers
    pub relay_trigger_speed: u8,
    /// Handshake protocol selection
    pub negotiation_mode: NegotiationMode,
    /// Firmware version string reported by the sensor
    pub firmware: String,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            min_speed_threshold: 1,
            compensation_angle: 0,
            sensitivity: 10,
            tracking_mode: TrackingMode::default(),
            sample_rate: 1,
            unit_of_measure: UnitOfMeasure::default(),
            vibration_correction: 18,
            relay_trigger_duration: 0,
            relay_trigger_speed: 1,
            negotiation_mode: NegotiationMode::default(),
            firmware: String::new(),
        }
    }
}

/// The latest decoded reading, updated as a pair on every successful
/// measurement parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Magnitude-derived speed
    pub speed: f64,
    /// Signed velocity; negative for retreating targets
    pub velocity: f64,
}
