//! Protocol errors

use thiserror::Error;

/// Errors that can occur while talking to the sensor
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Serial port error: {0}")]
    SerialError(String),

    #[error("Unknown response: {0}")]
    UnknownResponse(String),

    #[error("Configuration key length invalid: {0:?}")]
    InvalidKey(String),

    #[error("Configuration value length invalid: {0:?}")]
    InvalidValue(String),

    #[error("Unknown parameter {key}:{value}")]
    UnknownParameter { key: String, value: String },

    #[error("Invalid tracking mode: {0:#04x}")]
    InvalidTrackingMode(u8),

    #[error("Invalid unit of measure: {0:#04x}")]
    InvalidUnitOfMeasure(u8),

    #[error("Invalid negotiation mode: {0:#04x}")]
    InvalidNegotiationMode(u8),

    #[error("Unknown option name: {0:?}")]
    UnknownName(String),

    #[error("Firmware value invalid")]
    MalformedFirmware,

    #[error("Speed value invalid: {0}")]
    MalformedMeasurement(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
