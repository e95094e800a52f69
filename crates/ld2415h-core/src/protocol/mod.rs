//! LD2415H serial protocol
//!
//! Binary command frames out, line-oriented ASCII responses back.
//! Framing, response decoding and the wire command templates live
//! here; the stateful driver that ties them together is in
//! [`crate::driver`].

pub mod commands;
mod error;
mod framer;
mod response;
pub mod serial;

pub use error::ProtocolError;
pub use framer::{LineFramer, LINE_BUFFER_CAPACITY};
pub use response::{decode, ConfigUpdate, Response};
pub use serial::{list_ports, open_port, SerialChannel, Transport};

/// Factory baud rate of the sensor UART
pub const DEFAULT_BAUD_RATE: u32 = 9600;
