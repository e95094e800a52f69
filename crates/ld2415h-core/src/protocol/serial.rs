//! Serial transport
//!
//! The driver talks to the sensor through the small [`Transport`]
//! trait so tests (and alternative byte channels) can stand in for a
//! real UART. [`SerialChannel`] is the production implementation over
//! the `serialport` crate.

use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::Duration;

use super::{ProtocolError, DEFAULT_BAUD_RATE};

/// Byte transport to the sensor: reliable, ordered, non-blocking.
pub trait Transport {
    /// Number of bytes waiting to be read
    fn available(&mut self) -> io::Result<usize>;

    /// Read one byte. Only called when `available()` reported bytes.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Write a complete command frame
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;
}

/// Serial port wrapper implementing [`Transport`]
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
}

impl SerialChannel {
    /// Wrap an already-opened port
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }
}

impl Transport for SerialChannel {
    fn available(&mut self) -> io::Result<usize> {
        self.port
            .bytes_to_read()
            .map(|n| n as usize)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.port.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.port.write_all(data)?;
        self.port.flush()
    }
}

/// Open a serial port configured for the sensor (8N1, 9600 baud unless
/// overridden) and wrap it in a [`SerialChannel`].
pub fn open_port(name: &str, baud_rate: Option<u32>) -> Result<SerialChannel, ProtocolError> {
    let baud = baud_rate.unwrap_or(DEFAULT_BAUD_RATE);

    // Short timeout keeps reads responsive; the poll loop never reads
    // more bytes than available() reported anyway.
    let port = serialport::new(name, baud)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(serialport::FlowControl::None)
        .timeout(Duration::from_millis(100))
        .open()
        .map_err(|e| ProtocolError::SerialError(e.to_string()))?;

    Ok(SerialChannel::new(port))
}

/// List the names of available serial ports
pub fn list_ports() -> Vec<String> {
    let mut names: Vec<String> = serialport::available_ports()
        .unwrap_or_default()
        .into_iter()
        .map(|info| info.port_name)
        .collect();
    names.sort();
    names
}
