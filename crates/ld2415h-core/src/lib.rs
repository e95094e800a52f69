//! # LD2415H Core Library
//!
//! Driver for the HLK-LD2415H serial speed-radar sensor.
//!
//! The sensor takes fixed-length binary configuration commands and
//! answers with line-oriented ASCII: a firmware banner, configuration
//! dumps, and a stream of speed readings. This crate provides:
//!
//! - Line framing over a raw byte transport
//! - Typed decoding of firmware/configuration/measurement responses
//! - A polling driver that batches configuration writes behind dirty
//!   flags and fans measurements out to sinks and listeners
//!
//! ## Example
//!
//! ```rust,ignore
//! use ld2415h_core::prelude::*;
//!
//! let channel = ld2415h_core::protocol::open_port("/dev/ttyUSB0", None)?;
//! let mut radar = Ld2415h::new(channel);
//! radar.setup();
//!
//! loop {
//!     radar.poll()?;
//!     let reading = radar.measurement();
//!     println!("{:+.1} {}", reading.velocity, radar.config().unit_of_measure.name());
//! }
//! ```

pub mod config;
pub mod driver;
pub mod protocol;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        Measurement, NegotiationMode, RadarConfig, TrackingMode, UnitOfMeasure,
    };
    pub use crate::driver::{Ld2415h, NumberSink, SelectSink, SpeedListener};
    pub use crate::protocol::{ProtocolError, SerialChannel, Transport};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
