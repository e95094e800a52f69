//! Serial monitor and configuration tool for the LD2415H sensor.
//!
//! Opens the sensor port, applies any one-shot settings given on the
//! command line, then polls forever printing decoded readings.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use ld2415h_core::driver::{Ld2415h, SpeedListener};
use ld2415h_core::protocol::{list_ports, open_port};

#[derive(Parser)]
#[command(name = "ld2415h", version, about = "HLK-LD2415H speed-radar monitor")]
struct Args {
    /// Serial port the sensor is attached to (e.g. /dev/ttyUSB0)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate override (factory default is 9600)
    #[arg(long)]
    baud: Option<u32>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Set the minimum speed threshold before monitoring
    #[arg(long)]
    min_speed: Option<u8>,

    /// Set the compensation angle before monitoring
    #[arg(long)]
    angle: Option<u8>,

    /// Set the detection sensitivity before monitoring
    #[arg(long)]
    sensitivity: Option<u8>,

    /// Set the tracking mode by name (e.g. "Approaching")
    #[arg(long)]
    tracking_mode: Option<String>,

    /// Set the sample rate by name (e.g. "~22 fps")
    #[arg(long)]
    sample_rate: Option<String>,

    /// Set the anti-vibration compensation before monitoring
    #[arg(long)]
    vibration: Option<u8>,

    /// Set the relay trigger duration before monitoring
    #[arg(long)]
    relay_duration: Option<u8>,

    /// Set the relay trigger speed before monitoring
    #[arg(long)]
    relay_speed: Option<u8>,
}

/// Prints every decoded reading to stdout
struct PrintListener;

impl SpeedListener for PrintListener {
    fn on_velocity(&mut self, velocity: f64) {
        println!("velocity {velocity:+.1}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.list_ports {
        for name in list_ports() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(port_name) = args.port else {
        bail!("no serial port given; use --port or --list-ports");
    };

    let channel = open_port(&port_name, args.baud)
        .with_context(|| format!("opening {port_name}"))?;
    let mut radar = Ld2415h::new(channel);
    radar.register_listener(Box::new(PrintListener));
    radar.setup();

    if let Some(v) = args.min_speed {
        radar.set_min_speed_threshold(v);
    }
    if let Some(v) = args.angle {
        radar.set_compensation_angle(v);
    }
    if let Some(v) = args.sensitivity {
        radar.set_sensitivity(v);
    }
    if let Some(name) = args.tracking_mode.as_deref() {
        radar.set_tracking_mode_by_name(name)?;
    }
    if let Some(name) = args.sample_rate.as_deref() {
        radar.set_sample_rate_by_name(name)?;
    }
    if let Some(v) = args.vibration {
        radar.set_vibration_correction(v);
    }
    if let Some(v) = args.relay_duration {
        radar.set_relay_trigger_duration(v);
    }
    if let Some(v) = args.relay_speed {
        radar.set_relay_trigger_speed(v);
    }

    loop {
        radar.poll()?;
        thread::sleep(Duration::from_millis(20));
    }
}
