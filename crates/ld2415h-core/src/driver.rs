//! Sensor driver
//!
//! Owns the transport, the line framer and the configuration and
//! measurement state, and reconciles the two directions of the
//! protocol: inbound response lines mutate state and fan out to sinks
//! and listeners, while setter calls mark command groups dirty for the
//! dispatcher to flush, one command per poll.

use tracing::{debug, error, trace};

use crate::config::{
    sample_rate_from_name, sample_rate_name, Measurement, NegotiationMode, RadarConfig,
    TrackingMode, UnitOfMeasure,
};
use crate::protocol::{commands, decode, ConfigUpdate, LineFramer, ProtocolError, Response, Transport};

/// Observer notified on every successful measurement decode, in
/// registration order.
pub trait SpeedListener {
    /// Called with the magnitude-derived speed
    fn on_speed(&mut self, _speed: f64) {}

    /// Called with the signed velocity
    fn on_velocity(&mut self, _velocity: f64) {}
}

/// External numeric state target (a telemetry field, a gauge, ...)
pub trait NumberSink {
    /// Push a new value
    fn publish(&mut self, value: f64);
}

/// External enumerated state target, fed symbolic option names
pub trait SelectSink {
    /// Push a new option
    fn publish(&mut self, option: &str);
}

/// Optional sink slots, one per published field. Unwired slots stay
/// `None` and cost nothing.
#[derive(Default)]
struct Sinks {
    min_speed_threshold: Option<Box<dyn NumberSink>>,
    compensation_angle: Option<Box<dyn NumberSink>>,
    sensitivity: Option<Box<dyn NumberSink>>,
    vibration_correction: Option<Box<dyn NumberSink>>,
    relay_trigger_duration: Option<Box<dyn NumberSink>>,
    relay_trigger_speed: Option<Box<dyn NumberSink>>,
    tracking_mode: Option<Box<dyn SelectSink>>,
    sample_rate: Option<Box<dyn SelectSink>>,
    speed: Option<Box<dyn NumberSink>>,
    velocity: Option<Box<dyn NumberSink>>,
}

/// Driver for one LD2415H sensor instance.
///
/// Single-threaded and cooperative: an external scheduler calls
/// [`poll`](Self::poll) repeatedly; setters may be called from the
/// same context between polls. Setting a field never writes to the
/// wire directly, it only marks the field's command group dirty so
/// several same-group changes batch into one command on the next poll.
pub struct Ld2415h<T: Transport> {
    transport: T,
    framer: LineFramer,
    config: RadarConfig,
    measurement: Measurement,

    // Dirty flags, one per outbound command group, plus the one-shot
    // configuration dump request.
    update_speed_angle_sense: bool,
    update_mode_rate_uom: bool,
    update_anti_vibration: bool,
    update_relay_duration_speed: bool,
    update_config: bool,

    listeners: Vec<Box<dyn SpeedListener>>,
    sinks: Sinks,
    last_published_speed: Option<f64>,
    last_published_velocity: Option<f64>,
}

impl<T: Transport> Ld2415h<T> {
    /// Create a driver with power-on default configuration and no
    /// pending commands.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            framer: LineFramer::new(),
            config: RadarConfig::default(),
            measurement: Measurement::default(),
            update_speed_angle_sense: false,
            update_mode_rate_uom: false,
            update_anti_vibration: false,
            update_relay_duration_speed: false,
            update_config: false,
            listeners: Vec::new(),
            sinks: Sinks::default(),
            last_published_speed: None,
            last_published_velocity: None,
        }
    }

    /// One-time startup: request a full configuration dump so the
    /// in-memory state converges on what the sensor actually runs.
    pub fn setup(&mut self) {
        self.update_config = true;
    }

    /// Drain all available transport bytes through the framer, parse
    /// every completed line, then issue at most one pending command.
    pub fn poll(&mut self) -> Result<(), ProtocolError> {
        while self.transport.available()? > 0 {
            let byte = self.transport.read_byte()?;
            if let Some(line) = self.framer.feed(byte) {
                self.handle_line(&line);
            }
        }

        self.dispatch_pending()
    }

    /// Last-known-good configuration
    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Latest decoded reading
    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Firmware version reported by the sensor, empty until the first
    /// firmware line arrives.
    pub fn firmware(&self) -> &str {
        &self.config.firmware
    }

    /// Register a measurement observer. Listeners are notified in
    /// registration order.
    pub fn register_listener(&mut self, listener: Box<dyn SpeedListener>) {
        self.listeners.push(listener);
    }

    // Sink wiring. Each slot is independently optional.

    /// Wire the minimum-speed-threshold sink
    pub fn set_min_speed_threshold_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.min_speed_threshold = Some(sink);
    }

    /// Wire the compensation-angle sink
    pub fn set_compensation_angle_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.compensation_angle = Some(sink);
    }

    /// Wire the sensitivity sink
    pub fn set_sensitivity_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.sensitivity = Some(sink);
    }

    /// Wire the vibration-correction sink
    pub fn set_vibration_correction_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.vibration_correction = Some(sink);
    }

    /// Wire the relay-trigger-duration sink
    pub fn set_relay_trigger_duration_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.relay_trigger_duration = Some(sink);
    }

    /// Wire the relay-trigger-speed sink
    pub fn set_relay_trigger_speed_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.relay_trigger_speed = Some(sink);
    }

    /// Wire the tracking-mode selector sink
    pub fn set_tracking_mode_sink(&mut self, sink: Box<dyn SelectSink>) {
        self.sinks.tracking_mode = Some(sink);
    }

    /// Wire the sample-rate selector sink
    pub fn set_sample_rate_sink(&mut self, sink: Box<dyn SelectSink>) {
        self.sinks.sample_rate = Some(sink);
    }

    /// Wire the speed measurement sink
    pub fn set_speed_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.speed = Some(sink);
    }

    /// Wire the velocity measurement sink
    pub fn set_velocity_sink(&mut self, sink: Box<dyn NumberSink>) {
        self.sinks.velocity = Some(sink);
    }

    // Configuration setters. Each marks exactly its command group
    // dirty; the write happens on the next poll.

    /// Set the minimum speed threshold
    pub fn set_min_speed_threshold(&mut self, speed: u8) {
        self.config.min_speed_threshold = speed;
        self.update_speed_angle_sense = true;
    }

    /// Set the compensation angle
    pub fn set_compensation_angle(&mut self, angle: u8) {
        self.config.compensation_angle = angle;
        self.update_speed_angle_sense = true;
    }

    /// Set the detection sensitivity
    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.config.sensitivity = sensitivity;
        self.update_speed_angle_sense = true;
    }

    /// Set the tracking mode
    pub fn set_tracking_mode(&mut self, mode: TrackingMode) {
        self.config.tracking_mode = mode;
        self.update_mode_rate_uom = true;
    }

    /// Set the tracking mode from a raw wire byte, clamping
    /// out-of-range values to the default.
    pub fn set_tracking_mode_raw(&mut self, raw: u8) {
        self.set_tracking_mode(TrackingMode::from_raw_clamped(raw));
    }

    /// Set the tracking mode by symbolic name and echo the name to the
    /// selector sink, if wired.
    pub fn set_tracking_mode_by_name(&mut self, name: &str) -> Result<(), ProtocolError> {
        let mode = TrackingMode::from_name(name)?;
        self.set_tracking_mode(mode);
        if let Some(sink) = self.sinks.tracking_mode.as_mut() {
            sink.publish(mode.name());
        }
        Ok(())
    }

    /// Set the sample rate (raw index into the firmware rate table)
    pub fn set_sample_rate(&mut self, rate: u8) {
        debug!("set_sample_rate: {rate}");
        self.config.sample_rate = rate;
        self.update_mode_rate_uom = true;
    }

    /// Set the sample rate by symbolic name and echo the name to the
    /// selector sink, if wired.
    pub fn set_sample_rate_by_name(&mut self, name: &str) -> Result<(), ProtocolError> {
        let rate = sample_rate_from_name(name)?;
        self.set_sample_rate(rate);
        if let Some(sink) = self.sinks.sample_rate.as_mut() {
            sink.publish(name);
        }
        Ok(())
    }

    /// Set the reporting unit
    pub fn set_unit_of_measure(&mut self, unit: UnitOfMeasure) {
        self.config.unit_of_measure = unit;
        self.update_mode_rate_uom = true;
    }

    /// Set the anti-vibration compensation level
    pub fn set_vibration_correction(&mut self, correction: u8) {
        self.config.vibration_correction = correction;
        self.update_anti_vibration = true;
    }

    /// Set the relay trigger duration
    pub fn set_relay_trigger_duration(&mut self, duration: u8) {
        self.config.relay_trigger_duration = duration;
        self.update_relay_duration_speed = true;
    }

    /// Set the relay trigger speed
    pub fn set_relay_trigger_speed(&mut self, speed: u8) {
        self.config.relay_trigger_speed = speed;
        self.update_relay_duration_speed = true;
    }

    /// Set the negotiation mode. The sensor offers no write command
    /// for this field; only the local state changes.
    pub fn set_negotiation_mode(&mut self, mode: NegotiationMode) {
        self.config.negotiation_mode = mode;
    }

    /// Request a fresh configuration dump on the next poll
    pub fn request_config(&mut self) {
        self.update_config = true;
    }

    /// Push the current configuration and measurement to every wired
    /// sink. For host-connect events, where the remote side starts
    /// from no state.
    pub fn publish_state(&mut self) {
        if let Some(sink) = self.sinks.speed.as_mut() {
            sink.publish(self.measurement.speed);
            self.last_published_speed = Some(self.measurement.speed);
        }
        if let Some(sink) = self.sinks.velocity.as_mut() {
            sink.publish(self.measurement.velocity);
            self.last_published_velocity = Some(self.measurement.velocity);
        }

        if let Some(sink) = self.sinks.min_speed_threshold.as_mut() {
            sink.publish(self.config.min_speed_threshold as f64);
        }
        if let Some(sink) = self.sinks.compensation_angle.as_mut() {
            sink.publish(self.config.compensation_angle as f64);
        }
        if let Some(sink) = self.sinks.sensitivity.as_mut() {
            sink.publish(self.config.sensitivity as f64);
        }
        if let Some(sink) = self.sinks.vibration_correction.as_mut() {
            sink.publish(self.config.vibration_correction as f64);
        }
        if let Some(sink) = self.sinks.relay_trigger_duration.as_mut() {
            sink.publish(self.config.relay_trigger_duration as f64);
        }
        if let Some(sink) = self.sinks.relay_trigger_speed.as_mut() {
            sink.publish(self.config.relay_trigger_speed as f64);
        }
        if let Some(sink) = self.sinks.tracking_mode.as_mut() {
            sink.publish(self.config.tracking_mode.name());
        }
        if let Some(sink) = self.sinks.sample_rate.as_mut() {
            sink.publish(sample_rate_name(self.config.sample_rate));
        }
    }

    /// Log the full configuration at debug level
    pub fn log_config(&self) {
        debug!(
            firmware = %self.config.firmware,
            min_speed_threshold = self.config.min_speed_threshold,
            compensation_angle = self.config.compensation_angle,
            sensitivity = self.config.sensitivity,
            tracking_mode = self.config.tracking_mode.name(),
            sample_rate = sample_rate_name(self.config.sample_rate),
            unit_of_measure = self.config.unit_of_measure.name(),
            vibration_correction = self.config.vibration_correction,
            relay_trigger_duration = self.config.relay_trigger_duration,
            relay_trigger_speed = self.config.relay_trigger_speed,
            negotiation_mode = self.config.negotiation_mode.name(),
            "sensor configuration"
        );
    }

    fn handle_line(&mut self, line: &[u8]) {
        match decode(line) {
            Ok(Response::Firmware(version)) => {
                self.config.firmware = version;
            }
            Ok(Response::Config(updates)) => {
                for update in updates {
                    self.apply_update(update);
                }
                // A configuration line means the sensor acted on a
                // setting; re-read so local state tracks the device.
                self.update_config = true;
                self.log_config();
            }
            Ok(Response::Measurement { velocity, speed }) => {
                self.apply_measurement(speed, velocity);
            }
            Err(err) => error!("{err}"),
        }
    }

    /// Apply one parsed configuration field and notify its sink.
    fn apply_update(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::MinSpeedThreshold(v) => {
                self.config.min_speed_threshold = v;
                if let Some(sink) = self.sinks.min_speed_threshold.as_mut() {
                    sink.publish(v as f64);
                }
            }
            ConfigUpdate::CompensationAngle(v) => {
                self.config.compensation_angle = v;
                if let Some(sink) = self.sinks.compensation_angle.as_mut() {
                    sink.publish(v as f64);
                }
            }
            ConfigUpdate::Sensitivity(v) => {
                self.config.sensitivity = v;
                if let Some(sink) = self.sinks.sensitivity.as_mut() {
                    sink.publish(v as f64);
                }
            }
            ConfigUpdate::TrackingMode(mode) => {
                self.config.tracking_mode = mode;
                if let Some(sink) = self.sinks.tracking_mode.as_mut() {
                    sink.publish(mode.name());
                }
            }
            ConfigUpdate::SampleRate(v) => {
                self.config.sample_rate = v;
                if let Some(sink) = self.sinks.sample_rate.as_mut() {
                    sink.publish(sample_rate_name(v));
                }
            }
            ConfigUpdate::UnitOfMeasure(unit) => {
                self.config.unit_of_measure = unit;
            }
            ConfigUpdate::VibrationCorrection(v) => {
                self.config.vibration_correction = v;
                if let Some(sink) = self.sinks.vibration_correction.as_mut() {
                    sink.publish(v as f64);
                }
            }
            ConfigUpdate::RelayTriggerDuration(v) => {
                self.config.relay_trigger_duration = v;
                if let Some(sink) = self.sinks.relay_trigger_duration.as_mut() {
                    sink.publish(v as f64);
                }
            }
            ConfigUpdate::RelayTriggerSpeed(v) => {
                self.config.relay_trigger_speed = v;
                if let Some(sink) = self.sinks.relay_trigger_speed.as_mut() {
                    sink.publish(v as f64);
                }
            }
            ConfigUpdate::NegotiationMode(mode) => {
                self.config.negotiation_mode = mode;
            }
        }
    }

    fn apply_measurement(&mut self, speed: f64, velocity: f64) {
        self.measurement = Measurement { speed, velocity };
        trace!("speed updated: {speed}");

        for listener in self.listeners.iter_mut() {
            listener.on_speed(speed);
            listener.on_velocity(velocity);
        }

        // The measurement sinks de-duplicate: repeated identical
        // readings are not republished.
        if self.last_published_speed != Some(speed) {
            if let Some(sink) = self.sinks.speed.as_mut() {
                sink.publish(speed);
                self.last_published_speed = Some(speed);
            }
        }
        if self.last_published_velocity != Some(velocity) {
            if let Some(sink) = self.sinks.velocity.as_mut() {
                sink.publish(velocity);
                self.last_published_velocity = Some(velocity);
            }
        }
    }

    /// Priority scan over the pending-command slots: highest dirty
    /// group wins, at most one command per poll.
    fn dispatch_pending(&mut self) -> Result<(), ProtocolError> {
        if self.update_speed_angle_sense {
            let frame = commands::set_speed_angle_sense(
                self.config.min_speed_threshold,
                self.config.compensation_angle,
                self.config.sensitivity,
            );
            self.issue(&frame)?;
            self.update_speed_angle_sense = false;
            return Ok(());
        }

        if self.update_mode_rate_uom {
            let frame =
                commands::set_mode_rate_uom(self.config.tracking_mode, self.config.sample_rate);
            self.issue(&frame)?;
            self.update_mode_rate_uom = false;
            return Ok(());
        }

        if self.update_anti_vibration {
            let frame = commands::set_anti_vibration(self.config.vibration_correction);
            self.issue(&frame)?;
            self.update_anti_vibration = false;
            return Ok(());
        }

        if self.update_relay_duration_speed {
            let frame = commands::set_relay_duration_speed(
                self.config.relay_trigger_duration,
                self.config.relay_trigger_speed,
            );
            self.issue(&frame)?;
            self.update_relay_duration_speed = false;
            return Ok(());
        }

        if self.update_config {
            self.issue(&commands::GET_CONFIG)?;
            self.update_config = false;
        }

        Ok(())
    }

    fn issue(&mut self, frame: &[u8]) -> Result<(), ProtocolError> {
        debug!("issuing command: {frame:02x?}");

        // Don't assume the response buffer is empty; clear it so the
        // command's response can't inherit a stale prefix.
        self.framer.reset();
        self.transport.write_all(frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockTransport {
        rx: VecDeque<u8>,
        writes: Vec<Vec<u8>>,
    }

    impl MockTransport {
        fn push_line(&mut self, line: &str) {
            self.rx.extend(line.as_bytes());
        }
    }

    impl Transport for MockTransport {
        fn available(&mut self) -> io::Result<usize> {
            Ok(self.rx.len())
        }

        fn read_byte(&mut self) -> io::Result<u8> {
            self.rx
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "rx empty"))
        }

        fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
            self.writes.push(data.to_vec());
            Ok(())
        }
    }

    struct RecordingNumberSink(Rc<RefCell<Vec<f64>>>);

    impl NumberSink for RecordingNumberSink {
        fn publish(&mut self, value: f64) {
            self.0.borrow_mut().push(value);
        }
    }

    struct RecordingSelectSink(Rc<RefCell<Vec<String>>>);

    impl SelectSink for RecordingSelectSink {
        fn publish(&mut self, option: &str) {
            self.0.borrow_mut().push(option.to_string());
        }
    }

    struct RecordingListener {
        events: Rc<RefCell<Vec<String>>>,
        tag: &'static str,
    }

    impl SpeedListener for RecordingListener {
        fn on_speed(&mut self, speed: f64) {
            self.events.borrow_mut().push(format!("{}:speed:{speed}", self.tag));
        }

        fn on_velocity(&mut self, velocity: f64) {
            self.events
                .borrow_mut()
                .push(format!("{}:velocity:{velocity}", self.tag));
        }
    }

    fn driver() -> Ld2415h<MockTransport> {
        Ld2415h::new(MockTransport::default())
    }

    #[test]
    fn test_setup_issues_get_config_once() {
        let mut radar = driver();
        radar.setup();

        radar.poll().unwrap();
        assert_eq!(radar.transport.writes, vec![commands::GET_CONFIG.to_vec()]);

        radar.poll().unwrap();
        assert_eq!(radar.transport.writes.len(), 1);
    }

    #[test]
    fn test_config_line_updates_field_and_sink() {
        let mut radar = driver();
        let published = Rc::new(RefCell::new(Vec::new()));
        radar.set_min_speed_threshold_sink(Box::new(RecordingNumberSink(published.clone())));

        radar.transport.push_line("X1:0A\n");
        radar.poll().unwrap();

        assert_eq!(radar.config().min_speed_threshold, 0x0A);
        assert_eq!(*published.borrow(), vec![10.0]);
    }

    #[test]
    fn test_config_line_updates_multiple_fields() {
        let mut radar = driver();
        radar.transport.push_line("X1:0A X9:FF\n");
        radar.poll().unwrap();

        assert_eq!(radar.config().min_speed_threshold, 0x0A);
        assert_eq!(radar.config().relay_trigger_speed, 0xFF);
    }

    #[test]
    fn test_config_line_retriggers_config_request() {
        let mut radar = driver();
        radar.transport.push_line("X1:0A\n");
        radar.poll().unwrap();

        // The parsed dump re-arms the request; the same poll flushes it.
        assert_eq!(radar.transport.writes, vec![commands::GET_CONFIG.to_vec()]);
    }

    #[test]
    fn test_out_of_range_tracking_mode_clamps() {
        let mut radar = driver();
        radar.transport.push_line("X4:05\n");
        radar.poll().unwrap();

        assert_eq!(
            radar.config().tracking_mode,
            TrackingMode::ApproachingAndRetreating
        );
    }

    #[test]
    fn test_firmware_line() {
        let mut radar = driver();
        radar.transport.push_line("No.:20230801E v5.0\n");
        radar.poll().unwrap();

        assert_eq!(radar.firmware(), "20230801E v5.0");
    }

    #[test]
    fn test_measurement_notifies_listeners_in_order() {
        let mut radar = driver();
        let events = Rc::new(RefCell::new(Vec::new()));
        radar.register_listener(Box::new(RecordingListener {
            events: events.clone(),
            tag: "first",
        }));
        radar.register_listener(Box::new(RecordingListener {
            events: events.clone(),
            tag: "second",
        }));

        radar.transport.push_line("V+001.9\n");
        radar.poll().unwrap();

        assert_eq!(radar.measurement(), Measurement { speed: 1.9, velocity: 1.9 });
        assert_eq!(
            *events.borrow(),
            vec![
                "first:speed:1.9",
                "first:velocity:1.9",
                "second:speed:1.9",
                "second:velocity:1.9",
            ]
        );
    }

    #[test]
    fn test_measurement_sinks_deduplicate() {
        let mut radar = driver();
        let speeds = Rc::new(RefCell::new(Vec::new()));
        radar.set_speed_sink(Box::new(RecordingNumberSink(speeds.clone())));

        radar.transport.push_line("V+001.9\nV+001.9\nV-002.5\n");
        radar.poll().unwrap();

        // Three frames, but the repeated reading publishes once.
        assert_eq!(*speeds.borrow(), vec![1.9, 2.5]);
    }

    #[test]
    fn test_setters_batch_into_one_command() {
        let mut radar = driver();
        radar.set_compensation_angle(30);
        radar.set_compensation_angle(45);
        radar.poll().unwrap();

        assert_eq!(radar.transport.writes.len(), 1);
        let frame = &radar.transport.writes[0];
        assert_eq!(frame[2], 0x01);
        assert_eq!(frame[4], 45);

        radar.poll().unwrap();
        assert_eq!(radar.transport.writes.len(), 1);
    }

    #[test]
    fn test_one_command_per_poll_in_priority_order() {
        let mut radar = driver();
        radar.set_vibration_correction(7);
        radar.set_sensitivity(3);
        radar.set_sample_rate(2);
        radar.request_config();

        radar.poll().unwrap();
        radar.poll().unwrap();
        radar.poll().unwrap();
        radar.poll().unwrap();

        let opcodes: Vec<u8> = radar.transport.writes.iter().map(|w| w[2]).collect();
        assert_eq!(opcodes, vec![0x01, 0x02, 0x03, 0x07]);
    }

    #[test]
    fn test_issue_resets_framer() {
        let mut radar = driver();
        // Unterminated garbage sits in the framer...
        radar.transport.push_line("V+0");
        radar.poll().unwrap();

        // ...a command write clears it...
        radar.request_config();
        radar.poll().unwrap();

        // ...so the next full line parses clean.
        radar.transport.push_line("X1:0C\n");
        radar.poll().unwrap();
        assert_eq!(radar.config().min_speed_threshold, 0x0C);
    }

    #[test]
    fn test_symbolic_setters() {
        let mut radar = driver();
        let modes = Rc::new(RefCell::new(Vec::new()));
        radar.set_tracking_mode_sink(Box::new(RecordingSelectSink(modes.clone())));

        radar.set_tracking_mode_by_name("Retreating").unwrap();
        assert_eq!(radar.config().tracking_mode, TrackingMode::Retreating);
        assert_eq!(*modes.borrow(), vec!["Retreating"]);

        radar.set_sample_rate_by_name("~6 fps").unwrap();
        assert_eq!(radar.config().sample_rate, 0x02);

        assert!(radar.set_tracking_mode_by_name("Sideways").is_err());
        assert!(radar.set_sample_rate_by_name("~44 fps").is_err());
    }

    #[test]
    fn test_malformed_line_leaves_state_unchanged() {
        let mut radar = driver();
        radar.transport.push_line("Q99\nV\n");
        radar.poll().unwrap();

        assert_eq!(radar.measurement(), Measurement::default());
        assert_eq!(*radar.config(), RadarConfig::default());
    }

    #[test]
    fn test_publish_state_pushes_everything_wired() {
        let mut radar = driver();
        let numbers = Rc::new(RefCell::new(Vec::new()));
        let selects = Rc::new(RefCell::new(Vec::new()));
        radar.set_sensitivity_sink(Box::new(RecordingNumberSink(numbers.clone())));
        radar.set_sample_rate_sink(Box::new(RecordingSelectSink(selects.clone())));

        radar.publish_state();

        assert_eq!(*numbers.borrow(), vec![10.0]);
        assert_eq!(*selects.borrow(), vec!["~11 fps"]);
    }
}
