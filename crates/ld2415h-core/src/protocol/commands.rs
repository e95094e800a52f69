//! Outbound command frames
//!
//! The sensor accepts fixed-length binary commands, each opening with
//! the `0x43 0x46` ("CF") header and closing with CR LF. Only a few
//! payload bytes vary; the constructors below patch them into the
//! template at their fixed offsets.

use crate::config::TrackingMode;

/// Read back the full sensor configuration. Fixed frame, no payload.
pub const GET_CONFIG: [u8; 13] = [
    0x43, 0x46, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Set minimum speed threshold, compensation angle and sensitivity.
pub fn set_speed_angle_sense(threshold: u8, angle: u8, sensitivity: u8) -> [u8; 8] {
    [0x43, 0x46, 0x01, threshold, angle, sensitivity, 0x0D, 0x0A]
}

/// Set tracking mode and sample rate.
///
/// The third payload byte is reserved by the firmware for the unit of
/// measure but is always written as zero.
pub fn set_mode_rate_uom(mode: TrackingMode, rate: u8) -> [u8; 8] {
    [0x43, 0x46, 0x02, mode.raw(), rate, 0x00, 0x0D, 0x0A]
}

/// Set the anti-vibration compensation level.
pub fn set_anti_vibration(correction: u8) -> [u8; 8] {
    [0x43, 0x46, 0x03, correction, 0x00, 0x00, 0x0D, 0x0A]
}

/// Set relay trigger duration and trigger speed.
pub fn set_relay_duration_speed(duration: u8, speed: u8) -> [u8; 8] {
    [0x43, 0x46, 0x04, duration, speed, 0x00, 0x0D, 0x0A]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_speed_angle_sense_layout() {
        let frame = set_speed_angle_sense(0x01, 0x2D, 0x05);
        assert_eq!(frame, [0x43, 0x46, 0x01, 0x01, 0x2D, 0x05, 0x0D, 0x0A]);
    }

    #[test]
    fn test_mode_rate_uom_layout() {
        let frame = set_mode_rate_uom(TrackingMode::Retreating, 0x02);
        assert_eq!(frame, [0x43, 0x46, 0x02, 0x02, 0x02, 0x00, 0x0D, 0x0A]);
    }

    #[test]
    fn test_anti_vibration_layout() {
        let frame = set_anti_vibration(0x12);
        assert_eq!(frame, [0x43, 0x46, 0x03, 0x12, 0x00, 0x00, 0x0D, 0x0A]);
    }

    #[test]
    fn test_relay_layout() {
        let frame = set_relay_duration_speed(0x03, 0x01);
        assert_eq!(frame, [0x43, 0x46, 0x04, 0x03, 0x01, 0x00, 0x0D, 0x0A]);
    }

    #[test]
    fn test_get_config_layout() {
        assert_eq!(GET_CONFIG.len(), 13);
        assert_eq!(&GET_CONFIG[..3], &[0x43, 0x46, 0x07]);
        assert!(GET_CONFIG[3..].iter().all(|b| *b == 0));
    }
}
