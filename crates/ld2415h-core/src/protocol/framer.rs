//! Response line framing
//!
//! Accumulates the byte stream from the sensor UART into complete,
//! newline-terminated response lines. The sensor pads its output with
//! NUL and 0xFF filler bytes which are stripped here, before parsing
//! ever sees them.

use tracing::trace;

/// Fixed capacity of the line buffer. Sized for the longest
/// configuration dump line the sensor emits.
pub const LINE_BUFFER_CAPACITY: usize = 64;

/// Accumulates transport bytes into terminator-delimited lines.
///
/// One instance owns one fixed-size buffer for the lifetime of the
/// driver. A completed line is handed out as a copy; the buffer itself
/// never escapes.
pub struct LineFramer {
    buffer: [u8; LINE_BUFFER_CAPACITY],
    cursor: usize,
}

impl LineFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self {
            buffer: [0; LINE_BUFFER_CAPACITY],
            cursor: 0,
        }
    }

    /// Feed one byte from the transport.
    ///
    /// Returns the accumulated line when `byte` completes one. NUL,
    /// 0xFF and carriage returns are discarded, as are blank lines.
    /// Once the buffer is full, further payload bytes are dropped
    /// until the next terminator or `reset()`.
    pub fn feed(&mut self, byte: u8) -> Option<Vec<u8>> {
        match byte {
            0x00 | 0xFF | b'\r' => None,

            b'\n' => {
                if self.cursor == 0 {
                    return None;
                }

                let line = self.buffer[..self.cursor].to_vec();
                self.buffer[self.cursor..].fill(0);
                self.cursor = 0;
                trace!("response received: {}", String::from_utf8_lossy(&line));
                Some(line)
            }

            _ => {
                if self.cursor == self.buffer.len() {
                    trace!("line buffer full, dropping byte {byte:#04x}");
                } else {
                    self.buffer[self.cursor] = byte;
                    self.cursor += 1;
                }
                None
            }
        }
    }

    /// Zero the buffer and rewind the cursor.
    ///
    /// Called before every outbound command write so the next parsed
    /// line cannot contain a stale prefix from an unterminated frame.
    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.cursor = 0;
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed_all(framer: &mut LineFramer, bytes: &[u8]) -> Vec<Vec<u8>> {
        bytes.iter().filter_map(|b| framer.feed(*b)).collect()
    }

    #[test]
    fn test_complete_line() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"V+001.9\r\n");
        assert_eq!(lines, vec![b"V+001.9".to_vec()]);
    }

    #[test]
    fn test_filler_bytes_stripped() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, &[0xFF, 0x00, b'N', b'o', 0xFF, b'.', b'\r', b'\n']);
        assert_eq!(lines, vec![b"No.".to_vec()]);
    }

    #[test]
    fn test_blank_lines_suppressed() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"\n\r\n\nX1:01\n\n");
        assert_eq!(lines, vec![b"X1:01".to_vec()]);
    }

    #[test]
    fn test_overflow_drops_bytes() {
        let mut framer = LineFramer::new();
        // Twice the capacity, no terminator: cursor must pin at capacity.
        for _ in 0..(LINE_BUFFER_CAPACITY * 2) {
            assert_eq!(framer.feed(b'A'), None);
        }
        assert_eq!(framer.cursor, LINE_BUFFER_CAPACITY);

        // The terminator still yields a line of exactly capacity bytes.
        let line = framer.feed(b'\n').expect("line after overflow");
        assert_eq!(line.len(), LINE_BUFFER_CAPACITY);
        assert_eq!(framer.cursor, 0);
    }

    #[test]
    fn test_reset_zeroes_buffer() {
        let mut framer = LineFramer::new();
        feed_all(&mut framer, b"stale partial frame");
        framer.reset();
        assert_eq!(framer.cursor, 0);
        assert!(framer.buffer.iter().all(|b| *b == 0));

        // A line parsed after reset carries nothing of the stale frame.
        let lines = feed_all(&mut framer, b"X1:0A\n");
        assert_eq!(lines, vec![b"X1:0A".to_vec()]);
    }
}
