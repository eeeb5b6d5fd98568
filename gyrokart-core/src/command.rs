//! Serial console command parsing
//!
//! The console line discipline is one ASCII command byte followed by
//! CRLF. Bytes arrive one at a time from the UART receive path and are
//! accumulated in a bounded buffer; overflow silently resets and drops
//! the partial line.

use heapless::Vec;

/// Receive buffer capacity in bytes
pub const RX_BUFFER_SIZE: usize = 50;

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleCommand {
    /// `a` - start accelerometer calibration
    AccCalibrate,
    /// `m` - start magnetometer calibration
    MagCalibrateStart,
    /// `e` - end magnetometer calibration
    MagCalibrateEnd,
    /// `u` - set sensor bandwidth to 5 Hz
    BandwidthLow,
    /// `U` - set sensor bandwidth to 256 Hz
    BandwidthHigh,
    /// `b` - set sensor UART baud to 9600
    BaudLow,
    /// `B` - set sensor UART baud to 115200
    BaudHigh,
    /// `h` - show the help banner
    Help,
    /// Anything else - reported and otherwise a no-op
    Unknown(u8),
}

impl ConsoleCommand {
    /// Map a command byte to its command
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'a' => ConsoleCommand::AccCalibrate,
            b'm' => ConsoleCommand::MagCalibrateStart,
            b'e' => ConsoleCommand::MagCalibrateEnd,
            b'u' => ConsoleCommand::BandwidthLow,
            b'U' => ConsoleCommand::BandwidthHigh,
            b'b' => ConsoleCommand::BaudLow,
            b'B' => ConsoleCommand::BaudHigh,
            b'h' => ConsoleCommand::Help,
            other => ConsoleCommand::Unknown(other),
        }
    }
}

/// Byte-at-a-time accumulator for console command lines
///
/// Feed receive bytes as they arrive; a command is produced when the
/// CRLF terminator completes a line of at least three bytes, with the
/// byte immediately before the terminator as the command byte.
#[derive(Debug, Default)]
pub struct CommandAccumulator {
    buffer: Vec<u8, RX_BUFFER_SIZE>,
}

impl CommandAccumulator {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed a single received byte
    ///
    /// Returns the parsed command once a complete `X\r\n` line is seen.
    /// A line that fills the buffer is silently dropped as overflow,
    /// even when its terminator lands exactly on the last byte.
    pub fn feed(&mut self, byte: u8) -> Option<ConsoleCommand> {
        if self.buffer.push(byte).is_err() {
            self.reset();
            return None;
        }

        let len = self.buffer.len();
        // Overflow is checked before the terminator
        if len >= RX_BUFFER_SIZE {
            self.reset();
            return None;
        }
        if len < 3 {
            return None;
        }

        if self.buffer[len - 2] == b'\r' && self.buffer[len - 1] == b'\n' {
            let cmd = ConsoleCommand::from_byte(self.buffer[len - 3]);
            self.reset();
            return Some(cmd);
        }

        None
    }

    /// Feed a slice of received bytes, returning the first completed
    /// command
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<ConsoleCommand> {
        for &byte in bytes {
            if let Some(cmd) = self.feed(byte) {
                return Some(cmd);
            }
        }
        None
    }
}
