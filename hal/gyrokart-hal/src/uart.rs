//! Serial console abstractions
//!
//! The cart echoes parsed sensor values and help text over a serial line.
//! Only the transmit side is abstracted here: receive handling is
//! interrupt-driven and lives with the platform UART, which feeds bytes
//! into the command accumulator.

/// Blocking serial transmitter
///
/// Implementations block until the data is accepted (or buffered for
/// interrupt-driven transmission) or a bounded timeout expires.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write the whole buffer to the serial line
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a string slice to the serial line
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_all(s.as_bytes())
    }
}

/// Console baud rates the sensor side can be switched between
pub const BAUD_9600: u32 = 9_600;
pub const BAUD_115200: u32 = 115_200;

/// Serial configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: BAUD_115200,
        }
    }
}
