//! I2C bus abstractions
//!
//! The sensor client talks to register-mapped devices, so the trait works
//! in terms of (device address, register, data) rather than raw byte
//! streams. Implementations own their retry and timeout policy; a call
//! that returns is either complete or failed, never partially applied.

/// Register-oriented I2C master
pub trait I2cBus {
    /// Error type for bus operations
    type Error;

    /// Write `data` starting at `reg` on the device at `address`
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address (no read/write bit)
    /// * `reg` - first register to write
    /// * `data` - bytes to write
    fn write_registers(&mut self, address: u8, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes starting at `reg` on the device at `address`
    ///
    /// Issues the register address then a repeated-start read.
    fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Per-transaction timeout in milliseconds
    pub timeout_ms: u32,
    /// Transparent retries per transaction
    pub retries: u8,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
            timeout_ms: 100,
            retries: 3,
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        timeout_ms: 100,
        retries: 3,
    };

    /// Fast mode (400 kHz) - the JY61P's maximum
    pub const FAST: Self = Self {
        frequency: 400_000,
        timeout_ms: 100,
        retries: 3,
    };
}
