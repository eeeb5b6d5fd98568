//! I2C register access for STM32F4
//!
//! Wraps the blocking embassy-stm32 I2C master in the `I2cBus` trait used
//! by the JY61P driver. Transfers are retried a fixed number of times
//! because the sensor NACKs while it is busy sampling.

use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Blocking;
use embassy_stm32::time::Hertz;

use gyrokart_hal::I2cBus;

/// Attempts per transfer before giving up
const RETRY_COUNT: u8 = 3;

/// Largest register write: 8-bit register plus a 16-bit value
const WRITE_BUF: usize = 4;

/// SCL frequency for the sensor bus (standard mode)
pub const SENSOR_BUS_FREQUENCY: Hertz = Hertz(100_000);

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Timeout
    Timeout,
    /// CRC error
    Crc,
    /// Overrun
    Overrun,
    /// Write payload exceeds the transfer buffer
    PayloadTooLarge,
    /// Other error
    Other,
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Bus => I2cBusError::Bus,
            I2cError::Arbitration => I2cBusError::ArbitrationLost,
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Crc => I2cBusError::Crc,
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Blocking register-oriented I2C master with retry
pub struct RegisterI2c {
    bus: I2c<'static, Blocking>,
}

impl RegisterI2c {
    pub fn new(bus: I2c<'static, Blocking>) -> Self {
        Self { bus }
    }
}

impl I2cBus for RegisterI2c {
    type Error = I2cBusError;

    fn write_registers(&mut self, address: u8, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame: heapless::Vec<u8, WRITE_BUF> = heapless::Vec::new();
        frame.push(reg).map_err(|_| I2cBusError::PayloadTooLarge)?;
        frame
            .extend_from_slice(data)
            .map_err(|_| I2cBusError::PayloadTooLarge)?;

        let mut last = I2cBusError::Other;
        for _ in 0..RETRY_COUNT {
            match self.bus.blocking_write(address, &frame) {
                Ok(()) => return Ok(()),
                Err(e) => last = e.into(),
            }
        }
        Err(last)
    }

    fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let mut last = I2cBusError::Other;
        for _ in 0..RETRY_COUNT {
            match self.bus.blocking_write_read(address, &[reg], buf) {
                Ok(()) => return Ok(()),
                Err(e) => last = e.into(),
            }
        }
        Err(last)
    }
}
