//! Serial console transmit for STM32F4
//!
//! The console runs on USART1 (PA9 = TX, PA10 = RX) at 115200 baud. The
//! buffered driver is split in the firmware; the TX half lands here so the
//! sensor reporting code only sees the `UartTx` trait.

use embassy_stm32::usart::{BufferedUartTx, Error as UsartError};
use embedded_io::Write;

use gyrokart_hal::UartTx;

/// Console transmit half over the buffered USART driver
pub struct ConsoleTx {
    tx: BufferedUartTx<'static>,
}

impl ConsoleTx {
    pub fn new(tx: BufferedUartTx<'static>) -> Self {
        Self { tx }
    }
}

impl UartTx for ConsoleTx {
    type Error = UsartError;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)?;
        self.tx.flush()
    }
}
