//! Console receive task
//!
//! Accumulates bytes from the serial console and signals a command once a
//! CRLF-terminated line arrives. Oversized input silently resets the
//! accumulator, so a garbage burst never wedges the parser.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::Read;

use gyrokart_core::command::CommandAccumulator;

use crate::channels::CONSOLE_CMD;

#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Console RX task started");

    let mut accumulator = CommandAccumulator::new();
    let mut buf = [0u8; 1];

    loop {
        match rx.read(&mut buf).await {
            Ok(0) => {}
            Ok(_) => {
                if let Some(cmd) = accumulator.feed(buf[0]) {
                    CONSOLE_CMD.signal(cmd);
                }
            }
            Err(e) => {
                warn!("Console read error: {:?}", e);
                accumulator.reset();
            }
        }
    }
}
