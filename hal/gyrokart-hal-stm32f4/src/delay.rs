//! Busy-wait delays backed by the embassy time driver

use embassy_time::{block_for, Duration};

use gyrokart_hal::DelayProvider;

/// Blocking delay provider for driver probe/settle waits
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeDelay;

impl DelayProvider for TimeDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
