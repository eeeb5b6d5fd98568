//! Delay abstractions
//!
//! The sensor scan and the configuration writes need short fixed settling
//! delays between bus transactions.

/// Millisecond/microsecond busy delays
pub trait DelayProvider {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

/// No-op delay for host tests where settling time is irrelevant
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelay;

impl DelayProvider for NoopDelay {
    fn delay_ms(&mut self, _ms: u32) {}

    fn delay_us(&mut self, _us: u32) {}
}
