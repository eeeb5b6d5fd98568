//! Data-update flags
//!
//! The sensor read path marks which register groups were refreshed; the
//! scanner and the periodic print loop consume the marks. The producer
//! runs in receive-processing context and the consumer in the polling
//! loop, so the byte is atomic with release/acquire ordering rather than
//! a plain shared byte.

use portable_atomic::{AtomicU8, Ordering};

/// Edge-triggered record of refreshed register groups
#[derive(Debug, Default)]
pub struct UpdateFlags(AtomicU8);

impl UpdateFlags {
    /// Acceleration group refreshed
    pub const ACC: u8 = 0x01;
    /// Angular-rate group refreshed
    pub const GYRO: u8 = 0x02;
    /// Euler-angle group refreshed
    pub const ANGLE: u8 = 0x04;
    /// Magnetic-field group refreshed
    pub const MAG: u8 = 0x08;
    /// Some other register refreshed
    pub const READ: u8 = 0x80;

    /// Create with no flags set
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    /// Mark the given bits
    pub fn set(&self, bits: u8) {
        self.0.fetch_or(bits, Ordering::Release);
    }

    /// True if any flag is set
    pub fn any(&self) -> bool {
        self.0.load(Ordering::Acquire) != 0
    }

    /// True if all of the given bits are set
    pub fn contains(&self, bits: u8) -> bool {
        self.0.load(Ordering::Acquire) & bits == bits
    }

    /// Clear all flags
    ///
    /// The scanner calls this immediately before every probe attempt so
    /// a stale flag from a previous address can never count as a
    /// response.
    pub fn clear(&self) {
        self.0.store(0, Ordering::Release);
    }

    /// Atomically read and clear all flags
    pub fn take(&self) -> u8 {
        self.0.swap(0, Ordering::AcqRel)
    }
}
