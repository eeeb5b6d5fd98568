//! Gyrokart Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the driver crate is generic
//! over, so the same sensor and motor logic can run against embassy-stm32
//! peripherals on the cart and against plain mocks on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (gyrokart-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gyrokart-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ gyrokart-hal- │       │  host mocks   │
//! │    stm32f4    │       │  (unit tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - register-oriented I2C transactions
//! - [`uart::UartTx`] - blocking serial transmission
//! - [`delay::DelayProvider`] - millisecond/microsecond busy delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use delay::DelayProvider;
pub use i2c::I2cBus;
pub use uart::UartTx;
