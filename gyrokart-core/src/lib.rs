//! Board-agnostic core logic for the cart firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Motion types and the signed-speed to direction/magnitude translation
//! - Motor port trait and error taxonomy
//! - Serial console command parsing
//! - The atomic update-flags record fed by sensor reads

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod flags;
pub mod motion;
pub mod traits;
