//! Hardware driver implementations
//!
//! This crate provides the two device drivers the cart needs, generic
//! over the traits in gyrokart-core and gyrokart-hal:
//!
//! - TB6612FNG dual H-bridge motor driver (pair-coordinated)
//! - JY61P gyroscope/IMU client with I2C address scanning

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
pub mod sensor;
