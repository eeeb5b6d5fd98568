//! STM32F4-specific HAL for the Gyrokart firmware
//!
//! This crate adapts embassy-stm32 peripherals to the `gyrokart-hal`
//! traits for the F407 cart controller board:
//!
//! - I2C1 register access with bounded retries (JY61P gyroscope)
//! - USART1 console transmit
//! - TIM1 PWM + GPIO direction pins for the TB6612FNG bridge
//!
//! # Features
//!
//! - `stm32f407vg` / `stm32f407zg` - select the exact chip from the firmware
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod delay;
pub mod i2c;
pub mod motor;
pub mod uart;

pub use delay::TimeDelay;
pub use i2c::{I2cBusError, RegisterI2c, SENSOR_BUS_FREQUENCY};
pub use motor::Tb6612Port;
pub use uart::ConsoleTx;
