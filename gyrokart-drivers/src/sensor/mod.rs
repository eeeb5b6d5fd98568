//! Sensor drivers

pub mod jy61p;

pub use jy61p::{Baud, Bandwidth, Jy61p, SensorError};
