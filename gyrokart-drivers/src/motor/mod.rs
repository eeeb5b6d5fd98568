//! Motor drivers

pub mod tb6612;

pub use tb6612::{Tb6612, Tb6612Config};
