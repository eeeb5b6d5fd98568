//! Motor port trait and error taxonomy
//!
//! The TB6612FNG driver is generic over a port that owns the actual
//! hardware: two direction pin pairs, two PWM channels, and the standby
//! pin. The port applies exactly what it is told; validation, pair
//! coordination, and retained status live in the driver above it.

use crate::motion::Direction;

/// Logical motor channel on the dual H-bridge
///
/// Channel A drives the left wheel, channel B the right wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    /// Channel A (left wheel)
    A,
    /// Channel B (right wheel)
    B,
}

impl Motor {
    /// Index into per-motor status arrays
    pub fn index(self) -> usize {
        match self {
            Motor::A => 0,
            Motor::B => 1,
        }
    }
}

/// Errors from motor control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError<E> {
    /// A parameter failed validation; no hardware state was touched
    InvalidParameter,
    /// Operation requested while the driver is in standby
    NotInitialized,
    /// The underlying port transaction failed after its own retries
    Port(E),
}

/// Retained per-wheel state, updated only after hardware calls succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorStatus {
    /// Last applied direction
    pub direction: Direction,
    /// Last applied duty percentage
    pub speed_percent: u8,
}

/// Hardware port for a dual H-bridge motor driver
pub trait MotorPort {
    /// Error type for port operations
    type Error;

    /// Drive the direction pin pair for one channel
    fn set_direction(&mut self, motor: Motor, direction: Direction) -> Result<(), Self::Error>;

    /// Set the PWM duty percentage for one channel
    ///
    /// `speed_percent` is already validated to [0, 100] by the caller.
    fn set_speed(&mut self, motor: Motor, speed_percent: u8) -> Result<(), Self::Error>;

    /// Enter or leave standby
    ///
    /// In standby the bridge outputs are high-impedance regardless of the
    /// other inputs.
    fn set_standby(&mut self, standby: bool) -> Result<(), Self::Error>;
}
