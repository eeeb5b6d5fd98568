//! Motion types for the two-wheel cart
//!
//! A motion command carries one signed speed per wheel: the sign encodes
//! direction, the magnitude the PWM duty percentage. The translation to a
//! per-wheel (direction, magnitude) pair is pure and validated here; the
//! motor driver never clamps, it only applies what validation accepted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest accepted speed magnitude, in duty-cycle percent
pub const SPEED_LIMIT: i16 = 100;

/// H-bridge output state for one wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Both bridge inputs low - wheel coasts
    #[default]
    Stop,
    /// Wheel driven forward
    Forward,
    /// Wheel driven backward
    Backward,
    /// Both bridge inputs high - active brake
    Brake,
}

/// Errors from motion validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Signed speed outside [-100, 100]
    SpeedOutOfRange,
}

/// Direction and duty magnitude for a single wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelCommand {
    /// Bridge direction
    pub direction: Direction,
    /// Duty-cycle percentage in [0, 100]
    pub speed_percent: u8,
}

impl WheelCommand {
    /// A halted wheel
    pub const STOP: Self = Self {
        direction: Direction::Stop,
        speed_percent: 0,
    };

    /// Translate a signed speed into a direction/magnitude pair
    ///
    /// Positive drives forward, negative backward (magnitude taken),
    /// zero halts the wheel. Values outside [-100, 100] are rejected;
    /// no clamping is performed.
    pub fn from_signed(speed: i16) -> Result<Self, MotionError> {
        if !(-SPEED_LIMIT..=SPEED_LIMIT).contains(&speed) {
            return Err(MotionError::SpeedOutOfRange);
        }

        let direction = match speed {
            s if s > 0 => Direction::Forward,
            s if s < 0 => Direction::Backward,
            _ => Direction::Stop,
        };

        Ok(Self {
            direction,
            speed_percent: speed.unsigned_abs() as u8,
        })
    }

    /// Forward at the given duty percentage
    pub fn forward(speed_percent: u8) -> Result<Self, MotionError> {
        if speed_percent > SPEED_LIMIT as u8 {
            return Err(MotionError::SpeedOutOfRange);
        }
        Ok(Self {
            direction: Direction::Forward,
            speed_percent,
        })
    }

    /// Backward at the given duty percentage
    pub fn backward(speed_percent: u8) -> Result<Self, MotionError> {
        if speed_percent > SPEED_LIMIT as u8 {
            return Err(MotionError::SpeedOutOfRange);
        }
        Ok(Self {
            direction: Direction::Backward,
            speed_percent,
        })
    }
}

/// Signed per-wheel speed request, constructed by the caller and consumed
/// immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionCommand {
    /// Left wheel speed in [-100, 100]
    pub left_speed: i16,
    /// Right wheel speed in [-100, 100]
    pub right_speed: i16,
}

impl MotionCommand {
    /// Create a motion command; range checking happens on translation
    pub const fn new(left_speed: i16, right_speed: i16) -> Self {
        Self {
            left_speed,
            right_speed,
        }
    }

    /// Translate both wheels, rejecting the whole command if either
    /// signed speed is out of range
    pub fn wheel_commands(&self) -> Result<(WheelCommand, WheelCommand), MotionError> {
        let left = WheelCommand::from_signed(self.left_speed)?;
        let right = WheelCommand::from_signed(self.right_speed)?;
        Ok((left, right))
    }
}
