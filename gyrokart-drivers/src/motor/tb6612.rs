//! TB6612FNG dual H-bridge motor driver
//!
//! This driver provides:
//! - Pair-coordinated direction/speed updates for both wheels
//! - Retained per-wheel status that never disagrees with hardware
//! - The two-wheel maneuvers (forward, backward, turn, stop)
//!
//! # Usage
//!
//! ```ignore
//! let mut driver = Tb6612::new(port, Tb6612Config::default())?;
//! driver.init()?;
//! driver.drive(MotionCommand::new(-40, 40))?; // spin in place
//! driver.stop_all()?;
//! ```
//!
//! A pair update applies direction to both wheels before applying speed
//! to either, so a wheel can never run at its old speed in a new
//! direction.

use gyrokart_core::motion::{Direction, MotionCommand, WheelCommand};
use gyrokart_core::traits::motor::{Motor, MotorError, MotorPort, MotorStatus};

/// PWM limits for the driver configuration
const PWM_FREQ_MIN: u32 = 1_000;
const PWM_FREQ_MAX: u32 = 20_000;

/// TB6612FNG driver configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tb6612Config {
    /// PWM carrier frequency in Hz (1-20 kHz)
    pub pwm_frequency: u32,
    /// Largest duty percentage the PWM port should emit
    ///
    /// The duty window is checked for consistency at construction but
    /// not applied as a clamp; speed values pass through unmodified.
    pub max_duty: u8,
    /// Smallest non-zero duty percentage the bridge reacts to
    ///
    /// Informational, like `max_duty`.
    pub min_duty: u8,
}

impl Default for Tb6612Config {
    fn default() -> Self {
        Self {
            pwm_frequency: 10_000,
            max_duty: 95,
            min_duty: 5,
        }
    }
}

impl Tb6612Config {
    fn is_valid(&self) -> bool {
        (PWM_FREQ_MIN..=PWM_FREQ_MAX).contains(&self.pwm_frequency)
            && self.max_duty <= 100
            && self.min_duty < self.max_duty
    }
}

/// TB6612FNG driver state
///
/// Owns the hardware port and the retained per-wheel status. The driver
/// starts in standby; [`Tb6612::init`] must run before any control
/// operation.
pub struct Tb6612<P: MotorPort> {
    port: P,
    config: Tb6612Config,
    initialized: bool,
    status: [MotorStatus; 2],
}

impl<P: MotorPort> Tb6612<P> {
    /// Create a new driver in standby
    ///
    /// Rejects a configuration with an out-of-range PWM frequency or an
    /// inconsistent duty window.
    pub fn new(port: P, config: Tb6612Config) -> Result<Self, MotorError<P::Error>> {
        if !config.is_valid() {
            return Err(MotorError::InvalidParameter);
        }

        Ok(Self {
            port,
            config,
            initialized: false,
            status: [MotorStatus::default(); 2],
        })
    }

    /// Leave standby and bring both wheels to a known halted state
    ///
    /// Idempotent: calling on an initialized driver is a no-op.
    pub fn init(&mut self) -> Result<(), MotorError<P::Error>> {
        if self.initialized {
            return Ok(());
        }

        self.port.set_standby(false).map_err(MotorError::Port)?;
        self.port
            .set_direction(Motor::A, Direction::Stop)
            .map_err(MotorError::Port)?;
        self.port
            .set_direction(Motor::B, Direction::Stop)
            .map_err(MotorError::Port)?;
        self.port.set_speed(Motor::A, 0).map_err(MotorError::Port)?;
        self.port.set_speed(Motor::B, 0).map_err(MotorError::Port)?;

        self.status = [MotorStatus::default(); 2];
        self.initialized = true;
        Ok(())
    }

    /// Stop both wheels and re-enter standby
    pub fn deinit(&mut self) -> Result<(), MotorError<P::Error>> {
        if !self.initialized {
            return Ok(());
        }

        self.stop_all()?;
        self.port.set_standby(true).map_err(MotorError::Port)?;
        self.initialized = false;
        Ok(())
    }

    /// True once `init` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get the configuration
    pub fn config(&self) -> &Tb6612Config {
        &self.config
    }

    /// Retained status for one wheel
    pub fn status(&self, motor: Motor) -> MotorStatus {
        self.status[motor.index()]
    }

    /// Apply a coordinated pair of wheel commands
    ///
    /// Both directions are set before either speed. Retained status is
    /// committed only after all four port calls succeed; on any failure
    /// the error propagates and status keeps the previous values for
    /// both wheels.
    pub fn set_motor_pair(
        &mut self,
        left: WheelCommand,
        right: WheelCommand,
    ) -> Result<(), MotorError<P::Error>> {
        if !self.initialized {
            return Err(MotorError::NotInitialized);
        }
        if left.speed_percent > 100 || right.speed_percent > 100 {
            return Err(MotorError::InvalidParameter);
        }

        self.port
            .set_direction(Motor::A, left.direction)
            .map_err(MotorError::Port)?;
        self.port
            .set_direction(Motor::B, right.direction)
            .map_err(MotorError::Port)?;
        self.port
            .set_speed(Motor::A, left.speed_percent)
            .map_err(MotorError::Port)?;
        self.port
            .set_speed(Motor::B, right.speed_percent)
            .map_err(MotorError::Port)?;

        self.status[Motor::A.index()] = MotorStatus {
            direction: left.direction,
            speed_percent: left.speed_percent,
        };
        self.status[Motor::B.index()] = MotorStatus {
            direction: right.direction,
            speed_percent: right.speed_percent,
        };
        Ok(())
    }

    /// Apply a signed per-wheel motion command
    ///
    /// This is the application-layer entry: validates both signed
    /// speeds, translates them, and applies them as a pair.
    pub fn drive(&mut self, cmd: MotionCommand) -> Result<(), MotorError<P::Error>> {
        if !self.initialized {
            return Err(MotorError::NotInitialized);
        }

        let (left, right) = cmd
            .wheel_commands()
            .map_err(|_| MotorError::InvalidParameter)?;
        self.set_motor_pair(left, right)
    }

    /// Drive both wheels forward at the given duty percentage
    pub fn move_forward(&mut self, speed_percent: u8) -> Result<(), MotorError<P::Error>> {
        let wheel =
            WheelCommand::forward(speed_percent).map_err(|_| MotorError::InvalidParameter)?;
        self.set_motor_pair(wheel, wheel)
    }

    /// Drive both wheels backward at the given duty percentage
    pub fn move_backward(&mut self, speed_percent: u8) -> Result<(), MotorError<P::Error>> {
        let wheel =
            WheelCommand::backward(speed_percent).map_err(|_| MotorError::InvalidParameter)?;
        self.set_motor_pair(wheel, wheel)
    }

    /// Turn left: left wheel halted, right wheel driven forward
    pub fn turn_left(&mut self, speed_percent: u8) -> Result<(), MotorError<P::Error>> {
        let outer =
            WheelCommand::forward(speed_percent).map_err(|_| MotorError::InvalidParameter)?;
        self.set_motor_pair(WheelCommand::STOP, outer)
    }

    /// Turn right: right wheel halted, left wheel driven forward
    pub fn turn_right(&mut self, speed_percent: u8) -> Result<(), MotorError<P::Error>> {
        let outer =
            WheelCommand::forward(speed_percent).map_err(|_| MotorError::InvalidParameter)?;
        self.set_motor_pair(outer, WheelCommand::STOP)
    }

    /// Halt both wheels
    pub fn stop_all(&mut self) -> Result<(), MotorError<P::Error>> {
        self.set_motor_pair(WheelCommand::STOP, WheelCommand::STOP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum PortCall {
        Dir(Motor, Direction),
        Speed(Motor, u8),
        Standby(bool),
    }

    /// Recording port; optionally fails speed writes for one channel
    #[derive(Default)]
    struct MockPort {
        calls: Vec<PortCall, 32>,
        fail_speed_for: Option<Motor>,
    }

    impl MotorPort for MockPort {
        type Error = ();

        fn set_direction(&mut self, motor: Motor, direction: Direction) -> Result<(), ()> {
            self.calls.push(PortCall::Dir(motor, direction)).unwrap();
            Ok(())
        }

        fn set_speed(&mut self, motor: Motor, speed_percent: u8) -> Result<(), ()> {
            self.calls
                .push(PortCall::Speed(motor, speed_percent))
                .unwrap();
            if self.fail_speed_for == Some(motor) {
                return Err(());
            }
            Ok(())
        }

        fn set_standby(&mut self, standby: bool) -> Result<(), ()> {
            self.calls.push(PortCall::Standby(standby)).unwrap();
            Ok(())
        }
    }

    fn ready_driver() -> Tb6612<MockPort> {
        let mut driver = Tb6612::new(MockPort::default(), Tb6612Config::default()).unwrap();
        driver.init().unwrap();
        driver.port.calls.clear();
        driver
    }

    #[test]
    fn bad_config_rejected() {
        let config = Tb6612Config {
            pwm_frequency: 500,
            ..Tb6612Config::default()
        };
        assert!(matches!(
            Tb6612::new(MockPort::default(), config),
            Err(MotorError::InvalidParameter)
        ));
    }

    #[test]
    fn init_releases_standby_and_halts_both_wheels() {
        let mut driver = Tb6612::new(MockPort::default(), Tb6612Config::default()).unwrap();
        driver.init().unwrap();

        assert_eq!(driver.port.calls[0], PortCall::Standby(false));
        assert!(driver.is_initialized());
        assert_eq!(driver.status(Motor::A), MotorStatus::default());
        assert_eq!(driver.status(Motor::B), MotorStatus::default());
    }

    #[test]
    fn control_before_init_is_rejected_without_side_effects() {
        let mut driver = Tb6612::new(MockPort::default(), Tb6612Config::default()).unwrap();

        assert!(matches!(
            driver.drive(MotionCommand::new(30, 30)),
            Err(MotorError::NotInitialized)
        ));
        assert!(matches!(
            driver.move_forward(30),
            Err(MotorError::NotInitialized)
        ));
        assert!(driver.port.calls.is_empty());
        assert_eq!(driver.status(Motor::A), MotorStatus::default());
    }

    #[test]
    fn pair_sets_both_directions_before_either_speed() {
        let mut driver = ready_driver();
        driver.drive(MotionCommand::new(-40, 40)).unwrap();

        assert_eq!(
            driver.port.calls.as_slice(),
            &[
                PortCall::Dir(Motor::A, Direction::Backward),
                PortCall::Dir(Motor::B, Direction::Forward),
                PortCall::Speed(Motor::A, 40),
                PortCall::Speed(Motor::B, 40),
            ]
        );
    }

    #[test]
    fn spin_in_place_updates_both_statuses() {
        let mut driver = ready_driver();
        driver.drive(MotionCommand::new(-40, 40)).unwrap();

        assert_eq!(
            driver.status(Motor::A),
            MotorStatus {
                direction: Direction::Backward,
                speed_percent: 40
            }
        );
        assert_eq!(
            driver.status(Motor::B),
            MotorStatus {
                direction: Direction::Forward,
                speed_percent: 40
            }
        );
    }

    #[test]
    fn partial_failure_leaves_status_unchanged() {
        let mut driver = ready_driver();
        driver.drive(MotionCommand::new(20, 20)).unwrap();
        let before_a = driver.status(Motor::A);
        let before_b = driver.status(Motor::B);

        driver.port.fail_speed_for = Some(Motor::B);
        assert!(matches!(
            driver.drive(MotionCommand::new(-60, 60)),
            Err(MotorError::Port(()))
        ));

        // Both-old, never a mix of old and new
        assert_eq!(driver.status(Motor::A), before_a);
        assert_eq!(driver.status(Motor::B), before_b);
    }

    #[test]
    fn out_of_range_command_touches_no_hardware() {
        let mut driver = ready_driver();
        assert!(matches!(
            driver.drive(MotionCommand::new(101, 0)),
            Err(MotorError::InvalidParameter)
        ));
        assert!(driver.port.calls.is_empty());
    }

    #[test]
    fn turn_left_halts_left_wheel() {
        let mut driver = ready_driver();
        driver.turn_left(30).unwrap();

        let expected = {
            let mut other = ready_driver();
            other
                .set_motor_pair(WheelCommand::STOP, WheelCommand::forward(30).unwrap())
                .unwrap();
            other.port.calls
        };
        assert_eq!(driver.port.calls, expected);
        assert_eq!(driver.status(Motor::A), MotorStatus::default());
        assert_eq!(
            driver.status(Motor::B),
            MotorStatus {
                direction: Direction::Forward,
                speed_percent: 30
            }
        );
    }

    #[test]
    fn turn_right_mirrors_turn_left() {
        let mut driver = ready_driver();
        driver.turn_right(30).unwrap();

        assert_eq!(
            driver.status(Motor::A),
            MotorStatus {
                direction: Direction::Forward,
                speed_percent: 30
            }
        );
        assert_eq!(driver.status(Motor::B), MotorStatus::default());
    }

    #[test]
    fn forward_and_backward_drive_both_wheels() {
        let mut driver = ready_driver();
        driver.move_forward(50).unwrap();
        assert_eq!(driver.status(Motor::A).direction, Direction::Forward);
        assert_eq!(driver.status(Motor::B).direction, Direction::Forward);

        driver.move_backward(50).unwrap();
        assert_eq!(driver.status(Motor::A).direction, Direction::Backward);
        assert_eq!(driver.status(Motor::B).direction, Direction::Backward);
    }

    #[test]
    fn stop_all_zeroes_both_wheels() {
        let mut driver = ready_driver();
        driver.move_forward(50).unwrap();
        driver.stop_all().unwrap();

        assert_eq!(driver.status(Motor::A), MotorStatus::default());
        assert_eq!(driver.status(Motor::B), MotorStatus::default());
    }

    #[test]
    fn deinit_returns_to_standby() {
        let mut driver = ready_driver();
        driver.deinit().unwrap();

        assert!(!driver.is_initialized());
        assert_eq!(
            driver.port.calls.last(),
            Some(&PortCall::Standby(true))
        );
        assert!(matches!(
            driver.stop_all(),
            Err(MotorError::NotInitialized)
        ));
    }
}
