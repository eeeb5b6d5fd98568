//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.
//! Signals hold the latest value only: a fresh command overwrites an
//! unconsumed one, which is the desired behavior for both console bytes
//! turned into commands and motion setpoints.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use gyrokart_core::command::ConsoleCommand;
use gyrokart_core::motion::MotionCommand;

/// Latest console command parsed from the serial RX stream
pub static CONSOLE_CMD: Signal<CriticalSectionRawMutex, ConsoleCommand> = Signal::new();

/// Latest motion setpoint for the drive motors
pub static MOTION_CMD: Signal<CriticalSectionRawMutex, MotionCommand> = Signal::new();
