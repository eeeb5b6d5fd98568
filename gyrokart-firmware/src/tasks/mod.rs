//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod console;
pub mod imu;
pub mod motor;

pub use console::console_rx_task;
pub use imu::imu_task;
pub use motor::motor_task;
