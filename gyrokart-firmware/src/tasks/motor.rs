//! Drive motor task
//!
//! Brings the TB6612 bridge out of standby, runs a short drive self-test
//! so a bench operator can verify the wiring, then services motion
//! setpoints from the `MOTION_CMD` signal.

use defmt::*;
use embassy_time::{Duration, Timer};

use gyrokart_drivers::motor::{Tb6612, Tb6612Config};
use gyrokart_hal_stm32f4::Tb6612Port;

use crate::channels::MOTION_CMD;

/// Self-test cruise speed (percent)
const TEST_SPEED: u8 = 50;

/// Self-test turn speed (percent)
const TEST_TURN_SPEED: u8 = 30;

#[embassy_executor::task]
pub async fn motor_task(port: Tb6612Port) {
    info!("Motor task started");

    let mut driver = match Tb6612::new(port, Tb6612Config::default()) {
        Ok(driver) => driver,
        Err(_) => {
            error!("Motor driver rejected configuration");
            return;
        }
    };
    if driver.init().is_err() {
        error!("Motor driver init failed");
        return;
    }

    // Brief wiring check: forward, left, right, stop
    self_test(&mut driver).await;

    loop {
        let cmd = MOTION_CMD.wait().await;
        debug!("Motion command: L={} R={}", cmd.left_speed, cmd.right_speed);
        if driver.drive(cmd).is_err() {
            warn!("Motion command rejected");
        }
    }
}

async fn self_test(driver: &mut Tb6612<Tb6612Port>) {
    info!("Motor self-test: forward");
    driver.move_forward(TEST_SPEED).ok();
    Timer::after(Duration::from_secs(1)).await;

    info!("Motor self-test: turn left");
    driver.turn_left(TEST_TURN_SPEED).ok();
    Timer::after(Duration::from_secs(1)).await;

    info!("Motor self-test: turn right");
    driver.turn_right(TEST_TURN_SPEED).ok();
    Timer::after(Duration::from_secs(1)).await;

    driver.stop_all().ok();
    info!("Motor self-test complete");
}
