//! JY61P gyroscope task
//!
//! Scans the I2C bus for the sensor at startup, then polls the full
//! acceleration/gyro/mag/angle register block every 500 ms and echoes
//! fresh readings over the serial console. Console commands arriving in
//! between (calibration, bandwidth, sensor baud) are applied before the
//! next poll.

use core::fmt::Write as _;

use defmt::*;
use embassy_time::{Duration, Ticker};

use gyrokart_core::command::ConsoleCommand;
use gyrokart_drivers::sensor::jy61p::reg;
use gyrokart_drivers::sensor::{Baud, Bandwidth, Jy61p};
use gyrokart_hal::UartTx;
use gyrokart_hal_stm32f4::{ConsoleTx, RegisterI2c, TimeDelay};

use crate::channels::CONSOLE_CMD;

/// Sensor poll period
const POLL_MS: u64 = 500;

/// Registers polled each cycle: AX through YAW
const POLL_SPAN: usize = 12;

const BANNER: &str = "\r\n\
    ******************** JY61P Gyroscope Console ********************\r\n";

const HELP: &str = "\r\n\
    Commands (send via UART with \\r\\n):\r\n\
    \x20 a  - Start accelerometer calibration\r\n\
    \x20 m  - Start magnetometer calibration\r\n\
    \x20 e  - End magnetometer calibration\r\n\
    \x20 u  - Set bandwidth to 5Hz\r\n\
    \x20 U  - Set bandwidth to 256Hz\r\n\
    \x20 b  - Set sensor UART baud to 9600\r\n\
    \x20 B  - Set sensor UART baud to 115200\r\n\
    \x20 h  - Show this help information\r\n\
    Data format:\r\n\
    \x20 ACC : X Y Z (g)     GYRO: X Y Z (deg/s)\r\n\
    \x20 ANGLE: X Y Z (deg)  MAG : X Y Z (raw)\r\n\r\n";

#[embassy_executor::task]
pub async fn imu_task(mut sensor: Jy61p<RegisterI2c, TimeDelay>, mut tx: ConsoleTx) {
    info!("IMU task started");

    tx.write_str(BANNER).ok();
    tx.write_str("Scanning I2C bus for JY61P...\r\n").ok();

    match sensor.scan() {
        Ok(addr) => {
            info!("JY61P found at 0x{:02x}", addr);
            let mut line: heapless::String<48> = heapless::String::new();
            let _ = write!(line, "Found JY61P at I2C address: 0x{:02X}\r\n", addr);
            tx.write_str(&line).ok();
        }
        Err(_) => {
            error!("No JY61P found on I2C bus");
            tx.write_str("ERROR: No JY61P found! Please check connections.\r\n")
                .ok();
            return;
        }
    }

    tx.write_str(HELP).ok();

    let mut ticker = Ticker::every(Duration::from_millis(POLL_MS));
    loop {
        if sensor.read_registers(reg::AX, POLL_SPAN).is_err() {
            warn!("Sensor poll failed");
        }

        if let Some(cmd) = CONSOLE_CMD.try_take() {
            handle_command(&mut sensor, &mut tx, cmd);
        }

        sensor.report_updates(&mut tx).ok();
        ticker.next().await;
    }
}

fn handle_command(sensor: &mut Jy61p<RegisterI2c, TimeDelay>, tx: &mut ConsoleTx, cmd: ConsoleCommand) {
    match cmd {
        ConsoleCommand::AccCalibrate => {
            report(tx, sensor.start_acc_calibration().is_ok(), "Accelerometer calibration started.");
        }
        ConsoleCommand::MagCalibrateStart => {
            report(
                tx,
                sensor.start_mag_calibration().is_ok(),
                "Magnetometer calibration started. Send 'e' to end.",
            );
        }
        ConsoleCommand::MagCalibrateEnd => {
            report(tx, sensor.stop_mag_calibration().is_ok(), "Magnetometer calibration ended.");
        }
        ConsoleCommand::BandwidthLow => {
            report(tx, sensor.set_bandwidth(Bandwidth::Hz5).is_ok(), "Bandwidth set to 5Hz.");
        }
        ConsoleCommand::BandwidthHigh => {
            report(tx, sensor.set_bandwidth(Bandwidth::Hz256).is_ok(), "Bandwidth set to 256Hz.");
        }
        ConsoleCommand::BaudLow => {
            report(tx, sensor.set_baud(Baud::B9600).is_ok(), "Sensor UART baud set to 9600.");
        }
        ConsoleCommand::BaudHigh => {
            report(tx, sensor.set_baud(Baud::B115200).is_ok(), "Sensor UART baud set to 115200.");
        }
        ConsoleCommand::Help => {
            tx.write_str(HELP).ok();
        }
        ConsoleCommand::Unknown(byte) => {
            warn!("Unknown console command: 0x{:02x}", byte);
            let mut line: heapless::String<64> = heapless::String::new();
            let _ = write!(
                line,
                "Unknown command: '{}'. Send 'h' for help.\r\n",
                byte as char
            );
            tx.write_str(&line).ok();
        }
    }
}

fn report(tx: &mut ConsoleTx, ok: bool, success: &str) {
    if ok {
        tx.write_str(success).ok();
        tx.write_str("\r\n").ok();
    } else {
        tx.write_str("ERROR: sensor command failed!\r\n").ok();
    }
}
