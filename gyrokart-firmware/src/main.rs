//! Gyrokart Cart Controller Firmware
//!
//! Firmware for the STM32F407VG cart controller board. A JY61P
//! gyroscope/IMU is polled over I2C1 and echoed on the USART1 console,
//! and a TB6612FNG dual H-bridge drives the two wheels from signed
//! per-wheel speed setpoints.

#![no_std]
#![no_main]

mod channels;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::peripherals::USART1;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, BufferedUart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gyrokart_drivers::sensor::Jy61p;
use gyrokart_hal_stm32f4::{
    ConsoleTx, RegisterI2c, Tb6612Port, TimeDelay, SENSOR_BUS_FREQUENCY,
};

use crate::channels::MOTION_CMD;
use gyrokart_core::motion::MotionCommand;

bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<USART1>;
});

/// Console baud rate
const CONSOLE_BAUD: u32 = gyrokart_hal::uart::BAUD_115200;

/// TB6612 PWM carrier frequency
const PWM_FREQUENCY_HZ: u32 = 10_000;

static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Gyrokart firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Sensor bus (PB8 = SCL, PB9 = SDA)
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, SENSOR_BUS_FREQUENCY, Default::default());
    let sensor = Jy61p::new(RegisterI2c::new(i2c), TimeDelay);

    // Console (PA9 = TX, PA10 = RX)
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = CONSOLE_BAUD;

    let uart = BufferedUart::new(
        p.USART1,
        p.PA10, // RX
        p.PA9,  // TX
        Irqs,
        TX_BUF.init([0; 256]),
        RX_BUF.init([0; 64]),
        uart_config,
    )
    .unwrap();
    let (tx, rx) = uart.split();

    // TB6612 bridge: TIM1 CH1/CH2 on PE9/PE11, direction pins on
    // PC4/PC5 (A) and PB0/PB1 (B), standby on PB2
    let pwm = SimplePwm::new(
        p.TIM1,
        Some(PwmPin::new_ch1(p.PE9, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PE11, OutputType::PushPull)),
        None,
        None,
        Hertz(PWM_FREQUENCY_HZ),
        Default::default(),
    );
    let motor_port = Tb6612Port::new(
        pwm,
        Output::new(p.PC4, Level::Low, Speed::Low),
        Output::new(p.PC5, Level::Low, Speed::Low),
        Output::new(p.PB0, Level::Low, Speed::Low),
        Output::new(p.PB1, Level::Low, Speed::Low),
        Output::new(p.PB2, Level::Low, Speed::Low),
    );

    // Spawn tasks
    spawner.spawn(tasks::console_rx_task(rx)).unwrap();
    spawner.spawn(tasks::imu_task(sensor, ConsoleTx::new(tx))).unwrap();
    spawner.spawn(tasks::motor_task(motor_port)).unwrap();

    // Start from a known-stopped setpoint
    MOTION_CMD.signal(MotionCommand::new(0, 0));

    info!("All tasks spawned");
}
