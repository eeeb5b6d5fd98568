//! TB6612FNG port for STM32F4
//!
//! Pin assignment on the F407 cart controller board:
//!
//! ```text
//! Motor A: PE9  -> PWMA (TIM1_CH1)   Motor B: PE11 -> PWMB (TIM1_CH2)
//!          PC4  -> AIN1                       PB0  -> BIN1
//!          PC5  -> AIN2                       PB1  -> BIN2
//! Control: PB2  -> STBY (high = bridge enabled)
//! ```
//!
//! IN1/IN2 truth table per motor: low/low = coast stop, high/low = forward,
//! low/high = backward, high/high = brake.

use core::convert::Infallible;

use embassy_stm32::gpio::Output;
use embassy_stm32::peripherals::TIM1;
use embassy_stm32::timer::simple_pwm::{SimplePwm, SimplePwmChannel};

use gyrokart_core::motion::Direction;
use gyrokart_core::traits::motor::{Motor, MotorPort};

/// GPIO + TIM1 PWM backend for the TB6612 driver
pub struct Tb6612Port {
    ain1: Output<'static>,
    ain2: Output<'static>,
    bin1: Output<'static>,
    bin2: Output<'static>,
    stby: Output<'static>,
    pwm_a: SimplePwmChannel<'static, TIM1>,
    pwm_b: SimplePwmChannel<'static, TIM1>,
}

impl Tb6612Port {
    /// Takes ownership of the direction/standby outputs and the TIM1 PWM.
    ///
    /// CH1 drives motor A, CH2 drives motor B. Both channels start
    /// disabled; `set_speed` enables them on demand.
    pub fn new(
        pwm: SimplePwm<'static, TIM1>,
        ain1: Output<'static>,
        ain2: Output<'static>,
        bin1: Output<'static>,
        bin2: Output<'static>,
        stby: Output<'static>,
    ) -> Self {
        let channels = pwm.split();
        Self {
            ain1,
            ain2,
            bin1,
            bin2,
            stby,
            pwm_a: channels.ch1,
            pwm_b: channels.ch2,
        }
    }
}

impl MotorPort for Tb6612Port {
    type Error = Infallible;

    fn set_direction(&mut self, motor: Motor, direction: Direction) -> Result<(), Self::Error> {
        let (in1, in2) = match motor {
            Motor::A => (&mut self.ain1, &mut self.ain2),
            Motor::B => (&mut self.bin1, &mut self.bin2),
        };
        match direction {
            Direction::Stop => {
                in1.set_low();
                in2.set_low();
            }
            Direction::Forward => {
                in1.set_high();
                in2.set_low();
            }
            Direction::Backward => {
                in1.set_low();
                in2.set_high();
            }
            Direction::Brake => {
                in1.set_high();
                in2.set_high();
            }
        }
        Ok(())
    }

    fn set_speed(&mut self, motor: Motor, speed_percent: u8) -> Result<(), Self::Error> {
        let channel = match motor {
            Motor::A => &mut self.pwm_a,
            Motor::B => &mut self.pwm_b,
        };
        channel.set_duty_cycle_percent(speed_percent.min(100));
        if speed_percent > 0 {
            channel.enable();
        } else {
            channel.disable();
        }
        Ok(())
    }

    fn set_standby(&mut self, standby: bool) -> Result<(), Self::Error> {
        // STBY is active-low standby: pull low to cut the bridge outputs
        if standby {
            self.stby.set_low();
        } else {
            self.stby.set_high();
        }
        Ok(())
    }
}
