//! Hobby servo on a 50 Hz PWM channel.
//!
//! Standard 0.5–2.5 ms pulse across 0–180°. Each move blocks for the
//! configured settle time so the arm reaches its angle before the next
//! command.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::ActuatorError;

/// 50 Hz frame.
const FRAME_US: u32 = 20_000;
const MIN_PULSE_US: u32 = 500;
const MAX_PULSE_US: u32 = 2_500;
const MAX_ANGLE: u8 = 180;

/// Pulse width for `angle` degrees, clamped to 0–180°.
pub fn pulse_us(angle: u8) -> u32 {
    let angle = u32::from(angle.min(MAX_ANGLE));
    MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE)
}

pub struct Servo<P> {
    pwm: P,
    normal_deg: u8,
    eject_deg: u8,
    settle_ms: u32,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> Servo<P> {
    pub fn new(pwm: P, normal_deg: u8, eject_deg: u8, settle_ms: u32) -> Self {
        Self {
            pwm,
            normal_deg,
            eject_deg,
            settle_ms,
            angle: None,
        }
    }

    pub fn move_to(&mut self, angle: u8, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        let pulse = pulse_us(angle);
        let duty = u32::from(self.pwm.max_duty_cycle()) * pulse / FRAME_US;
        self.pwm
            .set_duty_cycle(duty as u16)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        debug!("servo: {}° ({} us)", angle, pulse);
        delay.delay_ms(self.settle_ms);
        self.angle = Some(angle);
        Ok(())
    }

    pub fn eject(&mut self, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        self.move_to(self.eject_deg, delay)
    }

    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        self.move_to(self.normal_deg, delay)
    }

    pub fn eject_and_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        self.eject(delay)?;
        self.reset(delay)
    }

    /// Last commanded angle, `None` before the first move.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
