//! RGB LED driver.
//!
//! Three PWM channels drive the R/G/B dies of a common-cathode LED.
//! The driver remembers the selected colour separately from whether the
//! LED is lit, so `set_colour` while off only takes effect on `on()`.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use super::led_patterns::{self, FRAME_MS};
use crate::app::ports::LedAnimation;
use crate::error::ActuatorError;
use crate::game::player::Rgb;

pub struct RgbLed<P> {
    channels: [P; 3],
    colour: Rgb,
    lit: bool,
}

impl<P: SetDutyCycle> RgbLed<P> {
    pub fn new(red: P, green: P, blue: P) -> Self {
        Self {
            channels: [red, green, blue],
            colour: (0, 0, 0),
            lit: false,
        }
    }

    pub fn set_colour(&mut self, rgb: Rgb) -> Result<(), ActuatorError> {
        self.colour = rgb;
        if self.lit {
            self.write(rgb)?;
        }
        Ok(())
    }

    pub fn on(&mut self) -> Result<(), ActuatorError> {
        self.lit = true;
        self.write(self.colour)
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.lit = false;
        self.write((0, 0, 0))
    }

    /// Play `animation` for `duration`, then restore the steady state.
    pub fn animate(
        &mut self,
        animation: LedAnimation,
        colour: Rgb,
        duration: Duration,
        delay: &mut impl DelayNs,
    ) -> Result<(), ActuatorError> {
        for frame in led_patterns::frames(animation, colour, duration) {
            self.write(frame)?;
            delay.delay_ms(FRAME_MS);
        }
        if self.lit {
            self.write(self.colour)
        } else {
            self.write((0, 0, 0))
        }
    }

    pub fn colour(&self) -> Rgb {
        self.colour
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn write(&mut self, (r, g, b): Rgb) -> Result<(), ActuatorError> {
        for (channel, level) in self.channels.iter_mut().zip([r, g, b]) {
            channel
                .set_duty_cycle_fraction(u16::from(level), 255)
                .map_err(|_| ActuatorError::PwmWriteFailed)?;
        }
        Ok(())
    }
}
