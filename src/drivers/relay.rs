//! Relay / MOSFET driver for the pump and the release valve.
//!
//! Binary output only. Polarity is fixed at construction so callers always
//! speak in "on"/"off" regardless of wiring.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

pub struct Relay<P> {
    pin: P,
    polarity: Polarity,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Wrap `pin` and drive it to the off level immediately.
    pub fn new(pin: P, polarity: Polarity) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            polarity,
            on: true,
        };
        relay.set(false)?;
        Ok(relay)
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
