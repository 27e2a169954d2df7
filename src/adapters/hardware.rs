//! Hardware adapter — bridges the rig drivers to [`ActuatorPort`].
//!
//! Owns the pump and valve relays, the RGB LED, the eject servo and the
//! delay used by the blocking LED and servo sequences. This is the only
//! module in the system that drives actuators. Driver write failures are
//! logged and counted; the game keeps running with whatever still works.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::error;

use crate::app::ports::{ActuatorPort, LedAnimation, ServoAction};
use crate::drivers::relay::Relay;
use crate::drivers::rgb_led::RgbLed;
use crate::drivers::servo::Servo;
use crate::error::ActuatorError;
use crate::game::player::Rgb;

/// Concrete adapter that combines all actuators behind the port trait.
pub struct BalloonRig<O, L, S, D> {
    pump: Relay<O>,
    valve: Relay<O>,
    led: RgbLed<L>,
    servo: Servo<S>,
    delay: D,
    faults: u32,
}

impl<O, L, S, D> BalloonRig<O, L, S, D>
where
    O: OutputPin,
    L: SetDutyCycle,
    S: SetDutyCycle,
    D: DelayNs,
{
    pub fn new(pump: Relay<O>, valve: Relay<O>, led: RgbLed<L>, servo: Servo<S>, delay: D) -> Self {
        Self {
            pump,
            valve,
            led,
            servo,
            delay,
            faults: 0,
        }
    }

    /// Number of failed driver writes since boot.
    pub fn faults(&self) -> u32 {
        self.faults
    }

    pub fn pump_on(&self) -> bool {
        self.pump.is_on()
    }

    pub fn valve_open(&self) -> bool {
        self.valve.is_on()
    }

    pub fn led(&self) -> &RgbLed<L> {
        &self.led
    }

    pub fn servo_angle(&self) -> Option<u8> {
        self.servo.angle()
    }

    fn check(&mut self, what: &str, res: Result<(), ActuatorError>) {
        if let Err(e) = res {
            self.faults = self.faults.saturating_add(1);
            error!("rig: {} failed: {}", what, e);
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<O, L, S, D> ActuatorPort for BalloonRig<O, L, S, D>
where
    O: OutputPin,
    L: SetDutyCycle,
    S: SetDutyCycle,
    D: DelayNs,
{
    fn set_pump(&mut self, on: bool) {
        let res = self.pump.set(on);
        self.check("pump", res);
    }

    fn set_valve(&mut self, open: bool) {
        let res = self.valve.set(open);
        self.check("valve", res);
    }

    fn set_led_colour(&mut self, rgb: Rgb) {
        let res = self.led.set_colour(rgb);
        self.check("led colour", res);
    }

    fn led_on(&mut self) {
        let res = self.led.on();
        self.check("led on", res);
    }

    fn led_off(&mut self) {
        let res = self.led.off();
        self.check("led off", res);
    }

    fn led_animation(&mut self, animation: LedAnimation, colour: Rgb, duration: Duration) {
        let res = self.led.animate(animation, colour, duration, &mut self.delay);
        self.check("led animation", res);
    }

    fn servo(&mut self, action: ServoAction) {
        let res = match action {
            ServoAction::Eject => self.servo.eject(&mut self.delay),
            ServoAction::Reset => self.servo.reset(&mut self.delay),
            ServoAction::EjectAndReset => self.servo.eject_and_reset(&mut self.delay),
        };
        self.check("servo", res);
    }
}
