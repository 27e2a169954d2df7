//! Port traits — the hexagonal boundary between game logic and the rig.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ModeController / GameRunner (domain)
//! ```
//!
//! Driven adapters (the balloon rig, the clock, event sinks) implement
//! these traits. The domain consumes them via generics, so mode logic
//! never touches GPIO or PWM directly.

use core::time::Duration;

use crate::game::player::Rgb;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Named LED animations. Both are blocking for their full duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedAnimation {
    /// Brightness swells and fades repeatedly.
    Sinus,
    /// Brightness ramps up once, like a filling bar.
    LoadBar,
}

/// Servo commands. Each blocks until the servo has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoAction {
    /// Swing to the release angle.
    Eject,
    /// Return to the holding angle.
    Reset,
    /// Release the balloon, then return to the holding angle.
    EjectAndReset,
}

/// Write-side port: the domain calls this to command the rig.
pub trait ActuatorPort {
    /// Switch the pump on or off.
    fn set_pump(&mut self, on: bool);

    /// Open (vent) or close the release valve.
    fn set_valve(&mut self, open: bool);

    /// Set the LED colour. Only visible while the LED is on.
    fn set_led_colour(&mut self, rgb: Rgb);

    fn led_on(&mut self);

    fn led_off(&mut self);

    /// Play an animation in `colour`, blocking for `duration`.
    fn led_animation(&mut self, animation: LedAnimation, colour: Rgb, duration: Duration);

    /// Drive the eject servo.
    fn servo(&mut self, action: ServoAction);

    /// Pump off, valve closed, LED dark.
    fn all_off(&mut self) {
        self.set_pump(false);
        self.set_valve(false);
        self.led_off();
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source plus the blocking delay used for game pacing.
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin.
    fn now_us(&self) -> u64;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`GameEvent`](super::events::GameEvent)s
/// through this port. Adapters decide where they go (serial log, MQTT
/// status topic, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GameEvent);
}
