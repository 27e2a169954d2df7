//! Hardware handles and timers shared by every mode controller.
//!
//! One `SharedTools` is built at boot and lives for the whole process.
//! The runner lends it to whichever controller is active, so the pump
//! and valve accounting survives a mode switch until `cleanup` resets it.

use core::time::Duration;
use std::sync::Arc;

use log::warn;

use super::input::{ExplodeToggle, InputAggregator};
use super::player::InputSet;
use super::timer::ActuatorTimer;
use crate::app::ports::{ActuatorPort, Clock, ServoAction};
use crate::config::GameConfig;

/// Result of scoring the balloon after a pump hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalloonScore {
    /// Net fill time in seconds, never negative.
    Filled(f32),
    /// The valve out-vented the pump; both timers were zeroed.
    Clamped { pump_secs: f32, valve_secs: f32 },
}

/// Pump, valve, LED and servo plus the state every mode reads.
pub struct SharedTools<H, C> {
    hw: H,
    clock: C,
    pump: ActuatorTimer,
    valve: ActuatorTimer,
    inputs: Arc<InputAggregator>,
    explode: Arc<ExplodeToggle>,
    config: GameConfig,
}

impl<H: ActuatorPort, C: Clock> SharedTools<H, C> {
    pub fn new(
        hw: H,
        clock: C,
        inputs: Arc<InputAggregator>,
        explode: Arc<ExplodeToggle>,
        config: GameConfig,
    ) -> Self {
        Self {
            hw,
            clock,
            pump: ActuatorTimer::new(),
            valve: ActuatorTimer::new(),
            inputs,
            explode,
            config,
        }
    }

    // ── Pump / valve with accounting ──────────────────────────────

    pub fn pump_open(&mut self) {
        self.pump.open(self.clock.now_us());
        self.hw.set_pump(true);
    }

    pub fn pump_close(&mut self) {
        self.hw.set_pump(false);
        self.pump.close(self.clock.now_us());
    }

    pub fn valve_open(&mut self) {
        self.valve.open(self.clock.now_us());
        self.hw.set_valve(true);
    }

    pub fn valve_close(&mut self) {
        self.hw.set_valve(false);
        self.valve.close(self.clock.now_us());
    }

    /// Zero both accumulators.
    pub fn reset_timers(&mut self) {
        let now = self.clock.now_us();
        self.pump.reset(now);
        self.valve.reset(now);
    }

    /// `pump − valve / damping`, unclamped.
    pub fn balloon_time(&self) -> f32 {
        self.pump.open_time() - self.valve.open_time() / self.config.valve_damping
    }

    /// Compute the balloon time, zeroing both timers if it went negative.
    pub fn score_balloon(&mut self) -> BalloonScore {
        let balloon_time = self.balloon_time();
        if balloon_time < 0.0 {
            let pump_secs = self.pump.open_time();
            let valve_secs = self.valve.open_time();
            warn!(
                "tools: balloon time {:.2}s negative (pump {:.2}s, valve {:.2}s), clamping",
                balloon_time, pump_secs, valve_secs
            );
            self.reset_timers();
            return BalloonScore::Clamped {
                pump_secs,
                valve_secs,
            };
        }
        BalloonScore::Filled(balloon_time)
    }

    /// Pump off, valve closed, LED dark, servo neutral, timers zeroed.
    pub fn park(&mut self) {
        self.pump_close();
        self.valve_close();
        self.hw.led_off();
        self.hw.servo(ServoAction::Reset);
        self.reset_timers();
    }

    // ── Inputs ────────────────────────────────────────────────────

    /// Take the inputs recorded since the last call.
    pub fn consume_inputs(&self) -> InputSet {
        self.inputs.consume()
    }

    pub fn explode_engaged(&self) -> bool {
        self.explode.is_engaged()
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pump_timer(&self) -> &ActuatorTimer {
        &self.pump
    }

    pub fn valve_timer(&self) -> &ActuatorTimer {
        &self.valve
    }
}
