//! Game runner, the single sequential driver of the active mode.
//!
//! [`GameRunner`] owns the [`SharedTools`] and the one live
//! [`ModeController`]. Each [`step`](GameRunner::step) is one loop
//! iteration; mode switches requested through the [`ModeSwitcher`] are
//! honoured only here, between two cycles, so a cycle is never cut short.
//!
//! The runner marks itself paused for the span of a switch so other
//! threads can observe it; the `Paused` branch of `step` serves callers
//! outside the runner that hold the loop through [`ModeSwitcher::pause`].
//!
//! ```text
//!  ModeSwitcher ──take_request()──▶ ┌──────────────────────┐ ──▶ EventSink
//!                                   │      GameRunner       │
//!  InputAggregator ──consume()────▶ │ ModeController · stats│
//!                                   └──────────────────────┘
//!                                              │
//!                                              ▼
//!                                        SharedTools (rig)
//! ```

use core::time::Duration;
use std::sync::Arc;

use log::info;

use crate::error::{Error, Result};
use crate::game::modes::{CycleOutcome, ModeController, ModeKind};
use crate::game::tools::SharedTools;

use super::events::{GameEvent, RoundStats};
use super::ports::{ActuatorPort, Clock, EventSink};
use super::switcher::{ModeSwitcher, RunPhase};

/// Spreads successive Hard-mode seeds apart.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// What one [`GameRunner::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The active controller ran one cycle.
    Cycle(CycleOutcome),
    /// The previous controller was cleaned up and `to` installed.
    Switched { from: ModeKind, to: ModeKind },
    /// The loop is held; no cycle ran.
    Paused,
}

// ───────────────────────────────────────────────────────────────
// GameRunner
// ───────────────────────────────────────────────────────────────

pub struct GameRunner<H, C> {
    tools: SharedTools<H, C>,
    controller: Option<ModeController>,
    switcher: Arc<ModeSwitcher>,
    stats: RoundStats,
    seed_base: u64,
    cycle_interval: Duration,
    grace: Duration,
    pause_poll: Duration,
}

impl<H: ActuatorPort, C: Clock> GameRunner<H, C> {
    /// Build the runner with `initial` as the active mode, intro pending.
    pub fn new(
        tools: SharedTools<H, C>,
        initial: ModeKind,
        switcher: Arc<ModeSwitcher>,
        sink: &mut impl EventSink,
    ) -> Self {
        let config = tools.config();
        let seed_base = config.rng_seed.unwrap_or_else(|| tools.clock().now_us());
        let cycle_interval = Duration::from_millis(u64::from(config.cycle_interval_ms));
        let grace = Duration::from_millis(u64::from(config.switch_grace_ms));
        let pause_poll = Duration::from_millis(u64::from(config.pause_poll_ms));

        let mut runner = Self {
            tools,
            controller: None,
            switcher,
            stats: RoundStats::default(),
            seed_base,
            cycle_interval,
            grace,
            pause_poll,
        };
        runner.install(initial, sink);
        runner
    }

    // ── Loop ──────────────────────────────────────────────────

    /// Run one loop iteration.
    ///
    /// A pending switch request is served first; otherwise the active
    /// controller runs one cycle unless the loop is paused.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Result<StepOutcome> {
        if self.switcher.take_request() {
            return self.switch_mode(sink);
        }

        if self.switcher.phase() == RunPhase::Paused {
            self.tools.sleep(self.pause_poll);
            return Ok(StepOutcome::Paused);
        }

        let controller = self
            .controller
            .as_mut()
            .ok_or(Error::InvalidState("no active mode controller"))?;
        let outcome = controller.run_cycle(&mut self.tools, sink);
        if !controller.intro_pending() {
            self.switcher.intro_finished();
        }
        self.record(outcome);

        self.tools.sleep(self.cycle_interval);
        Ok(StepOutcome::Cycle(outcome))
    }

    /// Drive the loop until a step fails.
    pub fn run(&mut self, sink: &mut impl EventSink) -> Result<()> {
        loop {
            self.step(sink)?;
        }
    }

    /// Clean up the active controller and leave the rig parked.
    pub fn shutdown(&mut self, sink: &mut impl EventSink) {
        if let Some(controller) = self.controller.take() {
            controller.cleanup(&mut self.tools);
        }
        self.tools.hw_mut().all_off();
        sink.emit(&GameEvent::Stats(self.stats));
        info!("runner: shut down after {} cycles", self.stats.cycles);
    }

    // ── Mode switching ────────────────────────────────────────

    fn switch_mode(&mut self, sink: &mut impl EventSink) -> Result<StepOutcome> {
        let old = self
            .controller
            .take()
            .ok_or(Error::InvalidState("switch requested with no active controller"))?;

        self.switcher.pause();
        sink.emit(&GameEvent::Paused);

        let from = old.kind();
        let to = from.successor();
        old.cleanup(&mut self.tools);
        sink.emit(&GameEvent::Stats(self.stats));

        self.stats.switches += 1;
        info!("runner: switching {} -> {}", from, to);
        sink.emit(&GameEvent::ModeSwitched { from, to });
        self.install(to, sink);

        self.tools.sleep(self.grace);
        self.switcher.resume();
        sink.emit(&GameEvent::Resumed);
        Ok(StepOutcome::Switched { from, to })
    }

    fn install(&mut self, kind: ModeKind, sink: &mut impl EventSink) {
        let seed = self.seed_base ^ self.stats.switches.wrapping_mul(SEED_STRIDE);
        self.controller = Some(ModeController::new(kind, seed));
        self.stats.mode = Some(kind);
        sink.emit(&GameEvent::ModeEntered(kind));
    }

    fn record(&mut self, outcome: CycleOutcome) {
        self.stats.cycles += 1;
        match outcome {
            CycleOutcome::Waiting => {}
            CycleOutcome::Won { ejected, .. } => {
                self.stats.wins += 1;
                if ejected {
                    self.stats.ejects += 1;
                }
            }
            CycleOutcome::Clamped => self.stats.clamps += 1,
            CycleOutcome::Lost => self.stats.losses += 1,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn mode(&self) -> Option<ModeKind> {
        self.controller.as_ref().map(ModeController::kind)
    }

    pub fn controller(&self) -> Option<&ModeController> {
        self.controller.as_ref()
    }

    pub fn stats(&self) -> RoundStats {
        self.stats
    }

    pub fn tools(&self) -> &SharedTools<H, C> {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut SharedTools<H, C> {
        &mut self.tools
    }

    pub fn switcher(&self) -> &Arc<ModeSwitcher> {
        &self.switcher
    }
}
