//! Mode controllers: the per-cycle game state machine.
//!
//! ```text
//!            first run_cycle                    every later run_cycle
//!  ┌───────┐ ───────────────▶ ┌────────┐ ◀──────────────────────────┐
//!  │ INTRO │  intro(), Waiting│ ACTIVE │ consume ▶ predicate ▶ win/lose
//!  └───────┘                  └────────┘ ────────────────────────────┘
//! ```
//!
//! Each variant implements [`GameMode`]; [`ModeController`] is the closed
//! set the runner holds. `cleanup` takes `self` by value, so a controller
//! cannot be driven again once it has released the rig.

use core::fmt;
use core::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use super::player::{InputSet, PlayerId, Rgb};
use super::tools::{BalloonScore, SharedTools};
use crate::app::events::GameEvent;
use crate::app::ports::{ActuatorPort, Clock, EventSink, LedAnimation, ServoAction};
use crate::config::GameConfig;

mod easy;
mod hard;
mod medium;

pub use easy::EasyMode;
pub use hard::{HardMode, pick_player};
pub use medium::MediumMode;

/// Idle colour shown between rounds in every mode.
pub const IDLE_COLOUR: Rgb = (255, 0, 0);

/// Colour of the pump-hold load bar.
pub const WIN_COLOUR: Rgb = (255, 255, 255);

// ---------------------------------------------------------------------------
// Mode kind
// ---------------------------------------------------------------------------

/// The three difficulty levels, in switch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Easy,
    Medium,
    Hard,
}

impl ModeKind {
    /// Next mode in the Easy → Medium → Hard → Easy cycle.
    pub const fn successor(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Pump hold / visual cue on a win.
    pub fn cue(self, config: &GameConfig) -> Duration {
        let ms = match self {
            Self::Easy => config.easy_cue_ms,
            Self::Medium => config.medium_cue_ms,
            Self::Hard => config.hard_cue_ms,
        };
        Duration::from_millis(u64::from(ms))
    }

    pub const fn intro_colour(self) -> Rgb {
        match self {
            Self::Easy => (0, 255, 0),
            Self::Medium => (0, 0, 255),
            Self::Hard => (255, 0, 0),
        }
    }

    /// Whether the intro vents the balloon through the valve.
    pub const fn vents_during_intro(self) -> bool {
        matches!(self, Self::Hard)
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Per-instance state
// ---------------------------------------------------------------------------

/// Flags carried by one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    /// Intro not yet played.
    pub first_cycle: bool,
    /// The intro animation is running.
    pub interrupt_active: bool,
    /// Last cycle produced no outcome (intro only).
    pub waiting: bool,
    /// The previous win ejected; timers restart on the next win.
    pub won: bool,
    /// Hard mode's previous pick.
    pub last_player: Option<PlayerId>,
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            first_cycle: true,
            interrupt_active: false,
            waiting: false,
            won: false,
            last_player: None,
        }
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}

/// What one `run_cycle` call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Intro cycle; no win check happened.
    Waiting,
    /// Win predicate held and the pump ran.
    Won { balloon_time: f32, ejected: bool },
    /// Win predicate held but the balloon time came out negative.
    Clamped,
    /// Win predicate failed.
    Lost,
}

// ---------------------------------------------------------------------------
// Mode trait
// ---------------------------------------------------------------------------

/// Behaviour shared by every difficulty level.
pub trait GameMode {
    fn kind(&self) -> ModeKind;

    fn state(&self) -> &ModeState;

    /// One-shot intro animation. Called from the first `run_cycle`.
    fn intro<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    );

    /// One game-loop iteration.
    fn run_cycle<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    ) -> CycleOutcome;

    /// Release the rig: pump and valve closed, LED off, servo neutral,
    /// timers zeroed.
    fn cleanup<H: ActuatorPort, C: Clock>(self, tools: &mut SharedTools<H, C>)
    where
        Self: Sized,
    {
        info!("mode: {} cleanup", self.kind());
        tools.park();
    }
}

// ---------------------------------------------------------------------------
// Shared cycle steps
// ---------------------------------------------------------------------------

/// Play `kind`'s intro and leave the LED on the idle colour.
///
/// A venting intro closes the valve again afterwards and zeroes both
/// timers, so the vent never counts against the first round.
pub(crate) fn play_intro<H: ActuatorPort, C: Clock>(
    kind: ModeKind,
    state: &mut ModeState,
    tools: &mut SharedTools<H, C>,
    sink: &mut impl EventSink,
) {
    state.interrupt_active = true;
    if kind.vents_during_intro() {
        tools.valve_open();
    }
    let intro = Duration::from_millis(u64::from(tools.config().intro_ms));
    let hw = tools.hw_mut();
    hw.led_on();
    hw.led_animation(LedAnimation::Sinus, kind.intro_colour(), intro);
    hw.set_led_colour(IDLE_COLOUR);
    if kind.vents_during_intro() {
        // Leftover pressure is gone; the first round starts from zero.
        tools.valve_close();
        tools.reset_timers();
    }
    state.interrupt_active = false;
    state.first_cycle = false;
    info!("mode: {} intro finished", kind);
    sink.emit(&GameEvent::IntroFinished(kind));
}

/// Winning branch: pump for the cue, score, maybe eject.
pub(crate) fn play_win<H: ActuatorPort, C: Clock>(
    kind: ModeKind,
    state: &mut ModeState,
    inputs: InputSet,
    tools: &mut SharedTools<H, C>,
    sink: &mut impl EventSink,
) -> CycleOutcome {
    if state.won {
        state.won = false;
        tools.reset_timers();
    }

    tools.valve_close();
    tools.pump_open();
    let cue = kind.cue(tools.config());
    tools.hw_mut().led_animation(LedAnimation::LoadBar, WIN_COLOUR, cue);
    tools.pump_close();

    let balloon_time = match tools.score_balloon() {
        BalloonScore::Clamped {
            pump_secs,
            valve_secs,
        } => {
            sink.emit(&GameEvent::TimersClamped {
                pump_secs,
                valve_secs,
            });
            return CycleOutcome::Clamped;
        }
        BalloonScore::Filled(t) => t,
    };

    info!("mode: {} win {:?}, balloon {:.2}s", kind, inputs, balloon_time);
    sink.emit(&GameEvent::RoundWon {
        mode: kind,
        inputs,
        balloon_time,
    });

    let mut ejected = false;
    if balloon_time > tools.config().balloon_threshold_secs {
        if tools.explode_engaged() {
            sink.emit(&GameEvent::EjectSuppressed {
                mode: kind,
                balloon_time,
            });
        } else {
            tools.hw_mut().servo(ServoAction::EjectAndReset);
            state.won = true;
            ejected = true;
            sink.emit(&GameEvent::Ejected {
                mode: kind,
                balloon_time,
            });
        }
    }

    CycleOutcome::Won {
        balloon_time,
        ejected,
    }
}

/// Losing branch: vent and fall back to the idle colour.
pub(crate) fn play_loss<H: ActuatorPort, C: Clock>(
    kind: ModeKind,
    inputs: InputSet,
    tools: &mut SharedTools<H, C>,
    sink: &mut impl EventSink,
) -> CycleOutcome {
    tools.valve_open();
    tools.hw_mut().set_led_colour(IDLE_COLOUR);
    sink.emit(&GameEvent::RoundLost { mode: kind, inputs });
    CycleOutcome::Lost
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The active difficulty level.
pub enum ModeController {
    Easy(EasyMode),
    Medium(MediumMode),
    Hard(HardMode),
}

impl ModeController {
    /// Fresh controller for `kind`, intro pending. `seed` feeds Hard's picks.
    pub fn new(kind: ModeKind, seed: u64) -> Self {
        match kind {
            ModeKind::Easy => Self::Easy(EasyMode::new()),
            ModeKind::Medium => Self::Medium(MediumMode::new()),
            ModeKind::Hard => Self::Hard(HardMode::new(seed)),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Easy(m) => m.kind(),
            Self::Medium(m) => m.kind(),
            Self::Hard(m) => m.kind(),
        }
    }

    pub fn state(&self) -> &ModeState {
        match self {
            Self::Easy(m) => m.state(),
            Self::Medium(m) => m.state(),
            Self::Hard(m) => m.state(),
        }
    }

    /// True until the intro has been played.
    pub fn intro_pending(&self) -> bool {
        self.state().first_cycle
    }

    pub fn run_cycle<H: ActuatorPort, C: Clock>(
        &mut self,
        tools: &mut SharedTools<H, C>,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        match self {
            Self::Easy(m) => m.run_cycle(tools, sink),
            Self::Medium(m) => m.run_cycle(tools, sink),
            Self::Hard(m) => m.run_cycle(tools, sink),
        }
    }

    pub fn cleanup<H: ActuatorPort, C: Clock>(self, tools: &mut SharedTools<H, C>) {
        match self {
            Self::Easy(m) => m.cleanup(tools),
            Self::Medium(m) => m.cleanup(tools),
            Self::Hard(m) => m.cleanup(tools),
        }
    }
}

impl fmt::Debug for ModeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeController")
            .field("kind", &self.kind())
            .field("state", self.state())
            .finish()
    }
}
