//! Outbound game events.
//!
//! Mode controllers and the runner emit these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them.

use crate::game::modes::ModeKind;
use crate::game::player::{InputSet, PlayerId};

/// Structured events emitted by the game core.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new controller became active.
    ModeEntered(ModeKind),

    /// The mode's one-shot intro finished; win checks start next cycle.
    IntroFinished(ModeKind),

    /// Hard mode called up a player for this cycle.
    PlayerCalled(PlayerId),

    /// The win predicate held and the pump ran for the mode's cue.
    RoundWon {
        mode: ModeKind,
        inputs: InputSet,
        balloon_time: f32,
    },

    /// Balloon time crossed the threshold and the servo released the balloon.
    Ejected { mode: ModeKind, balloon_time: f32 },

    /// Threshold crossed but the explode toggle held the balloon in place.
    EjectSuppressed { mode: ModeKind, balloon_time: f32 },

    /// The win predicate failed; the valve vents.
    RoundLost { mode: ModeKind, inputs: InputSet },

    /// Balloon time came out negative; both timers were zeroed.
    TimersClamped { pump_secs: f32, valve_secs: f32 },

    /// A switch request arrived before the active intro finished and was dropped.
    SwitchIgnored,

    /// The active controller was cleaned up and replaced.
    ModeSwitched { from: ModeKind, to: ModeKind },

    /// The loop stopped calling `run_cycle`.
    Paused,

    /// The loop resumed calling `run_cycle`.
    Resumed,

    /// Periodic counters snapshot.
    Stats(RoundStats),
}

/// Running counters kept by the runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    pub mode: Option<ModeKind>,
    pub cycles: u64,
    pub wins: u64,
    pub losses: u64,
    pub ejects: u64,
    pub clamps: u64,
    pub switches: u64,
}
