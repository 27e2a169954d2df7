//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing game events to the serial logger,
//! one structured line per event.

use log::{info, warn};

use crate::app::events::GameEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`GameEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ModeEntered(mode) => info!("MODE  | entered {}", mode),
            GameEvent::IntroFinished(mode) => info!("MODE  | {} intro done", mode),
            GameEvent::ModeSwitched { from, to } => info!("MODE  | {} -> {}", from, to),
            GameEvent::SwitchIgnored => info!("MODE  | switch ignored, intro running"),
            GameEvent::Paused => info!("LOOP  | paused"),
            GameEvent::Resumed => info!("LOOP  | resumed"),
            GameEvent::PlayerCalled(player) => info!("ROUND | calling {}", player),
            GameEvent::RoundWon {
                mode,
                inputs,
                balloon_time,
            } => info!(
                "ROUND | {} won | inputs={:?} | balloon={:.2}s",
                mode, inputs, balloon_time
            ),
            GameEvent::RoundLost { mode, inputs } => {
                info!("ROUND | {} lost | inputs={:?}", mode, inputs);
            }
            GameEvent::Ejected { mode, balloon_time } => {
                info!("ROUND | {} eject at balloon={:.2}s", mode, balloon_time);
            }
            GameEvent::EjectSuppressed { mode, balloon_time } => info!(
                "ROUND | {} explode mode, holding balloon at {:.2}s",
                mode, balloon_time
            ),
            GameEvent::TimersClamped {
                pump_secs,
                valve_secs,
            } => warn!(
                "ROUND | timers clamped | pump={:.2}s valve={:.2}s",
                pump_secs, valve_secs
            ),
            GameEvent::Stats(s) => info!(
                "STATS | mode={:?} cycles={} wins={} losses={} ejects={} clamps={} switches={}",
                s.mode, s.cycles, s.wins, s.losses, s.ejects, s.clamps, s.switches
            ),
        }
    }
}
