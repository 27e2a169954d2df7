//! Input router: the single consumer of the [`EdgeBus`].
//!
//! ```text
//!               ┌─ Player{p, level} ─▶ TriggerDecoder ─▶ InputAggregator
//!  EdgeBus ──▶  ├─ ModeButton ───────▶ ModeSwitcher::request()
//!               └─ Explode(on) ──────▶ ExplodeToggle
//! ```
//!
//! Runs in the notification context, never on the game loop thread.

use std::sync::Arc;

use log::info;

use crate::config::GameConfig;
use crate::events::{EdgeBus, InputEdge};
use crate::game::input::{ExplodeToggle, InputAggregator, TriggerDecoder};
use crate::game::player::PlayerId;

use super::events::GameEvent;
use super::ports::EventSink;
use super::switcher::{ModeSwitcher, SwitchRequest};

/// What the router did with one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// The level completed the player's trigger and was recorded.
    Recorded(PlayerId),
    /// The level did not complete a trigger.
    Filtered,
    Switch(SwitchRequest),
    Explode(bool),
}

pub struct InputRouter<S> {
    decoder: TriggerDecoder,
    inputs: Arc<InputAggregator>,
    explode: Arc<ExplodeToggle>,
    switcher: Arc<ModeSwitcher>,
    sink: S,
}

impl<S: EventSink> InputRouter<S> {
    pub fn new(
        config: &GameConfig,
        inputs: Arc<InputAggregator>,
        explode: Arc<ExplodeToggle>,
        switcher: Arc<ModeSwitcher>,
        sink: S,
    ) -> Self {
        Self {
            decoder: TriggerDecoder::new(config.triggers),
            inputs,
            explode,
            switcher,
            sink,
        }
    }

    pub fn handle(&mut self, edge: InputEdge) -> Routed {
        match edge {
            InputEdge::Player { player, level } => {
                if self.decoder.feed(player, level) {
                    self.inputs.record(player);
                    Routed::Recorded(player)
                } else {
                    Routed::Filtered
                }
            }
            InputEdge::ModeButton => {
                let answer = self.switcher.request();
                if answer == SwitchRequest::Ignored {
                    self.sink.emit(&GameEvent::SwitchIgnored);
                }
                Routed::Switch(answer)
            }
            InputEdge::Explode(on) => {
                info!("router: explode toggle {}", if on { "on" } else { "off" });
                self.explode.set(on);
                Routed::Explode(on)
            }
        }
    }

    /// Route everything currently queued; returns how many edges were handled.
    pub fn drain(&mut self, bus: &EdgeBus) -> usize {
        let mut n = 0;
        while let Some(edge) = bus.try_next() {
            self.handle(edge);
            n += 1;
        }
        n
    }

    /// Wait on the bus forever, routing each edge as it arrives.
    pub async fn run(mut self, bus: &EdgeBus) {
        loop {
            let edge = bus.next().await;
            self.handle(edge);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
