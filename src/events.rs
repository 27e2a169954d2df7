//! Input edge bus.
//!
//! Edges are produced by:
//! - the MQTT subscription callback (player levels, explode toggle)
//! - the input-line tasks (debounced mode button, local player buttons)
//!
//! and consumed by a single [`InputRouter`](crate::app::router::InputRouter),
//! which folds them into the game's shared state.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ MQTT cb      │────▶│              │     │              │
//! │ Input tasks  │────▶│   EdgeBus    │────▶│ InputRouter  │
//! │              │     │  (bounded)   │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Producers never block: a full bus drops the edge and reports it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::game::input::Level;
use crate::game::player::PlayerId;

/// Maximum number of pending edges.
const EDGE_BUS_DEPTH: usize = 32;

/// One inbound signal, before any game interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdge {
    /// A player station reported a level.
    Player { player: PlayerId, level: Level },
    /// Debounced press of the physical mode button.
    ModeButton,
    /// The explode toggle was switched.
    Explode(bool),
}

/// Bounded multi-producer channel of [`InputEdge`]s.
pub struct EdgeBus {
    channel: Channel<CriticalSectionRawMutex, InputEdge, EDGE_BUS_DEPTH>,
}

impl EdgeBus {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue an edge. Returns `false` if the bus was full and it was dropped.
    pub fn push(&self, edge: InputEdge) -> bool {
        if self.channel.try_send(edge).is_err() {
            warn!("bus: full, dropping {:?}", edge);
            return false;
        }
        true
    }

    /// Pop the oldest edge, if any.
    pub fn try_next(&self) -> Option<InputEdge> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next edge.
    pub async fn next(&self) -> InputEdge {
        self.channel.receive().await
    }

    /// Pop everything currently queued.
    pub fn drain(&self) -> impl Iterator<Item = InputEdge> + '_ {
        core::iter::from_fn(|| self.try_next())
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for EdgeBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide bus shared by the MQTT callback, input tasks and router.
pub static EDGE_BUS: EdgeBus = EdgeBus::new();
