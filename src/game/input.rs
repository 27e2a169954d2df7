//! Input aggregation shared between the notification context and the game loop.
//!
//! ```text
//!  MQTT callback ─┐                      ┌──────────────────┐
//!                 ├─▶ TriggerDecoder ──▶ │ InputAggregator  │ ──consume()──▶ game loop
//!  input tasks ───┘     (per player)     │ (atomic bitmask) │
//!                                        └──────────────────┘
//! ```
//!
//! `record` and `consume` may interleave freely: recording is a single
//! `fetch_or`, consuming is a single `swap`, so an edge recorded between
//! two consumes is observed by exactly one of them.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use log::debug;
use serde::{Deserialize, Serialize};

use super::player::{InputSet, PlayerId};

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Accumulates "this player acted" signals until the next `consume`.
#[derive(Debug, Default)]
pub struct InputAggregator {
    signalled: AtomicU8,
}

impl InputAggregator {
    pub const fn new() -> Self {
        Self {
            signalled: AtomicU8::new(0),
        }
    }

    /// Mark `player` as having signalled. Safe from any thread.
    pub fn record(&self, player: PlayerId) {
        self.signalled
            .fetch_or(InputSet::player_bit(player), Ordering::AcqRel);
        debug!("input: {} recorded", player);
    }

    /// Take the current set and reset it to all-false in one step.
    pub fn consume(&self) -> InputSet {
        InputSet::from_bits(self.signalled.swap(0, Ordering::AcqRel))
    }

    /// Look at the current set without clearing it.
    #[cfg(test)]
    pub(crate) fn peek(&self) -> InputSet {
        InputSet::from_bits(self.signalled.load(Ordering::Acquire))
    }
}

// ---------------------------------------------------------------------------
// Explode toggle
// ---------------------------------------------------------------------------

/// Externally controlled switch that suppresses the eject celebration.
#[derive(Debug, Default)]
pub struct ExplodeToggle(AtomicBool);

impl ExplodeToggle {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn set(&self, engaged: bool) {
        self.0.store(engaged, Ordering::Release);
    }

    pub fn is_engaged(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// Trigger decoding
// ---------------------------------------------------------------------------

/// Logic level reported by a player station (`"1"` = high, `"0"` = low).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    /// Parse a transport payload. Anything but `"0"`/`"1"` is rejected.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        match payload.trim_ascii() {
            b"1" => Some(Self::High),
            b"0" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Condition under which a station's level stream counts as a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// A `"0"` immediately following a `"1"` (button released).
    FallingEdge,
    /// Every `"0"`, regardless of the previous level.
    LevelLow,
}

/// Per-player edge detector in front of the aggregator.
#[derive(Debug, Clone)]
pub struct TriggerDecoder {
    kinds: [TriggerKind; PlayerId::COUNT],
    last: [Option<Level>; PlayerId::COUNT],
}

impl TriggerDecoder {
    pub fn new(kinds: [TriggerKind; PlayerId::COUNT]) -> Self {
        Self {
            kinds,
            last: [None; PlayerId::COUNT],
        }
    }

    /// Feed one level sample; returns `true` when it completes a trigger.
    pub fn feed(&mut self, player: PlayerId, level: Level) -> bool {
        let slot = player.index();
        let previous = self.last[slot].replace(level);
        match (self.kinds[slot], level) {
            (TriggerKind::FallingEdge, Level::Low) => previous == Some(Level::High),
            (TriggerKind::LevelLow, Level::Low) => true,
            (_, Level::High) => false,
        }
    }
}
