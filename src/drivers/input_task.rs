//! Async input-line tasks, one cooperative task per digital input.
//!
//! Runs in a dedicated thread using `edge-executor` for scheduling and
//! `async-io-mini` timers for the sample interval (no busy-spinning).
//! Every line is debounced, then turned into an [`InputEdge`] on the bus.
//!
//! ```text
//!  ┌─────────────────────────────────────────────────────────┐
//!  │  Input Thread                                           │
//!  │  ┌───────────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor                     │  │
//!  │  │                                                   │  │
//!  │  │  ┌────────────┐  ┌────────────┐  ┌────────────┐   │  │
//!  │  │  │ Mode button│  │ Player 1   │  │ Player n   │   │  │
//!  │  │  │ 5ms ⏱      │  │ 5ms ⏱      │  │ 5ms ⏱      │   │  │
//!  │  │  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘   │  │
//!  │  └────────┼───────────────┼───────────────┼──────────┘  │
//!  └───────────┼───────────────┼───────────────┼─────────────┘
//!              └───────────────┴──────▶ EdgeBus
//! ```

use core::time::Duration;
use std::time::Instant;

use embedded_hal::digital::InputPin;
use log::{info, warn};

use super::button::{Debouncer, Edge};
use crate::events::{EdgeBus, InputEdge};
use crate::game::input::Level;
use crate::game::player::PlayerId;

/// Upper bound on lines served by one executor.
pub const MAX_LINES: usize = 8;

/// What a line is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Active-low mode button; only presses are reported.
    ModeButton,
    /// Local player station; every settled level change is reported.
    Player(PlayerId),
}

/// Debounce state for one line, independent of how it is sampled.
#[derive(Debug, Clone)]
pub struct LineWatcher {
    role: LineRole,
    debouncer: Debouncer,
}

impl LineWatcher {
    pub fn new(role: LineRole, debounce_ms: u32) -> Self {
        Self {
            role,
            debouncer: Debouncer::new(debounce_ms, true),
        }
    }

    /// Feed one raw sample; returns the edge to publish, if any.
    pub fn sample(&mut self, raw_high: bool, now_ms: u32) -> Option<InputEdge> {
        let edge = self.debouncer.update(raw_high, now_ms)?;
        match (self.role, edge) {
            (LineRole::ModeButton, Edge::Falling) => Some(InputEdge::ModeButton),
            (LineRole::ModeButton, Edge::Rising) => None,
            (LineRole::Player(player), Edge::Falling) => Some(InputEdge::Player {
                player,
                level: Level::Low,
            }),
            (LineRole::Player(player), Edge::Rising) => Some(InputEdge::Player {
                player,
                level: Level::High,
            }),
        }
    }

    pub fn role(&self) -> LineRole {
        self.role
    }
}

/// A pin plus the role it plays.
pub struct InputLine<P> {
    pub pin: P,
    pub role: LineRole,
}

async fn watch_line<P: InputPin>(
    mut line: InputLine<P>,
    debounce_ms: u32,
    poll: Duration,
    bus: &'static EdgeBus,
) {
    let started = Instant::now();
    let mut watcher = LineWatcher::new(line.role, debounce_ms);
    loop {
        match line.pin.is_high() {
            Ok(high) => {
                let now_ms = started.elapsed().as_millis() as u32;
                if let Some(edge) = watcher.sample(high, now_ms) {
                    bus.push(edge);
                }
            }
            Err(_) => warn!("input: {:?} read failed", line.role),
        }
        async_io_mini::Timer::after(poll).await;
    }
}

/// Entry point for the input thread. Spawns one task per line and never
/// returns.
pub fn run_input_lines<P: InputPin + 'static>(
    lines: Vec<InputLine<P>>,
    debounce_ms: u32,
    poll: Duration,
    bus: &'static EdgeBus,
) {
    let executor: edge_executor::LocalExecutor<'_, MAX_LINES> = edge_executor::LocalExecutor::new();

    let total = lines.len();
    for line in lines.into_iter().take(MAX_LINES) {
        info!("input: watching {:?}", line.role);
        executor.spawn(watch_line(line, debounce_ms, poll, bus)).detach();
    }
    if total > MAX_LINES {
        warn!("input: {} lines configured, only {} served", total, MAX_LINES);
    }

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}
