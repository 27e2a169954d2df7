//! Debouncer for polled digital input lines.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups: the mode button and the
//! optional local player buttons. The input task samples each line at a
//! fixed rate and feeds the raw level in here; a level change is only
//! reported once it has held for the whole debounce window.
//!
//! | Raw level change | Held ≥ window | Reported edge |
//! |------------------|---------------|---------------|
//! | high → low       | yes           | `Falling`     |
//! | low → high       | yes           | `Rising`      |
//! | any              | no            | —             |

/// A debounced level transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stable,
    Settling { since_ms: u32 },
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u32,
    stable_high: bool,
    state: State,
}

impl Debouncer {
    /// `idle_high` is the released level (true for pull-up wiring).
    pub fn new(window_ms: u32, idle_high: bool) -> Self {
        Self {
            window_ms,
            stable_high: idle_high,
            state: State::Stable,
        }
    }

    /// Feed one raw sample taken at `now_ms`.
    pub fn update(&mut self, raw_high: bool, now_ms: u32) -> Option<Edge> {
        if raw_high == self.stable_high {
            // Bounce back to the stable level cancels the pending change.
            self.state = State::Stable;
            return None;
        }

        match self.state {
            State::Stable => {
                self.state = State::Settling { since_ms: now_ms };
                None
            }
            State::Settling { since_ms } => {
                if now_ms.wrapping_sub(since_ms) < self.window_ms {
                    return None;
                }
                self.stable_high = raw_high;
                self.state = State::Stable;
                Some(if raw_high { Edge::Rising } else { Edge::Falling })
            }
        }
    }

    pub fn is_high(&self) -> bool {
        self.stable_high
    }
}
