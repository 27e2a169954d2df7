//! Cumulative on-time accounting for a binary actuator.
//!
//! One instance tracks the pump, another the release valve. Timestamps are
//! monotonic microseconds from the [`Clock`](crate::app::ports::Clock) port,
//! so the timer itself never reads a clock and stays deterministic in tests.

/// Accumulates how long an actuator has been open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActuatorTimer {
    /// Accumulated open time in microseconds.
    open_us: u64,
    /// Start of the current open interval, if open.
    started_at_us: Option<u64>,
}

impl ActuatorTimer {
    pub const fn new() -> Self {
        Self {
            open_us: 0,
            started_at_us: None,
        }
    }

    /// Start an open interval at `now_us`.
    ///
    /// Opening an already-open actuator keeps the original start time, so
    /// repeated opens never discard elapsed time.
    pub fn open(&mut self, now_us: u64) {
        if self.started_at_us.is_none() {
            self.started_at_us = Some(now_us);
        }
    }

    /// End the current open interval and add its length to the total.
    ///
    /// No-op when not open: a second `close()` must not count the same
    /// interval twice.
    pub fn close(&mut self, now_us: u64) {
        if let Some(start) = self.started_at_us.take() {
            self.open_us = self.open_us.saturating_add(now_us.saturating_sub(start));
        }
    }

    /// Zero the accumulated time. An interval in progress restarts at `now_us`.
    pub fn reset(&mut self, now_us: u64) {
        self.open_us = 0;
        if self.started_at_us.is_some() {
            self.started_at_us = Some(now_us);
        }
    }

    /// Accumulated open time in seconds (closed intervals only).
    pub fn open_time(&self) -> f32 {
        self.open_us as f32 / 1_000_000.0
    }

    pub fn is_open(&self) -> bool {
        self.started_at_us.is_some()
    }
}
