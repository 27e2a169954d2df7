//! Mode-switch gate between the button context and the game loop.
//!
//! ```text
//!            intro done               request()
//!   INTRO ───────────────▶ ARMED ───────────────▶ REQUESTED
//!     ▲                                               │
//!     └────────────── take_request() (runner) ────────┘
//! ```
//!
//! The gate is one atomic, so a press can never slip in between the
//! runner taking a request and the next controller's intro starting.
//! Requests while in INTRO are ignored; repeated requests while REQUESTED
//! coalesce into one switch.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use log::{debug, info};

const INTRO: u8 = 0;
const ARMED: u8 = 1;
const REQUESTED: u8 = 2;

/// How the switcher answered a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchRequest {
    /// The loop will switch at its next iteration boundary.
    Accepted,
    /// The active mode's intro has not finished.
    Ignored,
}

/// Whether the game loop is calling `run_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Paused,
}

#[derive(Debug)]
pub struct ModeSwitcher {
    gate: AtomicU8,
    paused: AtomicBool,
}

impl ModeSwitcher {
    /// Starts with an intro pending, matching a freshly built controller.
    pub const fn new() -> Self {
        Self {
            gate: AtomicU8::new(INTRO),
            paused: AtomicBool::new(false),
        }
    }

    /// Ask for the next mode. Safe from any thread.
    pub fn request(&self) -> SwitchRequest {
        match self
            .gate
            .compare_exchange(ARMED, REQUESTED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                info!("switch: requested");
                SwitchRequest::Accepted
            }
            Err(REQUESTED) => SwitchRequest::Accepted,
            Err(_) => {
                debug!("switch: intro pending, ignoring request");
                SwitchRequest::Ignored
            }
        }
    }

    /// Runner side: claim a pending request. The gate re-enters INTRO
    /// for the controller about to be built.
    pub fn take_request(&self) -> bool {
        self.gate
            .compare_exchange(REQUESTED, INTRO, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Runner side: the active controller finished its intro.
    pub fn intro_finished(&self) {
        let _ = self
            .gate
            .compare_exchange(INTRO, ARMED, Ordering::AcqRel, Ordering::Acquire);
    }

    pub fn intro_pending(&self) -> bool {
        self.gate.load(Ordering::Acquire) == INTRO
    }

    pub fn is_requested(&self) -> bool {
        self.gate.load(Ordering::Acquire) == REQUESTED
    }

    /// Hold the loop; no `run_cycle` calls until [`resume`](Self::resume).
    /// Safe from any thread, e.g. an operator holding the rig.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }

    pub fn phase(&self) -> RunPhase {
        if self.paused.load(Ordering::Acquire) {
            RunPhase::Paused
        } else {
            RunPhase::Running
        }
    }
}

impl Default for ModeSwitcher {
    fn default() -> Self {
        Self::new()
    }
}
