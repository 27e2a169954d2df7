//! Game core: players, input aggregation, actuator accounting and modes.
//!
//! ```text
//!   InputAggregator ──consume()──▶ ModeController::run_cycle ──▶ SharedTools
//!                                   (Easy | Medium | Hard)         │
//!                                                                  ├─ pump  + ActuatorTimer
//!                                                                  ├─ valve + ActuatorTimer
//!                                                                  └─ LED, servo
//! ```
//!
//! Nothing in here touches hardware. Actuators are reached through
//! [`ActuatorPort`](crate::app::ports::ActuatorPort) and time through
//! [`Clock`](crate::app::ports::Clock), so the whole module runs on the
//! host in tests.

pub mod input;
pub mod modes;
pub mod player;
pub mod timer;
pub mod tools;

pub use modes::{CycleOutcome, GameMode, ModeController, ModeKind, ModeState};
pub use player::{InputSet, PlayerId, Rgb};
pub use tools::SharedTools;
