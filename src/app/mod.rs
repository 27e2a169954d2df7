//! Application core — game orchestration, zero I/O.
//!
//! The runner drives the active mode controller, the switcher gates mode
//! changes, and the router folds inbound edges into shared game state.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer testable without real peripherals.

pub mod events;
pub mod ports;
pub mod router;
pub mod runner;
pub mod switcher;
