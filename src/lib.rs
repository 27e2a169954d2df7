//! Balloon game controller library.
//!
//! Exposes the game core, the application layer and the rig drivers for
//! integration testing. All ESP-IDF-specific code is guarded by the
//! `espidf` feature within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod events;
pub mod game;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
