//! Engine systems.
//!
//! Free functions the engine runs on its world at fixed points of each
//! frame.
//!
//! Submodules overview
//! - [`audio`] – forward queued audio commands to the platform
//! - [`debug`] – toggle the debug overlay
//! - [`input`] – turn gamepad snapshots into `gamepad_event` dispatches
//! - [`render`] – debug overlay drawn over the active screen
//! - [`screen`] – release entities and listeners on screen change
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod debug;
pub mod input;
pub mod render;
pub mod screen;
pub mod time;
