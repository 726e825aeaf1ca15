//! House Haunters engine library.
//!
//! This module exposes the engine (screen manager, entity group, player
//! views, platform seam), the ECS components and resources it stores in its
//! world, the event types carried by the event bus, and the game built on
//! top of it, for use by the binary and the integration tests.

pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
