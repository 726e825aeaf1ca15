//! ECS components for game entities.
//!
//! Components hold the data the engine needs to group, order and track the
//! entities a screen spawns. Game-specific state lives inside the boxed
//! [`gameobject::GameObject`] of each entity.
//!
//! Submodules overview:
//! - [`gameobject`] – the update/draw capability set and its `Behavior` holder
//! - [`persistent`] – marker for entities that persist across screen changes
//! - [`playernumber`] – player identity (`-1` for non-player entities)
//! - [`tombstone`] – marker for entities that are out of play
//! - [`zindex`] – draw order key

pub mod gameobject;
pub mod persistent;
pub mod playernumber;
pub mod tombstone;
pub mod zindex;
