//! Marker for entities that are out of play.
//!
//! A tombstoned entity stays in its group so lookups by player number keep
//! resolving (a split-screen view can still follow a dead character), but
//! the group no longer updates or draws it.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug)]
pub struct Tombstone;
