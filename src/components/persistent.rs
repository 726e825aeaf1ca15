//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component are not despawned when the
//! engine switches game screens. Everything else a screen spawned is
//! released on the switch.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should survive screen changes.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
