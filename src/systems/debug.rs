//! Debug mode toggle.
//!
//! Flips the presence of the [`DebugMode`] resource. Rendering code gates the
//! overlay on it; nothing else changes behaviour.
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::debugmode::DebugMode;

/// Insert [`DebugMode`] if absent, remove it otherwise. Returns the new state.
pub fn switch_debug(world: &mut World) -> bool {
    if world.contains_resource::<DebugMode>() {
        world.remove_resource::<DebugMode>();
        info!("Debug mode disabled");
        false
    } else {
        world.insert_resource(DebugMode {});
        info!("Debug mode enabled");
        true
    }
}
