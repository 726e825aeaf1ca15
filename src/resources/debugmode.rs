//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that the debug overlay
//! should be drawn. Remove it to disable debug behavior. It only changes
//! what is displayed, never control flow.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the engine draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
