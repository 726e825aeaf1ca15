//! Z-index component for draw ordering.
//!
//! The [`ZIndex`] component is the sort key of an
//! [`EntityGroup`](crate::engine::group::EntityGroup). Members with lower
//! values are drawn first, so higher values end up on top.

use bevy_ecs::prelude::Component;

/// Draw order key; ascending values are drawn back to front.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
