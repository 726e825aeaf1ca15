//! Behaviour of a game entity.
//!
//! Everything that lives in an [`EntityGroup`](crate::engine::group::EntityGroup)
//! carries a [`Behavior`] component boxing a [`GameObject`]. The trait is the
//! capability set shared by characters, clues and the villain: one-time
//! initialisation, a per-frame update with access to the world, and a
//! read-only draw.
//!
//! # Update contract
//!
//! The group detaches the [`Behavior`] from its entity while calling
//! [`GameObject::update`], so the object may freely touch other resources
//! and components (including its own [`ZIndex`](crate::components::zindex::ZIndex))
//! through the `&mut World` it receives. Querying its own `Behavior` during
//! that call yields nothing.

use bevy_ecs::prelude::*;

use crate::engine::render::{Rect, RenderTarget};

/// Broad category of an entity, used by consumers that need to tell
/// characters from the villain without downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Villain,
    Clue,
    Prop,
}

pub trait GameObject: Send + Sync + 'static {
    /// Called once when the owning group is initialised.
    fn init(&mut self, _me: Entity, _world: &mut World) {}

    /// Advance the object by `dt` seconds.
    fn update(&mut self, me: Entity, dt: f32, world: &mut World);

    /// Draw the object. Must not mutate anything.
    fn draw(&self, target: &mut dyn RenderTarget);

    /// World-space bounds in pixels.
    fn bounds(&self) -> Rect;

    fn kind(&self) -> EntityKind;
}

/// Component holding the boxed [`GameObject`] of an entity.
#[derive(Component)]
pub struct Behavior(pub Box<dyn GameObject>);

impl Behavior {
    pub fn new(object: impl GameObject) -> Self {
        Self(Box::new(object))
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Behavior")
            .field("kind", &self.0.kind())
            .field("bounds", &self.0.bounds())
            .finish()
    }
}
