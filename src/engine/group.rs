//! Ordered group of game entities.
//!
//! An [`EntityGroup`] owns the draw order of the entities a screen spawned.
//! The entities themselves live in the world; the group keeps their
//! [`Entity`] handles, so player views can refer to the same entity without
//! owning it.
//!
//! # Ordering
//!
//! [`EntityGroup::update`] updates every member in the current order and
//! *then* stable-sorts the members by [`ZIndex`]. A z-index change made
//! during an update therefore only affects the following draws, never the
//! iteration order of the pass that made it. Members with equal keys keep
//! their relative order.
//!
//! # Dead entities
//!
//! Members are never removed. [`EntityGroup::kill`] tags a member with
//! [`Tombstone`]; tombstoned members are skipped by update and draw but are
//! still found by [`EntityGroup::get`].

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::gameobject::{Behavior, EntityKind, GameObject};
use crate::components::playernumber::PlayerNumber;
use crate::components::tombstone::Tombstone;
use crate::components::zindex::ZIndex;
use crate::engine::render::{Rect, RenderTarget};

#[derive(Debug, Default, Clone)]
pub struct EntityGroup {
    members: Vec<Entity>,
}

impl EntityGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `object` into `world` and append it to the group.
    pub fn spawn(
        &mut self,
        world: &mut World,
        player_number: PlayerNumber,
        z_index: i32,
        object: impl GameObject,
    ) -> Entity {
        let entity = world
            .spawn((player_number, ZIndex(z_index), Behavior::new(object)))
            .id();
        self.add(entity);
        entity
    }

    /// Append an already spawned entity.
    pub fn add(&mut self, entity: Entity) {
        self.members.push(entity);
    }

    /// First member with `player_number`, if any.
    pub fn get(&self, world: &World, player_number: i32) -> Option<Entity> {
        self.members
            .iter()
            .copied()
            .find(|e| world.get::<PlayerNumber>(*e).is_some_and(|p| p.0 == player_number))
    }

    /// Call `init` on every member.
    pub fn init(&self, world: &mut World) {
        for &entity in &self.members {
            Self::with_behavior(world, entity, |object, world| object.init(entity, world));
        }
    }

    /// Update live members in order, then re-sort by z-index.
    pub fn update(&mut self, dt: f32, world: &mut World) {
        for &entity in &self.members {
            if world.get::<Tombstone>(entity).is_some() {
                continue;
            }
            Self::with_behavior(world, entity, |object, world| object.update(entity, dt, world));
        }
        self.members
            .sort_by_key(|e| world.get::<ZIndex>(*e).copied().unwrap_or_default());
    }

    /// Draw live members back to front.
    pub fn draw(&self, world: &World, target: &mut dyn RenderTarget) {
        for &entity in &self.members {
            if world.get::<Tombstone>(entity).is_some() {
                continue;
            }
            if let Some(behavior) = world.get::<Behavior>(entity) {
                behavior.0.draw(target);
            }
        }
    }

    /// Take `entity` out of play. Returns `false` if it already was.
    pub fn kill(&self, world: &mut World, entity: Entity) -> bool {
        if world.get::<Tombstone>(entity).is_some() {
            return false;
        }
        match world.get_entity_mut(entity) {
            Ok(mut e) => {
                e.insert(Tombstone);
                true
            }
            Err(_) => false,
        }
    }

    pub fn is_alive(&self, world: &World, entity: Entity) -> bool {
        world.get_entity(entity).is_ok() && world.get::<Tombstone>(entity).is_none()
    }

    pub fn bounds(&self, world: &World, entity: Entity) -> Option<Rect> {
        world.get::<Behavior>(entity).map(|b| b.0.bounds())
    }

    pub fn kind(&self, world: &World, entity: Entity) -> Option<EntityKind> {
        world.get::<Behavior>(entity).map(|b| b.0.kind())
    }

    /// Live members of `kind`, in draw order.
    pub fn alive_of_kind(&self, world: &World, kind: EntityKind) -> Vec<Entity> {
        self.members
            .iter()
            .copied()
            .filter(|e| self.is_alive(world, *e) && self.kind(world, *e) == Some(kind))
            .collect()
    }

    pub fn count_kind(&self, world: &World, kind: EntityKind) -> usize {
        self.members
            .iter()
            .filter(|e| self.kind(world, **e) == Some(kind))
            .count()
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Detach the behaviour so the object can borrow the world mutably,
    /// then put it back.
    fn with_behavior(world: &mut World, entity: Entity, f: impl FnOnce(&mut dyn GameObject, &mut World)) {
        let Some(mut behavior) = world
            .get_entity_mut(entity)
            .ok()
            .and_then(|mut e| e.take::<Behavior>())
        else {
            warn!("group member {:?} has no behavior", entity);
            return;
        };
        f(behavior.0.as_mut(), world);
        match world.get_entity_mut(entity) {
            Ok(mut e) => {
                e.insert(behavior);
            }
            Err(_) => warn!("group member {:?} despawned during its own update", entity),
        }
    }
}
