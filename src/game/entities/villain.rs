//! The ghost.
//!
//! Spawned once the hunting phase runs out. It drifts toward the nearest
//! living character; touching one kills it: the character is tombstoned and
//! `player_died` is triggered with its player number.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::gameobject::{Behavior, EntityKind, GameObject};
use crate::components::playernumber::PlayerNumber;
use crate::components::tombstone::Tombstone;
use crate::engine::render::{Color, DrawCommand, Rect, RenderTarget};
use crate::events::GameEvent;
use crate::resources::eventbus::trigger_event;

/// Drift speed in pixels per second.
pub const DRIFT_SPEED: f32 = 90.0;
pub const SIZE: f32 = 36.0;

#[derive(Debug, Clone)]
pub struct Villain {
    pos: [f32; 2],
}

impl Villain {
    /// A villain whose centre is at `center`.
    pub fn new(center: [f32; 2]) -> Self {
        Self {
            pos: [center[0] - SIZE / 2.0, center[1] - SIZE / 2.0],
        }
    }
}

/// Live characters as `(entity, player number, bounds)`.
fn live_characters(world: &mut World) -> Vec<(Entity, i32, Rect)> {
    let mut query = world.query_filtered::<(Entity, &PlayerNumber, &Behavior), Without<Tombstone>>();
    query
        .iter(world)
        .filter(|(_, p, b)| p.is_player() && b.0.kind() == EntityKind::Character)
        .map(|(e, p, b)| (e, p.0, b.0.bounds()))
        .collect()
}

impl GameObject for Villain {
    fn update(&mut self, _me: Entity, dt: f32, world: &mut World) {
        let targets = live_characters(world);
        let me = self.bounds();
        let [cx, cy] = me.center();

        let nearest = targets.iter().min_by(|a, b| {
            let da = dist2(a.2.center(), [cx, cy]);
            let db = dist2(b.2.center(), [cx, cy]);
            da.total_cmp(&db)
        });
        if let Some((_, _, rect)) = nearest {
            let [tx, ty] = rect.center();
            let (dx, dy) = (tx - cx, ty - cy);
            let len = (dx * dx + dy * dy).sqrt();
            if len > 0.0 {
                let step = (DRIFT_SPEED * dt).min(len);
                self.pos[0] += dx / len * step;
                self.pos[1] += dy / len * step;
            }
        }

        let me = self.bounds();
        for (entity, player_number, rect) in targets {
            if !me.intersects(&rect) {
                continue;
            }
            if let Ok(mut e) = world.get_entity_mut(entity) {
                e.insert(Tombstone);
            }
            info!("player {} caught by the villain", player_number);
            trigger_event(world, GameEvent::PlayerDied { player_number });
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::Rect {
            rect: self.bounds(),
            color: Color::PURPLE,
        });
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos[0], self.pos[1], SIZE, SIZE)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Villain
    }
}

fn dist2(a: [f32; 2], b: [f32; 2]) -> f32 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::group::EntityGroup;
    use crate::events::PLAYER_DIED;
    use crate::game::entities::character::Character;
    use crate::resources::eventbus::EventBus;
    use crate::resources::session::CharacterId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn world_with_bus(deaths: &Rc<RefCell<Vec<i32>>>) -> World {
        let mut world = World::new();
        let mut bus = EventBus::new();
        let sink = Rc::clone(deaths);
        bus.add_event_listener(PLAYER_DIED, move |event, _| {
            if let GameEvent::PlayerDied { player_number } = event {
                sink.borrow_mut().push(*player_number);
            }
        });
        world.insert_non_send_resource(bus);
        world
    }

    fn character(player: i32, pos: [f32; 2]) -> Character {
        Character::new(player, CharacterId::Skeptic, None, pos, Rect::new(0.0, 0.0, 2000.0, 2000.0))
    }

    #[test]
    fn test_contact_kills_once() {
        let deaths = Rc::new(RefCell::new(Vec::new()));
        let mut world = world_with_bus(&deaths);
        let mut group = EntityGroup::new();
        let p1 = group.spawn(&mut world, PlayerNumber(1), 0, character(1, [100.0, 100.0]));
        group.spawn(&mut world, PlayerNumber::NONE, 0, Villain::new([110.0, 110.0]));

        group.update(0.016, &mut world);
        group.update(0.016, &mut world);

        assert_eq!(*deaths.borrow(), vec![1]);
        assert!(!group.is_alive(&world, p1));
        assert_eq!(group.get(&world, 1), Some(p1));
    }

    #[test]
    fn test_drifts_toward_nearest_character() {
        let deaths = Rc::new(RefCell::new(Vec::new()));
        let mut world = world_with_bus(&deaths);
        let mut group = EntityGroup::new();
        group.spawn(&mut world, PlayerNumber(1), 0, character(1, [1000.0, 0.0]));
        group.spawn(&mut world, PlayerNumber(2), 0, character(2, [0.0, 600.0]));
        let ghost = group.spawn(&mut world, PlayerNumber::NONE, 0, Villain::new([0.0, 0.0]));

        group.update(1.0, &mut world);

        let moved = group.bounds(&world, ghost).unwrap();
        assert!(moved.y > -SIZE / 2.0 + 80.0);
        assert!(deaths.borrow().is_empty());
    }
}
