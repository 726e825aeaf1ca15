//! Player-controlled investigator.
//!
//! A [`Character`] reads the gamepad events of its own gamepad from the
//! [`GamepadInbox`] and walks while a direction is held. Its z-index follows
//! its feet so characters lower on screen are drawn in front.

use bevy_ecs::prelude::*;

use crate::components::gameobject::{EntityKind, GameObject};
use crate::components::zindex::ZIndex;
use crate::engine::render::{Color, DrawCommand, Rect, RenderTarget};
use crate::events::gamepad::ButtonState;
use crate::resources::input::GamepadInbox;
use crate::resources::session::CharacterId;

/// Walking speed in pixels per second.
pub const WALK_SPEED: f32 = 120.0;
pub const WIDTH: f32 = 24.0;
pub const HEIGHT: f32 = 40.0;

#[derive(Debug, Clone)]
pub struct Character {
    player_number: i32,
    character: CharacterId,
    gamepad: Option<u32>,
    pos: [f32; 2],
    /// Held direction, one component per axis.
    heading: [f32; 2],
    /// Area the character may walk in.
    house: Rect,
}

impl Character {
    pub fn new(player_number: i32, character: CharacterId, gamepad: Option<u32>, pos: [f32; 2], house: Rect) -> Self {
        Self {
            player_number,
            character,
            gamepad,
            pos,
            heading: [0.0, 0.0],
            house,
        }
    }

    pub fn player_number(&self) -> i32 {
        self.player_number
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    pub fn position(&self) -> [f32; 2] {
        self.pos
    }

    fn read_input(&mut self, world: &World) {
        let (Some(index), Some(inbox)) = (self.gamepad, world.get_resource::<GamepadInbox>()) else {
            return;
        };
        for event in inbox.for_gamepad(index) {
            let Some([dx, dy]) = event.button.direction() else {
                continue;
            };
            let held = event.state == ButtonState::Pressed;
            if dx != 0.0 {
                self.heading[0] = if held { dx } else { 0.0 };
            }
            if dy != 0.0 {
                self.heading[1] = if held { dy } else { 0.0 };
            }
        }
    }
}

impl GameObject for Character {
    fn init(&mut self, me: Entity, world: &mut World) {
        if let Some(mut z) = world.get_mut::<ZIndex>(me) {
            z.0 = (self.pos[1] + HEIGHT) as i32;
        }
    }

    fn update(&mut self, me: Entity, dt: f32, world: &mut World) {
        self.read_input(world);

        let [hx, hy] = self.heading;
        let len = (hx * hx + hy * hy).sqrt();
        if len > 0.0 {
            let step = WALK_SPEED * dt / len;
            self.pos[0] = (self.pos[0] + hx * step).clamp(self.house.x, self.house.x + self.house.w - WIDTH);
            self.pos[1] = (self.pos[1] + hy * step).clamp(self.house.y, self.house.y + self.house.h - HEIGHT);
        }

        if let Some(mut z) = world.get_mut::<ZIndex>(me) {
            z.0 = (self.pos[1] + HEIGHT) as i32;
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        let rect = self.bounds();
        target.draw(DrawCommand::Sprite {
            texture: self.character.texture_path().to_string(),
            dest: rect,
        });
        target.draw(DrawCommand::Outline {
            rect,
            color: Color::for_player(self.player_number),
        });
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos[0], self.pos[1], WIDTH, HEIGHT)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::playernumber::PlayerNumber;
    use crate::engine::group::EntityGroup;
    use crate::events::gamepad::{GamepadButton, GamepadEvent};

    fn setup() -> (World, EntityGroup, Entity) {
        let mut world = World::new();
        world.insert_resource(GamepadInbox::default());
        let mut group = EntityGroup::new();
        let house = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let e = group.spawn(
            &mut world,
            PlayerNumber(1),
            0,
            Character::new(1, CharacterId::Priest, Some(7), [100.0, 100.0], house),
        );
        (world, group, e)
    }

    #[test]
    fn test_walks_while_held() {
        let (mut world, mut group, e) = setup();
        world
            .resource_mut::<GamepadInbox>()
            .push(GamepadEvent::pressed(7, GamepadButton::Right));
        group.update(0.5, &mut world);
        world.resource_mut::<GamepadInbox>().clear();
        group.update(0.5, &mut world);

        assert_eq!(group.bounds(&world, e).unwrap().x, 100.0 + WALK_SPEED);

        world
            .resource_mut::<GamepadInbox>()
            .push(GamepadEvent::released(7, GamepadButton::Right));
        group.update(0.5, &mut world);
        assert_eq!(group.bounds(&world, e).unwrap().x, 100.0 + WALK_SPEED);
    }

    #[test]
    fn test_ignores_other_gamepads() {
        let (mut world, mut group, e) = setup();
        world
            .resource_mut::<GamepadInbox>()
            .push(GamepadEvent::pressed(2, GamepadButton::Down));
        group.update(1.0, &mut world);
        assert_eq!(group.bounds(&world, e).unwrap().y, 100.0);
    }

    #[test]
    fn test_z_index_follows_feet() {
        let (mut world, mut group, e) = setup();
        world
            .resource_mut::<GamepadInbox>()
            .push(GamepadEvent::pressed(7, GamepadButton::Down));
        group.update(0.5, &mut world);
        assert_eq!(world.get::<ZIndex>(e).unwrap().0, (100.0 + 60.0 + HEIGHT) as i32);
    }

    #[test]
    fn test_stays_inside_house() {
        let (mut world, mut group, e) = setup();
        world
            .resource_mut::<GamepadInbox>()
            .push(GamepadEvent::pressed(7, GamepadButton::Left));
        group.update(10.0, &mut world);
        assert_eq!(group.bounds(&world, e).unwrap().x, 0.0);
    }
}
