//! Game end screen.
//!
//! Shows how the round went. `START` forgets the roster and returns to the
//! title screen, `SELECT` quits.

use bevy_ecs::prelude::*;
use log::info;

use crate::engine::render::{CANVAS_HEIGHT, CANVAS_WIDTH, Color, DrawCommand, Rect, RenderTarget};
use crate::engine::screen::Screen;
use crate::events::audio::AudioCmd;
use crate::events::gamepad::GamepadButton;
use crate::events::{GAMEPAD_EVENT, GameEvent};
use crate::game::TITLE;
use crate::resources::audio::play;
use crate::resources::eventbus::{add_event_listener, clear_all, queue_event};
use crate::resources::screenstate::QuitRequested;
use crate::resources::session::{RoundSummary, Session};

pub const GAME_OVER_MUSIC: &str = "resources/music/gameover.ogg";

#[derive(Default)]
pub struct GameEndScreen {
    summary: Option<RoundSummary>,
}

impl GameEndScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for GameEndScreen {
    fn init(&mut self, world: &mut World) {
        self.summary = world.resource::<Session>().last_round.clone();
        play(world, AudioCmd::StopAll);
        play(world, AudioCmd::PlayMusic { id: GAME_OVER_MUSIC.into(), looped: false });

        add_event_listener(world, GAMEPAD_EVENT, |event, world| {
            let GameEvent::Gamepad(e) = event else {
                return;
            };
            if !e.is_released() {
                return;
            }
            match e.button {
                GamepadButton::Start => {
                    world.resource_mut::<Session>().reset_roster();
                    info!("roster cleared, back to title");
                    clear_all(world, GAMEPAD_EVENT);
                    queue_event(world, GameEvent::change_screen(TITLE));
                }
                GamepadButton::Select => {
                    world.insert_resource(QuitRequested);
                }
                _ => {}
            }
        });
    }

    fn update(&mut self, _dt: f32, _world: &mut World) {}

    fn draw(&self, _world: &World, target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            color: Color::BLACK,
        });
        target.draw(DrawCommand::Text {
            text: "GAME OVER".into(),
            pos: [CANVAS_WIDTH / 2.0 - 100.0, 120.0],
            size: 40,
            color: Color::RED,
        });
        if let Some(summary) = &self.summary {
            target.draw(DrawCommand::Text {
                text: format!("The haunted item was the {}", summary.haunted_item),
                pos: [120.0, 220.0],
                size: 18,
                color: Color::WHITE,
            });
            target.draw(DrawCommand::Text {
                text: format!("You lasted {:.0} seconds", summary.duration),
                pos: [120.0, 250.0],
                size: 18,
                color: Color::WHITE,
            });
        }
        target.draw(DrawCommand::Text {
            text: "PRESS START".into(),
            pos: [CANVAS_WIDTH / 2.0 - 60.0, 360.0],
            size: 20,
            color: Color::GRAY,
        });
    }
}
