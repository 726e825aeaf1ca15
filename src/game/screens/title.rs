//! Title screen.
//!
//! The first gamepad to release `START` or `A` becomes player 1 and the
//! game moves on to character selection. `SELECT` quits.

use std::cell::Cell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::engine::render::{CANVAS_HEIGHT, CANVAS_WIDTH, Color, DrawCommand, Rect, RenderTarget};
use crate::engine::screen::Screen;
use crate::events::audio::AudioCmd;
use crate::events::gamepad::GamepadButton;
use crate::events::{GAMEPAD_EVENT, GameEvent};
use crate::game::CHARACTER_SELECT;
use crate::resources::assets::Assets;
use crate::resources::audio::play;
use crate::resources::eventbus::{add_event_listener, queue_event};
use crate::resources::screenstate::QuitRequested;
use crate::resources::session::Session;

pub const TITLE_MUSIC: &str = "resources/music/title.ogg";
const FONT: &str = "resources/fonts/Underdog-Regular.ttf";

#[derive(Default)]
pub struct TitleScreen {
    leaving: Rc<Cell<bool>>,
    blink: f32,
}

impl TitleScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for TitleScreen {
    fn init(&mut self, world: &mut World) {
        self.leaving.set(false);
        self.blink = 0.0;
        if let Err(e) = world.resource_mut::<Assets>().get_font(FONT) {
            warn!("{}", e);
        }
        play(world, AudioCmd::PlayMusic { id: TITLE_MUSIC.into(), looped: true });

        let leaving = Rc::clone(&self.leaving);
        add_event_listener(world, GAMEPAD_EVENT, move |event, world| {
            let GameEvent::Gamepad(e) = event else {
                return;
            };
            if !e.is_released() || leaving.get() {
                return;
            }
            if e.button == GamepadButton::Select {
                world.insert_resource(QuitRequested);
                return;
            }
            if !e.is_confirm() {
                return;
            }
            leaving.set(true);
            {
                let mut session = world.resource_mut::<Session>();
                session.reset_roster();
                session.player_map.insert(e.index, 1);
            }
            info!("gamepad {} joined as player 1", e.index);
            play(world, AudioCmd::StopMusic { id: TITLE_MUSIC.into() });
            queue_event(world, GameEvent::change_screen(CHARACTER_SELECT));
        });
    }

    fn update(&mut self, dt: f32, _world: &mut World) {
        self.blink = (self.blink + dt) % 1.0;
    }

    fn draw(&self, _world: &World, target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            color: Color::BACKDROP,
        });
        target.draw(DrawCommand::Text {
            text: "HOUSE HAUNTERS".into(),
            pos: [CANVAS_WIDTH / 2.0 - 150.0, 140.0],
            size: 40,
            color: Color::WHITE,
        });
        if self.blink < 0.5 {
            target.draw(DrawCommand::Text {
                text: "PRESS START".into(),
                pos: [CANVAS_WIDTH / 2.0 - 60.0, 320.0],
                size: 20,
                color: Color::GRAY,
            });
        }
    }
}
