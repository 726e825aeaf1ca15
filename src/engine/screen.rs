//! Screen trait.
//!
//! A screen is one top-level state of the application (title, character
//! select, gameplay, game end). The [`GameEngine`](crate::engine::GameEngine)
//! keeps every registered screen and drives exactly one of them at a time.
//!
//! # Lifecycle
//!
//! 1. Registered with `add_game_screen`.
//! 2. On activation the engine releases whatever the previous screen left
//!    behind (non-persistent entities, screen-scoped listeners) and calls
//!    [`Screen::init`]. `init` must reset all per-activation state: a screen
//!    may be activated many times.
//! 3. While active, [`Screen::update`] and [`Screen::draw`] run every frame
//!    and window events reach [`Screen::on_event`].

use bevy_ecs::prelude::World;

use crate::engine::platform::WindowEvent;
use crate::engine::render::RenderTarget;

pub trait Screen {
    fn init(&mut self, world: &mut World);

    fn update(&mut self, dt: f32, world: &mut World);

    fn draw(&self, world: &World, target: &mut dyn RenderTarget);

    fn on_event(&mut self, _event: &WindowEvent, _world: &mut World) {}
}
