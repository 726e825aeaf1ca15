//! Screen manager and frame loop.
//!
//! [`GameEngine`] owns the world, the registered screens and the platform
//! backend. It drives exactly one active screen at a time.
//!
//! # Frame order
//!
//! 1. Poll window events. `CloseRequested` exits, `ToggleDebug` flips
//!    [`DebugMode`](crate::resources::debugmode::DebugMode); every event is
//!    also handed to the active screen.
//! 2. Advance [`WorldTime`].
//! 3. Pump gamepad state changes into the bus as `gamepad_event`.
//! 4. Update the active screen.
//! 5. Drain queued events.
//! 6. Forward queued audio commands to the platform.
//! 7. Apply a pending screen change (set by the engine's `change_screen`
//!    listener).
//! 8. Draw: clear, active screen, debug overlay, present.
//!
//! Changing screen releases the previous screen's entities and listeners
//! (see [`systems::screen`](crate::systems::screen)) and runs the new
//! screen's `init`. An unknown screen id is a configuration error: the loop
//! stops and [`EngineError::UnknownScreen`] is returned.

pub mod group;
pub mod platform;
pub mod render;
pub mod screen;
pub mod view;

use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};
use rustc_hash::FxHashMap;

use crate::engine::platform::{Platform, WindowEvent};
use crate::engine::render::{Color, DrawCommand};
use crate::engine::screen::Screen;
use crate::error::EngineError;
use crate::events::audio::AudioCmd;
use crate::events::{CHANGE_SCREEN, GameEvent};
use crate::resources::assets::{Assets, PlaceholderLoader};
use crate::resources::audio::setup_audio;
use crate::resources::debugmode::DebugMode;
use crate::resources::eventbus::{EventBus, drain_queued_events};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{GamepadController, GamepadInbox};
use crate::resources::screenstate::{CurrentScreen, NextScreen, QuitRequested};
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;
use crate::systems;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
    Exited,
}

pub struct GameEngine<P: Platform> {
    name: String,
    world: World,
    screens: FxHashMap<String, Box<dyn Screen>>,
    current: Option<String>,
    state: EngineState,
    gamepads: GamepadController,
    platform: P,
}

impl<P: Platform> GameEngine<P> {
    /// Build an engine around `platform` with a fresh world.
    pub fn new(name: impl Into<String>, platform: P, config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(Session::from_config(&config));
        if config.debug {
            world.insert_resource(DebugMode {});
        }
        world.insert_resource(config);
        world.insert_resource(NextScreen::new());
        world.insert_resource(CurrentScreen::default());
        world.insert_resource(GamepadInbox::default());
        world.insert_resource(Assets::new(PlaceholderLoader));
        setup_audio(&mut world);

        let mut bus = EventBus::new();
        bus.add_persistent_listener(CHANGE_SCREEN, |event, world| {
            if let GameEvent::ChangeScreen(id) = event {
                debug!("screen change to '{}' requested", id);
                world.resource_mut::<NextScreen>().set(id.clone());
            }
        });
        world.insert_non_send_resource(bus);

        Self {
            name: name.into(),
            world,
            screens: FxHashMap::default(),
            current: None,
            state: EngineState::Stopped,
            gamepads: GamepadController::new(),
            platform,
        }
    }

    /// Replace the asset cache, e.g. with one backed by a `FileLoader`.
    pub fn with_assets(mut self, assets: Assets) -> Self {
        self.world.insert_resource(assets);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn current_screen_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Register `screen` under `id`, replacing any screen already there.
    ///
    /// Replacing the active screen initialises the replacement right away.
    pub fn add_game_screen(&mut self, id: impl Into<String>, screen: Box<dyn Screen>) {
        let id = id.into();
        let replaced = self.screens.insert(id.clone(), screen).is_some();
        if !replaced {
            debug!("screen '{}' registered", id);
            return;
        }
        warn!("screen '{}' replaced", id);
        if self.current.as_deref() == Some(id.as_str()) {
            if let Some(screen) = self.screens.get_mut(&id) {
                systems::screen::release_screen_state(&mut self.world);
                screen.init(&mut self.world);
            }
        }
    }

    /// Make `id` the active screen and initialise it.
    pub fn change_game_screen(&mut self, id: &str) -> Result<(), EngineError> {
        let Some(screen) = self.screens.get_mut(id) else {
            error!("change to unregistered screen '{}'", id);
            return Err(EngineError::UnknownScreen(id.to_string()));
        };
        info!(
            "screen {} -> {}",
            self.current.as_deref().unwrap_or("-"),
            id
        );
        systems::screen::release_screen_state(&mut self.world);
        self.current = Some(id.to_string());
        self.world.resource_mut::<CurrentScreen>().0 = Some(id.to_string());
        screen.init(&mut self.world);
        Ok(())
    }

    /// Enter the frame loop. Returns when the engine is stopped or exits.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state == EngineState::Exited {
            warn!("{} already exited", self.name);
            return Ok(());
        }
        if self.current.is_none() {
            return Err(EngineError::NoActiveScreen);
        }
        info!("{} running", self.name);
        self.state = EngineState::Running;

        while self.state == EngineState::Running {
            self.handle_events();
            if self.state != EngineState::Running {
                break;
            }
            let dt = self.platform.frame_time();
            if let Err(e) = self.update(dt) {
                error!("frame loop aborted: {}", e);
                self.exit();
                self.teardown();
                return Err(e);
            }
            self.draw();
        }

        if self.state == EngineState::Exited {
            self.teardown();
        }
        Ok(())
    }

    /// Leave the frame loop, keeping all state.
    pub fn stop(&mut self) {
        if self.state == EngineState::Running {
            info!("{} stopped", self.name);
            self.state = EngineState::Stopped;
        }
    }

    /// Request termination; the loop tears the active screen down.
    pub fn exit(&mut self) {
        if self.state != EngineState::Exited {
            info!("{} exiting", self.name);
            self.state = EngineState::Exited;
        }
    }

    /// Advance one frame of simulation.
    pub fn update(&mut self, dt: f32) -> Result<(), EngineError> {
        let Some(id) = self.current.clone() else {
            return Err(EngineError::NoActiveScreen);
        };
        let dt = systems::time::update_world_time(&mut self.world, dt);

        let states = self.platform.gamepad_states();
        systems::input::pump_gamepads(&mut self.world, &mut self.gamepads, &states);

        if let Some(screen) = self.screens.get_mut(&id) {
            screen.update(dt, &mut self.world);
        }
        drain_queued_events(&mut self.world);
        systems::audio::forward_audio_cmds(&self.world, &mut self.platform);

        if self.world.remove_resource::<QuitRequested>().is_some() {
            self.exit();
        }
        if let Some(next) = self.world.resource_mut::<NextScreen>().take() {
            self.change_game_screen(&next)?;
        }
        Ok(())
    }

    /// Draw the active screen and present the frame.
    pub fn draw(&mut self) {
        let target = self.platform.target();
        target.draw(DrawCommand::Clear(Color::BLACK));
        if let Some(screen) = self.current.as_deref().and_then(|id| self.screens.get(id)) {
            screen.draw(&self.world, target);
        }
        systems::render::draw_debug_overlay(&self.world, target);
        self.platform.present();
    }

    fn handle_events(&mut self) {
        while let Some(event) = self.platform.poll_event() {
            match event {
                WindowEvent::CloseRequested => self.exit(),
                WindowEvent::ToggleDebug => {
                    systems::debug::switch_debug(&mut self.world);
                }
                _ => {}
            }
            if let Some(screen) = self.current.as_deref().and_then(|id| self.screens.get_mut(id)) {
                screen.on_event(&event, &mut self.world);
            }
        }
    }

    fn teardown(&mut self) {
        if let Some(id) = self.current.take() {
            info!("tearing down screen {}", id);
        }
        systems::screen::release_screen_state(&mut self.world);
        self.world.resource_mut::<CurrentScreen>().0 = None;
        self.platform.play_audio(AudioCmd::StopAll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::platform::HeadlessPlatform;
    use crate::engine::render::RenderTarget;
    use crate::resources::eventbus::queue_event;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts its calls and optionally queues a screen change on update.
    struct Counter {
        inits: Rc<Cell<u32>>,
        updates: Rc<Cell<u32>>,
        go_to: Option<&'static str>,
    }

    impl Screen for Counter {
        fn init(&mut self, _world: &mut World) {
            self.inits.set(self.inits.get() + 1);
        }

        fn update(&mut self, _dt: f32, world: &mut World) {
            self.updates.set(self.updates.get() + 1);
            if let Some(id) = self.go_to {
                queue_event(world, GameEvent::change_screen(id));
            }
        }

        fn draw(&self, _world: &World, target: &mut dyn RenderTarget) {
            target.draw(DrawCommand::ResetView);
        }
    }

    fn counter(go_to: Option<&'static str>) -> (Box<Counter>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let inits = Rc::new(Cell::new(0));
        let updates = Rc::new(Cell::new(0));
        let screen = Box::new(Counter {
            inits: Rc::clone(&inits),
            updates: Rc::clone(&updates),
            go_to,
        });
        (screen, inits, updates)
    }

    fn engine(frames: u64) -> GameEngine<HeadlessPlatform> {
        GameEngine::new("test", HeadlessPlatform::new(frames, 0.1), GameConfig::new())
    }

    #[test]
    fn test_unknown_screen_is_an_error() {
        let mut engine = engine(1);
        let err = engine.change_game_screen("Nope").unwrap_err();
        assert!(matches!(err, EngineError::UnknownScreen(id) if id == "Nope"));
        assert_eq!(engine.current_screen_id(), None);
    }

    #[test]
    fn test_start_without_screen_fails() {
        let mut engine = engine(1);
        assert!(matches!(engine.start(), Err(EngineError::NoActiveScreen)));
    }

    #[test]
    fn test_runs_frame_budget_then_exits() {
        let mut engine = engine(3);
        let (screen, inits, updates) = counter(None);
        engine.add_game_screen("A", screen);
        engine.change_game_screen("A").unwrap();
        engine.start().unwrap();

        assert_eq!(inits.get(), 1);
        assert_eq!(updates.get(), 3);
        assert_eq!(engine.state(), EngineState::Exited);
        assert_eq!(engine.platform().frames_run(), 3);
        assert_eq!(engine.current_screen_id(), None);
        assert_eq!(engine.platform().audio_log().last(), Some(&AudioCmd::StopAll));
    }

    #[test]
    fn test_queued_change_applies_after_update() {
        let mut engine = engine(2);
        let (a, _, a_updates) = counter(Some("B"));
        let (b, b_inits, b_updates) = counter(None);
        engine.add_game_screen("A", a);
        engine.add_game_screen("B", b);
        engine.change_game_screen("A").unwrap();

        engine.update(0.1).unwrap();
        assert_eq!(engine.current_screen_id(), Some("B"));
        assert_eq!(a_updates.get(), 1);
        assert_eq!(b_inits.get(), 1);
        assert_eq!(b_updates.get(), 0);
    }

    #[test]
    fn test_queued_change_to_unknown_screen_aborts_loop() {
        let mut engine = engine(10);
        let (a, _, _) = counter(Some("Missing"));
        engine.add_game_screen("A", a);
        engine.change_game_screen("A").unwrap();
        assert!(matches!(engine.start(), Err(EngineError::UnknownScreen(_))));
        assert_eq!(engine.platform().frames_run(), 0);
    }

    #[test]
    fn test_debug_toggle_adds_overlay() {
        let mut engine = engine(1);
        let (a, _, _) = counter(None);
        engine.add_game_screen("A", a);
        engine.change_game_screen("A").unwrap();
        engine.platform_mut().push_event(WindowEvent::ToggleDebug);
        engine.start().unwrap();
        assert!(engine.world().contains_resource::<DebugMode>());
        assert!(engine.platform().last_frame_texts().contains(&"screen: A"));
    }

    #[test]
    fn test_replacing_active_screen_inits_replacement() {
        let mut engine = engine(1);
        let (a, _, _) = counter(None);
        let (a2, a2_inits, _) = counter(None);
        engine.add_game_screen("A", a);
        engine.change_game_screen("A").unwrap();
        engine.add_game_screen("A", a2);
        assert_eq!(a2_inits.get(), 1);
    }

    #[test]
    fn test_quit_request_exits() {
        let mut engine = engine(100);
        let (a, _, _) = counter(None);
        engine.add_game_screen("A", a);
        engine.change_game_screen("A").unwrap();
        engine.world_mut().insert_resource(QuitRequested);
        engine.start().unwrap();
        assert_eq!(engine.state(), EngineState::Exited);
        assert_eq!(engine.platform().frames_run(), 1);
    }
}
