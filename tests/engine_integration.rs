//! End-to-end runs of the game on the headless platform.

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use haunt_engine::components::gameobject::{Behavior, EntityKind};
use haunt_engine::components::tombstone::Tombstone;
use haunt_engine::engine::platform::{HeadlessPlatform, InputScript};
use haunt_engine::engine::{EngineState, GameEngine};
use haunt_engine::error::EngineError;
use haunt_engine::events::audio::AudioCmd;
use haunt_engine::events::gamepad::GamepadButton;
use haunt_engine::events::{CHANGE_SCREEN, GameEvent};
use haunt_engine::game::{self, CHARACTER_SELECT, GAME_END, GAMEPLAY, TITLE};
use haunt_engine::resources::eventbus::{EventBus, trigger_event};
use haunt_engine::resources::gameconfig::GameConfig;
use haunt_engine::resources::session::{CharacterId, Session};

const DT: f32 = 0.25;

fn config(time_per_phase: f32) -> GameConfig {
    let mut config = GameConfig::with_path("does/not/exist.ini");
    config.time_per_phase = time_per_phase;
    config.seed = Some(1234);
    config
}

fn engine(frames: u64, script: InputScript, time_per_phase: f32) -> GameEngine<HeadlessPlatform> {
    let platform = HeadlessPlatform::new(frames, DT).with_script(script);
    let mut engine = GameEngine::new("test", platform, config(time_per_phase));
    game::register_screens(&mut engine, Some(1234));
    engine
}

/// Record every `change_screen` request for the whole run.
fn watch_screen_changes(engine: &mut GameEngine<HeadlessPlatform>) -> Rc<RefCell<Vec<String>>> {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    engine
        .world_mut()
        .non_send_resource_mut::<EventBus>()
        .add_persistent_listener(CHANGE_SCREEN, move |event, _| {
            if let GameEvent::ChangeScreen(id) = event {
                sink.borrow_mut().push(id.clone());
            }
        });
    seen
}

/// Run `n` frames: update then draw, which advances the platform clock.
fn run(engine: &mut GameEngine<HeadlessPlatform>, n: usize) {
    for _ in 0..n {
        engine.update(DT).unwrap();
        engine.draw();
    }
}

fn count_kind(engine: &mut GameEngine<HeadlessPlatform>, kind: EntityKind) -> usize {
    let world = engine.world_mut();
    let mut query = world.query::<&Behavior>();
    query.iter(world).filter(|b| b.0.kind() == kind).count()
}

/// Two players join and lock the first and third characters. Gameplay
/// starts at the end of frame 11.
fn two_player_team() -> InputScript {
    InputScript::new()
        .tap(1, 0, GamepadButton::Start)
        .tap(4, 1, GamepadButton::B)
        .tap(6, 1, GamepadButton::Right)
        .tap(8, 0, GamepadButton::A)
        .tap(10, 1, GamepadButton::A)
}

#[test]
fn unknown_screen_is_fatal() {
    let mut engine = engine(5, InputScript::new(), 30.0);
    let err = engine.change_game_screen("Lobby").unwrap_err();
    assert!(matches!(err, EngineError::UnknownScreen(ref id) if id == "Lobby"));
    assert_eq!(engine.current_screen_id(), None);
}

#[test]
fn title_to_character_select() {
    let script = InputScript::new().tap(1, 3, GamepadButton::Start);
    let mut engine = engine(10, script, 30.0);
    engine.change_game_screen(TITLE).unwrap();
    run(&mut engine, 3);
    assert_eq!(engine.current_screen_id(), Some(CHARACTER_SELECT));
    let session = engine.world().resource::<Session>();
    assert_eq!(session.player_map.get(&3), Some(&1));
}

#[test]
fn team_selection_starts_gameplay_once() {
    let script = two_player_team().tap(11, 0, GamepadButton::A);
    let mut engine = engine(20, script, 30.0);
    let changes = watch_screen_changes(&mut engine);
    engine.change_game_screen(TITLE).unwrap();
    run(&mut engine, 16);

    assert_eq!(engine.current_screen_id(), Some(GAMEPLAY));
    let gameplay_requests = changes.borrow().iter().filter(|id| *id == GAMEPLAY).count();
    assert_eq!(gameplay_requests, 1);

    let session = engine.world().resource::<Session>();
    assert_eq!(session.num_players, 2);
    assert_eq!(session.char_map.get(&1), Some(&CharacterId::Psychic));
    assert_eq!(session.char_map.get(&2), Some(&CharacterId::Journalist));
    assert_eq!(count_kind(&mut engine, EntityKind::Character), 2);
}

#[test]
fn villain_spawns_once_per_round() {
    let mut engine = engine(100, two_player_team(), 1.0);
    engine.change_game_screen(TITLE).unwrap();
    run(&mut engine, 13);
    assert_eq!(engine.current_screen_id(), Some(GAMEPLAY));
    assert_eq!(count_kind(&mut engine, EntityKind::Villain), 0);

    run(&mut engine, 4);
    assert_eq!(count_kind(&mut engine, EntityKind::Villain), 1);

    run(&mut engine, 8);
    if engine.current_screen_id() == Some(GAMEPLAY) {
        assert_eq!(count_kind(&mut engine, EntityKind::Villain), 1);
    }
    let hunt_cues = engine
        .platform()
        .audio_log()
        .iter()
        .filter(|cmd| matches!(cmd, AudioCmd::PlayFx { id } if id.ends_with("start.ogg")))
        .count();
    assert_eq!(hunt_cues, 1);
}

#[test]
fn last_death_ends_round_and_start_returns_to_title() {
    let script = two_player_team().tap(16, 0, GamepadButton::Start);
    let mut engine = engine(100, script, 30.0);
    engine.change_game_screen(TITLE).unwrap();
    run(&mut engine, 13);
    assert_eq!(engine.current_screen_id(), Some(GAMEPLAY));

    let world = engine.world_mut();
    let characters: Vec<Entity> = world
        .query::<(Entity, &Behavior)>()
        .iter(world)
        .filter(|(_, b)| b.0.kind() == EntityKind::Character)
        .map(|(e, _)| e)
        .collect();
    for (i, entity) in characters.into_iter().enumerate() {
        world.entity_mut(entity).insert(Tombstone);
        trigger_event(world, GameEvent::PlayerDied { player_number: i as i32 + 1 });
    }
    run(&mut engine, 1);
    assert_eq!(engine.current_screen_id(), Some(GAME_END));
    assert!(engine.world().resource::<Session>().last_round.is_some());
    assert_eq!(count_kind(&mut engine, EntityKind::Clue), 0);
    assert!(
        engine
            .platform()
            .last_frame_texts()
            .contains(&"GAME OVER")
    );

    run(&mut engine, 4);
    assert_eq!(engine.current_screen_id(), Some(TITLE));
    assert!(engine.world().resource::<Session>().player_map.is_empty());
}

#[test]
fn full_run_reaches_frame_budget() {
    let mut engine = engine(30, two_player_team(), 2.0);
    engine.change_game_screen(TITLE).unwrap();
    engine.start().unwrap();
    assert_eq!(engine.state(), EngineState::Exited);
    assert_eq!(engine.platform().frames_run(), 30);
    assert_eq!(engine.current_screen_id(), None);
}

#[test]
fn gameplay_without_selection_is_still_playable() {
    let mut engine = engine(10, InputScript::new(), 30.0);
    engine.world_mut().resource_mut::<Session>().num_players = 1;
    engine.change_game_screen(GAMEPLAY).unwrap();
    run(&mut engine, 1);
    assert!(engine.platform().last_frame_texts().contains(&"P1"));
}
