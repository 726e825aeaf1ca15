//! House Haunters: the screens and entities of the game.
//!
//! [`register_screens`] wires the four screens into a [`GameEngine`] under
//! the ids below. Screens move between each other only by queueing
//! `change_screen` events.

pub mod entities;
pub mod screens;

use crate::engine::GameEngine;
use crate::engine::platform::Platform;
use crate::game::screens::character::CharacterScreen;
use crate::game::screens::gameend::GameEndScreen;
use crate::game::screens::gameplay::GameplayScreen;
use crate::game::screens::title::TitleScreen;
use crate::resources::cluedata::ItemClueSource;
use crate::resources::roomgrid::GridRoomGenerator;

pub const TITLE: &str = "Title";
pub const CHARACTER_SELECT: &str = "CharacterSelect";
pub const GAMEPLAY: &str = "GamePlay";
pub const GAME_END: &str = "GameEnd";

/// Register every screen of the game. `seed` makes the house layout
/// reproducible.
pub fn register_screens<P: Platform>(engine: &mut GameEngine<P>, seed: Option<u64>) {
    let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    engine.add_game_screen(TITLE, Box::new(TitleScreen::new()));
    engine.add_game_screen(CHARACTER_SELECT, Box::new(CharacterScreen::new()));
    engine.add_game_screen(
        GAMEPLAY,
        Box::new(GameplayScreen::new(
            Box::new(ItemClueSource::builtin()),
            Box::new(GridRoomGenerator::new(rng)),
        )),
    );
    engine.add_game_screen(GAME_END, Box::new(GameEndScreen::new()));
}
