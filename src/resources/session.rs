//! Session state shared by the screens of one play session.
//!
//! [`Session`] records which gamepad drives which player and which character
//! each player picked. The character select screen writes it, the gameplay
//! screen reads it. It lives for the whole process; the game end screen
//! resets the roster explicitly before a new round.

use std::collections::BTreeMap;

use bevy_ecs::prelude::Resource;

use crate::resources::gameconfig::GameConfig;

/// Most players a session supports (one per split-screen quadrant).
pub const MAX_PLAYERS: usize = 4;

/// Playable characters, in the order their portraits appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharacterId {
    Psychic,
    Priest,
    Journalist,
    Skeptic,
}

impl CharacterId {
    pub const ALL: [CharacterId; 4] = [
        CharacterId::Psychic,
        CharacterId::Priest,
        CharacterId::Journalist,
        CharacterId::Skeptic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CharacterId::Psychic => "Psychic",
            CharacterId::Priest => "Priest",
            CharacterId::Journalist => "Journalist",
            CharacterId::Skeptic => "Skeptic",
        }
    }

    /// Sprite sheet used for this character.
    pub fn texture_path(self) -> &'static str {
        match self {
            CharacterId::Psychic => "resources/characters/psychic.png",
            CharacterId::Priest => "resources/characters/priest.png",
            CharacterId::Journalist => "resources/characters/journalist.png",
            CharacterId::Skeptic => "resources/characters/skeptic.png",
        }
    }
}

/// How the last gameplay round went, shown by the game end screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub haunted_item: String,
    /// Seconds from the start of the round until the last player died.
    pub duration: f32,
    pub villain_released: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct Session {
    /// Gamepad index to player number. Player numbers start at 1.
    pub player_map: BTreeMap<u32, i32>,
    /// Player number to chosen character.
    pub char_map: BTreeMap<i32, CharacterId>,
    /// Players locked in when character selection finished.
    pub num_players: usize,
    /// Seconds each gameplay phase lasts.
    pub time_per_phase: f32,
    /// Seed for gameplay randomness; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub last_round: Option<RoundSummary>,
}

impl Session {
    pub fn new(time_per_phase: f32) -> Self {
        Self {
            player_map: BTreeMap::new(),
            char_map: BTreeMap::new(),
            num_players: 0,
            time_per_phase,
            seed: None,
            last_round: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            seed: config.seed,
            ..Self::new(config.time_per_phase)
        }
    }

    /// Gamepad index driving `player_number`, if any.
    pub fn gamepad_for(&self, player_number: i32) -> Option<u32> {
        self.player_map
            .iter()
            .find(|(_, p)| **p == player_number)
            .map(|(index, _)| *index)
    }

    /// Forget every joined player and their characters.
    pub fn reset_roster(&mut self) {
        self.player_map.clear();
        self.char_map.clear();
        self.num_players = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamepad_for_player() {
        let mut session = Session::new(30.0);
        session.player_map.insert(3, 1);
        session.player_map.insert(0, 2);
        assert_eq!(session.gamepad_for(1), Some(3));
        assert_eq!(session.gamepad_for(2), Some(0));
        assert_eq!(session.gamepad_for(4), None);
    }

    #[test]
    fn test_reset_roster_keeps_timing() {
        let mut session = Session::new(12.0);
        session.player_map.insert(0, 1);
        session.char_map.insert(1, CharacterId::Priest);
        session.num_players = 1;
        session.reset_roster();
        assert!(session.player_map.is_empty());
        assert!(session.char_map.is_empty());
        assert_eq!(session.num_players, 0);
        assert_eq!(session.time_per_phase, 12.0);
    }
}
