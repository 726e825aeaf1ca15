//! Event types exchanged over the [`EventBus`](crate::resources::eventbus::EventBus).
//!
//! Every event is a variant of [`GameEvent`]. The bus files listeners under
//! the event *name* (see [`GameEvent::name`]); because the name is derived
//! from the variant, a listener registered for `"gamepad_event"` can only
//! ever receive [`GameEvent::Gamepad`] payloads.
//!
//! Submodules:
//! - [`audio`] – commands sent to the audio backend
//! - [`gamepad`] – button press/release notifications
pub mod audio;
pub mod gamepad;

use crate::events::gamepad::GamepadEvent;

/// Bus key of [`GameEvent::ChangeScreen`].
pub const CHANGE_SCREEN: &str = "change_screen";
/// Bus key of [`GameEvent::Gamepad`].
pub const GAMEPAD_EVENT: &str = "gamepad_event";
/// Bus key of [`GameEvent::PlayerDied`].
pub const PLAYER_DIED: &str = "player_died";

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Request to switch to the screen registered under this id.
    ChangeScreen(String),
    Gamepad(GamepadEvent),
    PlayerDied { player_number: i32 },
}

impl GameEvent {
    /// Name the bus files this event under.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::ChangeScreen(_) => CHANGE_SCREEN,
            GameEvent::Gamepad(_) => GAMEPAD_EVENT,
            GameEvent::PlayerDied { .. } => PLAYER_DIED,
        }
    }

    pub fn change_screen(id: impl Into<String>) -> Self {
        GameEvent::ChangeScreen(id.into())
    }
}
