//! Gamepad input resources.
//!
//! The platform reports the raw button state of every connected gamepad each
//! frame as a [`GamepadState`]. The [`GamepadController`] remembers the
//! previous snapshot and turns differences into [`GamepadEvent`]s, so holding
//! a button produces one press and one release, never an event per frame.
//!
//! [`GamepadInbox`] collects the gamepad events of the current frame for
//! entities that read input during their update.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::events::gamepad::{GamepadButton, GamepadEvent};

/// Raw button mask of one gamepad for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GamepadState {
    pub index: u32,
    pub buttons: u16,
}

impl GamepadState {
    pub fn new(index: u32) -> Self {
        Self { index, buttons: 0 }
    }

    pub fn is_down(&self, button: GamepadButton) -> bool {
        self.buttons & button.bit() != 0
    }

    pub fn set(&mut self, button: GamepadButton, down: bool) {
        if down {
            self.buttons |= button.bit();
        } else {
            self.buttons &= !button.bit();
        }
    }

    pub fn with(mut self, button: GamepadButton) -> Self {
        self.set(button, true);
        self
    }
}

/// Edge detector between consecutive gamepad snapshots.
#[derive(Debug, Default)]
pub struct GamepadController {
    previous: FxHashMap<u32, u16>,
}

impl GamepadController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `states` with the previous frame and return one event per
    /// button that changed, ordered by gamepad then by button.
    ///
    /// A gamepad missing from `states` is treated as disconnected: its held
    /// buttons are reported as released.
    pub fn poll(&mut self, states: &[GamepadState]) -> Vec<GamepadEvent> {
        let mut events = Vec::new();
        let mut current: FxHashMap<u32, u16> = FxHashMap::default();

        let mut sorted: Vec<GamepadState> = states.to_vec();
        sorted.sort_by_key(|s| s.index);

        for state in &sorted {
            let before = self.previous.get(&state.index).copied().unwrap_or(0);
            Self::diff(state.index, before, state.buttons, &mut events);
            current.insert(state.index, state.buttons);
        }

        let mut gone: Vec<(u32, u16)> = self
            .previous
            .iter()
            .filter(|(index, _)| !current.contains_key(index))
            .map(|(index, mask)| (*index, *mask))
            .collect();
        gone.sort_by_key(|(index, _)| *index);
        for (index, mask) in gone {
            Self::diff(index, mask, 0, &mut events);
        }

        self.previous = current;
        events
    }

    fn diff(index: u32, before: u16, after: u16, events: &mut Vec<GamepadEvent>) {
        let changed = before ^ after;
        if changed == 0 {
            return;
        }
        for button in GamepadButton::ALL {
            if changed & button.bit() == 0 {
                continue;
            }
            if after & button.bit() != 0 {
                events.push(GamepadEvent::pressed(index, button));
            } else {
                events.push(GamepadEvent::released(index, button));
            }
        }
    }
}

/// Gamepad events delivered this frame, consumed by entity updates.
#[derive(Resource, Debug, Default)]
pub struct GamepadInbox {
    pub events: Vec<GamepadEvent>,
}

impl GamepadInbox {
    pub fn push(&mut self, event: GamepadEvent) {
        self.events.push(event);
    }

    /// Events coming from gamepad `index`.
    pub fn for_gamepad(&self, index: u32) -> impl Iterator<Item = &GamepadEvent> {
        self.events.iter().filter(move |e| e.index == index)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
