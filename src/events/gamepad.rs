//! Gamepad input events.
//!
//! The [`GamepadController`](crate::resources::input::GamepadController)
//! compares gamepad snapshots between frames and emits one [`GamepadEvent`]
//! per button that changed state.

use serde::{Deserialize, Serialize};

/// Logical gamepad buttons the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GamepadButton {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    Start,
    Select,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 10] = [
        GamepadButton::Up,
        GamepadButton::Down,
        GamepadButton::Left,
        GamepadButton::Right,
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::Start,
        GamepadButton::Select,
    ];

    /// Bit of this button inside a [`GamepadState`](crate::resources::input::GamepadState) mask.
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamepadButton::Up => "UP",
            GamepadButton::Down => "DOWN",
            GamepadButton::Left => "LEFT",
            GamepadButton::Right => "RIGHT",
            GamepadButton::A => "A",
            GamepadButton::B => "B",
            GamepadButton::X => "X",
            GamepadButton::Y => "Y",
            GamepadButton::Start => "START",
            GamepadButton::Select => "SELECT",
        }
    }

    /// Movement direction as a unit vector, for the four d-pad buttons.
    pub fn direction(self) -> Option<[f32; 2]> {
        match self {
            GamepadButton::Up => Some([0.0, -1.0]),
            GamepadButton::Down => Some([0.0, 1.0]),
            GamepadButton::Left => Some([-1.0, 0.0]),
            GamepadButton::Right => Some([1.0, 0.0]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A single button transition on one gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadEvent {
    /// Hardware index of the gamepad.
    pub index: u32,
    pub button: GamepadButton,
    pub state: ButtonState,
}

impl GamepadEvent {
    pub fn pressed(index: u32, button: GamepadButton) -> Self {
        Self { index, button, state: ButtonState::Pressed }
    }

    pub fn released(index: u32, button: GamepadButton) -> Self {
        Self { index, button, state: ButtonState::Released }
    }

    pub fn is_released(&self) -> bool {
        self.state == ButtonState::Released
    }

    /// Confirm buttons (`A` or `START`).
    pub fn is_confirm(&self) -> bool {
        matches!(self.button, GamepadButton::A | GamepadButton::Start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_bits_are_distinct() {
        let mut mask = 0u16;
        for b in GamepadButton::ALL {
            assert_eq!(mask & b.bit(), 0);
            mask |= b.bit();
        }
    }

    #[test]
    fn test_button_names_match_serde() {
        for b in GamepadButton::ALL {
            let json = serde_json::to_string(&b).unwrap();
            assert_eq!(json, format!("\"{}\"", b.as_str()));
        }
    }

    #[test]
    fn test_confirm_buttons() {
        assert!(GamepadEvent::released(0, GamepadButton::A).is_confirm());
        assert!(GamepadEvent::released(0, GamepadButton::Start).is_confirm());
        assert!(!GamepadEvent::released(0, GamepadButton::B).is_confirm());
    }
}
