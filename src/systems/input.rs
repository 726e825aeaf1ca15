//! Gamepad pump.
//!
//! Turns the platform's per-frame gamepad snapshots into `gamepad_event`
//! dispatches. Only state changes produce events: a held button yields one
//! press when it goes down and one release when it comes up.

use bevy_ecs::prelude::*;
use log::debug;

use crate::events::GameEvent;
use crate::resources::eventbus::trigger_event;
use crate::resources::input::{GamepadController, GamepadState};

/// Dispatch one `gamepad_event` per button transition since the last call.
///
/// Returns the number of events dispatched.
pub fn pump_gamepads(world: &mut World, controller: &mut GamepadController, states: &[GamepadState]) -> usize {
    let events = controller.poll(states);
    for event in &events {
        debug!(
            "gamepad {} {} {:?}",
            event.index,
            event.button.as_str(),
            event.state
        );
        trigger_event(world, GameEvent::Gamepad(*event));
    }
    events.len()
}
