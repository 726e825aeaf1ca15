//! Active screen resources.
//!
//! These resources track which screen is current and any pending switch
//! requested through a `change_screen` event. The engine's persistent
//! `change_screen` listener only records the request in [`NextScreen`]; the
//! switch itself happens at the end of the frame, after the active screen
//! finished its update. Screens ask the engine to shut down by inserting
//! [`QuitRequested`].

use bevy_ecs::prelude::Resource;

/// Representation of a requested screen switch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextScreens {
    #[default]
    Unchanged,
    Pending(String),
}

/// Intent to change to another screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextScreen {
    next: NextScreens,
}

impl NextScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextScreens {
        &self.next
    }

    /// Request a switch to `id`. A later request in the same frame wins.
    pub fn set(&mut self, id: impl Into<String>) {
        self.next = NextScreens::Pending(id.into());
    }

    /// Take the pending request, leaving [`NextScreens::Unchanged`].
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(&mut self.next) {
            NextScreens::Pending(id) => Some(id),
            NextScreens::Unchanged => None,
        }
    }
}

/// Id of the screen currently receiving update/draw calls.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentScreen(pub Option<String>);

/// Marker resource: when present at the end of a frame the engine exits.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct QuitRequested;
