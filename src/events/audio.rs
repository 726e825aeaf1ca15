//! Audio commands.
//!
//! Screens never play sound directly. They send an [`AudioCmd`] through the
//! [`AudioBridge`](crate::resources::audio::AudioBridge) and the engine hands
//! the queued commands to the platform once per frame.

/// Commands sent *to* the audio backend.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Play a one-shot sound effect identified by its asset path.
    PlayFx { id: String },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    StopAll,
}
