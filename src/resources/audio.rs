//! ECS resource that carries audio commands to the platform.
//!
//! Use [`setup_audio`] once during initialization to insert the
//! [`AudioBridge`]. Screens send [`AudioCmd`]s through it; the engine drains
//! the channel every frame and hands each command to the platform backend.

use crate::events::audio::AudioCmd;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

/// Channel pair between game code and the audio backend.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (game -> backend).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver drained by the engine each frame.
    pub rx_cmd: Receiver<AudioCmd>,
}

impl AudioBridge {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        Self { tx_cmd, rx_cmd }
    }

    pub fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx_cmd.send(cmd) {
            warn!("audio command dropped: {:?}", e.into_inner());
        }
    }

    /// Commands sent since the last drain, oldest first.
    pub fn drain(&self) -> Vec<AudioCmd> {
        self.rx_cmd.try_iter().collect()
    }
}

impl Default for AudioBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the [`AudioBridge`] resource.
pub fn setup_audio(world: &mut World) {
    world.insert_resource(AudioBridge::new());
}

/// Send `cmd` if the world has an audio bridge.
pub fn play(world: &World, cmd: AudioCmd) {
    match world.get_resource::<AudioBridge>() {
        Some(bridge) => bridge.send(cmd),
        None => warn!("AudioBridge missing, dropping {:?}", cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let mut world = World::new();
        setup_audio(&mut world);
        play(&world, AudioCmd::PlayFx { id: "a".into() });
        play(&world, AudioCmd::StopAll);
        let drained = world.resource::<AudioBridge>().drain();
        assert_eq!(drained, vec![AudioCmd::PlayFx { id: "a".into() }, AudioCmd::StopAll]);
        assert!(world.resource::<AudioBridge>().drain().is_empty());
    }
}
