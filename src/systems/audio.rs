//! Audio forwarding.
//!
//! Game code sends [`AudioCmd`](crate::events::audio::AudioCmd)s through the
//! [`AudioBridge`] channel. Once per frame the engine drains the channel and
//! hands every command, in send order, to the platform backend.

use bevy_ecs::prelude::*;

use crate::engine::platform::Platform;
use crate::resources::audio::AudioBridge;

/// Forward pending audio commands to `platform`. Returns how many were sent.
pub fn forward_audio_cmds(world: &World, platform: &mut dyn Platform) -> usize {
    let Some(bridge) = world.get_resource::<AudioBridge>() else {
        return 0;
    };
    let cmds = bridge.drain();
    let n = cmds.len();
    for cmd in cmds {
        platform.play_audio(cmd);
    }
    n
}
