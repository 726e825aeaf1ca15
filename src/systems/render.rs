//! Frame-level drawing helpers.
//!
//! The active screen draws itself; this module adds what the engine draws on
//! top: the debug overlay with the current screen id and frame timing.

use bevy_ecs::prelude::*;

use crate::engine::render::{Color, DrawCommand, RenderTarget};
use crate::resources::debugmode::DebugMode;
use crate::resources::screenstate::CurrentScreen;
use crate::resources::worldtime::WorldTime;

/// Draw the debug overlay if [`DebugMode`] is present.
pub fn draw_debug_overlay(world: &World, target: &mut dyn RenderTarget) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let screen = world
        .get_resource::<CurrentScreen>()
        .and_then(|c| c.0.clone())
        .unwrap_or_else(|| "-".to_string());
    let (delta, frame) = world
        .get_resource::<WorldTime>()
        .map_or((0.0, 0), |t| (t.delta, t.frame_count));

    let lines = [
        format!("screen: {screen}"),
        format!("frame: {frame} dt: {:.1} ms", delta * 1000.0),
    ];
    for (i, text) in lines.into_iter().enumerate() {
        target.draw(DrawCommand::Text {
            text,
            pos: [4.0, 4.0 + 12.0 * i as f32],
            size: 10,
            color: Color::GREEN,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::render::RecordingTarget;

    #[test]
    fn test_overlay_only_in_debug_mode() {
        let mut world = World::new();
        world.insert_resource(CurrentScreen(Some("Title".into())));
        world.insert_resource(WorldTime::default());
        let mut target = RecordingTarget::new();

        draw_debug_overlay(&world, &mut target);
        assert_eq!(target.take_frame(), 0);

        world.insert_resource(DebugMode {});
        draw_debug_overlay(&world, &mut target);
        assert!(target.texts().any(|t| t == "screen: Title"));
    }
}
