//! Screen switch housekeeping.
//!
//! Before a new screen is initialised the engine releases everything the
//! previous one left in the world: entities not tagged
//! [`Persistent`], screen-scoped bus listeners, queued events and gamepad
//! input waiting in the inbox.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::persistent::Persistent;
use crate::resources::eventbus::EventBus;
use crate::resources::input::GamepadInbox;

/// Despawn every entity without a [`Persistent`] marker. Returns the count.
pub fn clean_entities(world: &mut World) -> usize {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, Without<Persistent>>()
        .iter(world)
        .collect();
    for &entity in &doomed {
        world.despawn(entity);
    }
    doomed.len()
}

/// Drop what belongs to the outgoing screen.
pub fn release_screen_state(world: &mut World) {
    let despawned = clean_entities(world);
    if let Some(mut bus) = world.get_non_send_resource_mut::<EventBus>() {
        bus.clear_screen_listeners();
        bus.clear_queue();
    }
    if let Some(mut inbox) = world.get_resource_mut::<GamepadInbox>() {
        inbox.clear();
    }
    debug!("released screen state, {} entities despawned", despawned);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::zindex::ZIndex;
    use crate::events::PLAYER_DIED;

    #[test]
    fn test_release_keeps_persistent() {
        let mut world = World::new();
        world.insert_non_send_resource(EventBus::new());
        let keep = world.spawn((ZIndex(0), Persistent)).id();
        let drop = world.spawn(ZIndex(1)).id();
        {
            let mut bus = world.non_send_resource_mut::<EventBus>();
            bus.add_event_listener(PLAYER_DIED, |_, _| {});
            bus.add_persistent_listener(PLAYER_DIED, |_, _| {});
        }

        release_screen_state(&mut world);

        assert!(world.get_entity(keep).is_ok());
        assert!(world.get_entity(drop).is_err());
        assert_eq!(world.non_send_resource::<EventBus>().listener_count(PLAYER_DIED), 1);
    }
}
