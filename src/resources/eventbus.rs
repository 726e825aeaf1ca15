//! Publish/subscribe event bus.
//!
//! The [`EventBus`] is a non-send resource (listeners are `Rc` closures) that
//! maps an event name to the ordered list of listeners registered for it.
//! Listeners receive the event and `&mut World`, so they can read and write
//! any resource, trigger further events or edit the bus itself.
//!
//! # Dispatch
//!
//! - [`trigger_event`] runs every listener for the event's name right away,
//!   in registration order, before returning.
//! - [`queue_event`] defers an event until the next [`drain_queued_events`],
//!   which the engine calls once per frame after the active screen updated.
//!   Queued events are handled in the order they were queued.
//!
//! Dispatch iterates over a snapshot of the listener list. A listener that
//! calls [`EventBus::clear_all`] for the type being dispatched does not cut
//! the current pass short; the removal is seen by the next dispatch.
//!
//! # Scopes
//!
//! Listeners added with [`EventBus::add_event_listener`] belong to the active
//! screen and are dropped by the engine on every screen change. Engine-level
//! listeners use [`EventBus::add_persistent_listener`].
//!
//! # Example
//!
//! ```ignore
//! bus.add_event_listener(PLAYER_DIED, |event, world| {
//!     if let GameEvent::PlayerDied { player_number } = event {
//!         info!("player {player_number} is out");
//!     }
//! });
//! trigger_event(world, GameEvent::PlayerDied { player_number: 1 });
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bevy_ecs::prelude::World;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::events::GameEvent;

/// Shared handle to a listener closure.
pub type Listener = Rc<RefCell<dyn FnMut(&GameEvent, &mut World)>>;

/// Lifetime of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerScope {
    /// Removed when the engine switches screens.
    Screen,
    /// Kept until explicitly cleared.
    Persistent,
}

struct Registration {
    scope: ListenerScope,
    listener: Listener,
}

/// Registry of listeners keyed by event name plus the deferred event queue.
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<String, Vec<Registration>>,
    queue: VecDeque<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen-scoped listener for `event_type`.
    ///
    /// Registering the same closure twice yields two independent listeners.
    pub fn add_event_listener<F>(&mut self, event_type: impl Into<String>, handler: F)
    where
        F: FnMut(&GameEvent, &mut World) + 'static,
    {
        self.register(event_type.into(), ListenerScope::Screen, handler);
    }

    /// Register a listener that survives screen changes.
    pub fn add_persistent_listener<F>(&mut self, event_type: impl Into<String>, handler: F)
    where
        F: FnMut(&GameEvent, &mut World) + 'static,
    {
        self.register(event_type.into(), ListenerScope::Persistent, handler);
    }

    fn register<F>(&mut self, event_type: String, scope: ListenerScope, handler: F)
    where
        F: FnMut(&GameEvent, &mut World) + 'static,
    {
        debug!("listener added for '{}' ({:?})", event_type, scope);
        let listener: Listener = Rc::new(RefCell::new(handler));
        self.listeners
            .entry(event_type)
            .or_default()
            .push(Registration { scope, listener });
    }

    /// Defer `event` until the next drain point.
    pub fn queue_event(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Remove every listener for `event_type`, whatever its scope.
    pub fn clear_all(&mut self, event_type: &str) {
        if self.listeners.remove(event_type).is_some() {
            debug!("cleared listeners for '{}'", event_type);
        }
    }

    /// Remove all screen-scoped listeners, keeping persistent ones.
    pub fn clear_screen_listeners(&mut self) {
        for registrations in self.listeners.values_mut() {
            registrations.retain(|r| r.scope == ListenerScope::Persistent);
        }
        self.listeners.retain(|_, registrations| !registrations.is_empty());
    }

    /// Drop queued events without dispatching them.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, Vec::len)
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    fn snapshot(&self, event_type: &str) -> Vec<Listener> {
        self.listeners
            .get(event_type)
            .map(|registrations| registrations.iter().map(|r| Rc::clone(&r.listener)).collect())
            .unwrap_or_default()
    }

    fn pop_queued(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }
}

/// Invoke every listener registered for `event` synchronously.
///
/// With no listeners (or no bus in the world) this does nothing.
pub fn trigger_event(world: &mut World, event: GameEvent) {
    let listeners = match world.get_non_send_resource::<EventBus>() {
        Some(bus) => bus.snapshot(event.name()),
        None => {
            warn!("EventBus missing, dropping {:?}", event);
            return;
        }
    };
    if listeners.is_empty() {
        debug!("no listeners for '{}'", event.name());
        return;
    }
    for listener in listeners {
        match listener.try_borrow_mut() {
            Ok(mut handler) => (&mut *handler)(&event, world),
            Err(_) => warn!(
                "listener for '{}' re-entered while running, skipped",
                event.name()
            ),
        }
    }
}

/// Queue `event` on the world's bus.
pub fn queue_event(world: &mut World, event: GameEvent) {
    match world.get_non_send_resource_mut::<EventBus>() {
        Some(mut bus) => bus.queue_event(event),
        None => warn!("EventBus missing, dropping queued {:?}", event),
    }
}

/// Remove every listener for `event_type` on the world's bus.
pub fn clear_all(world: &mut World, event_type: &str) {
    if let Some(mut bus) = world.get_non_send_resource_mut::<EventBus>() {
        bus.clear_all(event_type);
    }
}

/// Register a screen-scoped listener on the world's bus.
pub fn add_event_listener<F>(world: &mut World, event_type: &str, handler: F)
where
    F: FnMut(&GameEvent, &mut World) + 'static,
{
    match world.get_non_send_resource_mut::<EventBus>() {
        Some(mut bus) => bus.add_event_listener(event_type, handler),
        None => warn!("EventBus missing, listener for '{}' not added", event_type),
    }
}

/// Dispatch queued events in FIFO order until the queue is empty.
///
/// Events queued by listeners during the drain are handled in the same
/// drain. Returns the number of events dispatched.
pub fn drain_queued_events(world: &mut World) -> usize {
    let mut dispatched = 0;
    loop {
        let next = world
            .get_non_send_resource_mut::<EventBus>()
            .and_then(|mut bus| bus.pop_queued());
        let Some(event) = next else {
            break;
        };
        trigger_event(world, event);
        dispatched += 1;
    }
    dispatched
}
