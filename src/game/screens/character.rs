//! Character select screen.
//!
//! Four portraits sit side by side. Every joined player hovers one of them
//! and moves with `LEFT`/`RIGHT`; `A`/`START` locks the hovered character in,
//! `B` releases it again. New gamepads join as the next player on their
//! first button release.
//!
//! The rules live in [`CharacterSelection`], which knows nothing about
//! screens or events. [`CharacterScreen`] feeds it gamepad releases and acts
//! on the [`SelectionOutcome`]: once every player has locked a character,
//! the picks are written to the [`Session`] and `GamePlay` is requested
//! exactly once.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::engine::render::{CANVAS_HEIGHT, CANVAS_WIDTH, Color, DrawCommand, Rect, RenderTarget};
use crate::engine::screen::Screen;
use crate::events::audio::AudioCmd;
use crate::events::gamepad::{GamepadButton, GamepadEvent};
use crate::events::{GAMEPAD_EVENT, GameEvent};
use crate::game::GAMEPLAY;
use crate::resources::assets::Assets;
use crate::resources::audio::play;
use crate::resources::eventbus::{add_event_listener, clear_all, queue_event};
use crate::resources::session::{CharacterId, MAX_PLAYERS, Session};

pub const CONFIRM_FX: &str = "resources/music/thunder.flac";
const PORTRAITS: &str = "resources/HH_Portraits.png";

/// One portrait slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSlot {
    pub character: CharacterId,
    /// Players whose cursor is on this slot, in arrival order.
    pub hovering: SmallVec<[i32; MAX_PLAYERS]>,
    pub selected_by: Option<i32>,
}

impl CharacterSlot {
    fn new(character: CharacterId) -> Self {
        Self {
            character,
            hovering: SmallVec::new(),
            selected_by: None,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected_by.is_some()
    }

    pub fn has_player(&self, player: i32) -> bool {
        self.hovering.contains(&player)
    }
}

/// Result of feeding one input to a [`CharacterSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Ignored,
    Joined { player: i32, slot: usize },
    Moved { from: usize, to: usize },
    Selected(usize),
    Unselected(usize),
    /// Every player has a character; the selection is now locked.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct CharacterSelection {
    slots: ArrayVec<CharacterSlot, MAX_PLAYERS>,
    num_players: usize,
    selected_count: usize,
    locked: bool,
}

impl Default for CharacterSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterSelection {
    pub fn new() -> Self {
        Self {
            slots: CharacterId::ALL.into_iter().map(CharacterSlot::new).collect(),
            num_players: 0,
            selected_count: 0,
            locked: false,
        }
    }

    pub fn slots(&self) -> &[CharacterSlot] {
        &self.slots
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Slot the player's cursor is on.
    pub fn hovered_slot(&self, player: i32) -> Option<usize> {
        self.slots.iter().position(|s| s.has_player(player))
    }

    /// Add `player`, hovering the first free slot.
    pub fn join(&mut self, player: i32) -> SelectionOutcome {
        if self.locked || self.num_players >= MAX_PLAYERS || self.hovered_slot(player).is_some() {
            return SelectionOutcome::Ignored;
        }
        let slot = self
            .slots
            .iter()
            .position(|s| !s.is_selected() && s.hovering.is_empty())
            .or_else(|| self.slots.iter().position(|s| !s.is_selected()));
        let Some(slot) = slot else {
            return SelectionOutcome::Ignored;
        };
        self.slots[slot].hovering.push(player);
        self.num_players += 1;
        SelectionOutcome::Joined { player, slot }
    }

    /// Move the player's cursor to the next unselected slot in `step`
    /// direction. A player who already locked a character stays put.
    pub fn step(&mut self, player: i32, step: Step) -> SelectionOutcome {
        if self.locked {
            return SelectionOutcome::Ignored;
        }
        let Some(from) = self.hovered_slot(player) else {
            return SelectionOutcome::Ignored;
        };
        if self.slots[from].selected_by == Some(player) {
            return SelectionOutcome::Ignored;
        }
        let free = |i: &usize| !self.slots[*i].is_selected();
        let to = match step {
            Step::Right => (from + 1..self.slots.len()).find(free),
            Step::Left => (0..from).rev().find(free),
        };
        let Some(to) = to else {
            return SelectionOutcome::Ignored;
        };
        self.slots[from].hovering.retain(|p| *p != player);
        self.slots[to].hovering.push(player);
        SelectionOutcome::Moved { from, to }
    }

    /// Lock the hovered character for `player`.
    pub fn confirm(&mut self, player: i32) -> SelectionOutcome {
        if self.locked {
            return SelectionOutcome::Ignored;
        }
        let Some(slot) = self.hovered_slot(player) else {
            return SelectionOutcome::Ignored;
        };
        if self.slots[slot].is_selected() {
            return SelectionOutcome::Ignored;
        }
        self.slots[slot].selected_by = Some(player);
        self.selected_count += 1;
        if self.selected_count == self.num_players {
            self.locked = true;
            return SelectionOutcome::Complete;
        }
        SelectionOutcome::Selected(slot)
    }

    /// Release the character `player` locked, if any.
    pub fn cancel(&mut self, player: i32) -> SelectionOutcome {
        if self.locked {
            return SelectionOutcome::Ignored;
        }
        let Some(slot) = self.slots.iter().position(|s| s.selected_by == Some(player)) else {
            return SelectionOutcome::Ignored;
        };
        self.slots[slot].selected_by = None;
        self.selected_count -= 1;
        SelectionOutcome::Unselected(slot)
    }

    /// Player number to locked character.
    pub fn character_map(&self) -> BTreeMap<i32, CharacterId> {
        self.slots
            .iter()
            .filter_map(|s| s.selected_by.map(|p| (p, s.character)))
            .collect()
    }
}

#[derive(Default)]
pub struct CharacterScreen {
    selection: Rc<RefCell<CharacterSelection>>,
}

impl CharacterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> std::cell::Ref<'_, CharacterSelection> {
        self.selection.borrow()
    }
}

/// Apply one released button to `selection`.
fn on_gamepad(selection: &mut CharacterSelection, event: &GamepadEvent, world: &mut World) {
    let known = world.resource::<Session>().player_map.get(&event.index).copied();
    let Some(player) = known else {
        let player = selection.num_players() as i32 + 1;
        if let SelectionOutcome::Joined { slot, .. } = selection.join(player) {
            world.resource_mut::<Session>().player_map.insert(event.index, player);
            info!("gamepad {} joined as player {} on slot {}", event.index, player, slot);
        }
        return;
    };

    let outcome = match event.button {
        GamepadButton::Right => selection.step(player, Step::Right),
        GamepadButton::Left => selection.step(player, Step::Left),
        GamepadButton::A | GamepadButton::Start => {
            play(world, AudioCmd::PlayFx { id: CONFIRM_FX.into() });
            selection.confirm(player)
        }
        GamepadButton::B => selection.cancel(player),
        _ => SelectionOutcome::Ignored,
    };
    debug!("player {} {:?} -> {:?}", player, event.button, outcome);

    if outcome == SelectionOutcome::Complete {
        {
            let mut session = world.resource_mut::<Session>();
            session.num_players = selection.num_players();
            session.char_map = selection.character_map();
            info!("team locked: {:?}", session.char_map);
        }
        clear_all(world, GAMEPAD_EVENT);
        queue_event(world, GameEvent::change_screen(GAMEPLAY));
    }
}

impl Screen for CharacterScreen {
    fn init(&mut self, world: &mut World) {
        let mut selection = CharacterSelection::new();
        {
            let mut session = world.resource_mut::<Session>();
            session.char_map.clear();
            session.num_players = 0;
            let mut joined: Vec<(i32, u32)> = session.player_map.iter().map(|(g, p)| (*p, *g)).collect();
            joined.sort();
            for (player, _) in joined {
                selection.join(player);
            }
        }
        *self.selection.borrow_mut() = selection;

        {
            let mut assets = world.resource_mut::<Assets>();
            for result in [assets.get_texture(PORTRAITS), assets.get_sound_buffer(CONFIRM_FX)] {
                if let Err(e) = result {
                    warn!("{}", e);
                }
            }
        }

        let selection = Rc::clone(&self.selection);
        add_event_listener(world, GAMEPAD_EVENT, move |event, world| {
            if let GameEvent::Gamepad(e) = event {
                if e.is_released() {
                    on_gamepad(&mut selection.borrow_mut(), e, world);
                }
            }
        });
    }

    fn update(&mut self, _dt: f32, _world: &mut World) {}

    fn draw(&self, _world: &World, target: &mut dyn RenderTarget) {
        let selection = self.selection.borrow();
        target.draw(DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            color: Color::BACKDROP,
        });
        target.draw(DrawCommand::Text {
            text: "MAKE YOUR TEAM".into(),
            pos: [250.0, 50.0],
            size: 24,
            color: Color::WHITE,
        });

        let step = (CANVAS_WIDTH - 4.0 * 15.0) / 4.0;
        for (i, slot) in selection.slots().iter().enumerate() {
            let portrait = Rect::new(40.0 + step * i as f32, 120.0, 150.0, 225.0);
            let frame = match slot.selected_by {
                Some(player) => Color::for_player(player),
                None => Color::WHITE,
            };
            target.draw(DrawCommand::Rect {
                rect: Rect::new(portrait.x - 3.0, portrait.y - 3.0, portrait.w + 6.0, portrait.h + 6.0),
                color: frame,
            });
            target.draw(DrawCommand::Sprite {
                texture: PORTRAITS.into(),
                dest: portrait,
            });
            target.draw(DrawCommand::Text {
                text: slot.character.name().into(),
                pos: [portrait.x, portrait.y - 24.0],
                size: 16,
                color: Color::WHITE,
            });
            for &player in &slot.hovering {
                target.draw(DrawCommand::Text {
                    text: format!("P{player}"),
                    pos: [portrait.x + 60.0, portrait.y + portrait.h + 5.0 + 35.0 * (player - 1) as f32],
                    size: 20,
                    color: Color::for_player(player),
                });
            }
        }
    }
}
