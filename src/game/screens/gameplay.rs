//! Gameplay screen.
//!
//! At init the screen builds the house (room grid), hides one clue in every
//! clue slot, spawns one character per player and splits the canvas into
//! one [`PlayerView`] per player.
//!
//! # Phases
//!
//! The round starts in [`Phase::Hunting`]. When the phase clock reaches the
//! session's `time_per_phase`, the villain is released once
//! ([`Phase::VillainActive`]) and the clock restarts; later expirations only
//! restart the clock. When the last character dies the round is
//! [`Phase::Ended`] and `GameEnd` is queued.
//!
//! # Clue tiers
//!
//! Every clue slot rolls its tier with [`ClueTier::roll`] and flips a coin
//! for the high or low text variant of the selected haunted item.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::playernumber::PlayerNumber;
use crate::engine::group::EntityGroup;
use crate::engine::render::{CANVAS_WIDTH, Color, DrawCommand, Rect, RenderTarget};
use crate::engine::screen::Screen;
use crate::engine::view::{PlayerView, split_viewports};
use crate::events::audio::AudioCmd;
use crate::events::{GAMEPAD_EVENT, GameEvent, PLAYER_DIED};
use crate::game::GAME_END;
use crate::game::entities::character::{self, Character};
use crate::game::entities::clue::Clue;
use crate::game::entities::villain::Villain;
use crate::resources::assets::Assets;
use crate::resources::audio::play;
use crate::resources::cluedata::{ClueSource, ClueTier};
use crate::resources::eventbus::{add_event_listener, clear_all, queue_event};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::GamepadInbox;
use crate::resources::roomgrid::{Room, RoomGridGenerator, room_count_for};
use crate::resources::session::{CharacterId, RoundSummary, Session};

pub const HUNT_FX: &str = "resources/music/start.ogg";

const CLUE_Z: i32 = -1000;
const VILLAIN_Z: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hunting,
    VillainActive,
    Ended,
}

impl Phase {
    /// Phase counter as shown in the debug log: 1, 2, 3.
    pub fn number(self) -> u32 {
        match self {
            Phase::Hunting => 1,
            Phase::VillainActive => 2,
            Phase::Ended => 3,
        }
    }
}

/// What a clock advance did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTick {
    Running,
    /// The clock expired and restarted without a transition.
    Restarted,
    /// The hunting phase ran out; the villain must be released.
    ReleaseVillain,
}

/// Phase counter plus the clock measuring the current phase.
#[derive(Debug, Clone)]
pub struct PhaseController {
    phase: Phase,
    clock: f32,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Hunting,
            clock: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Advance the clock by `dt`. The villain is released at most once.
    pub fn advance(&mut self, dt: f32, time_per_phase: f32) -> PhaseTick {
        if self.phase == Phase::Ended {
            return PhaseTick::Running;
        }
        self.clock += dt;
        if self.clock < time_per_phase {
            return PhaseTick::Running;
        }
        self.clock = 0.0;
        if self.phase == Phase::Hunting {
            self.phase = Phase::VillainActive;
            PhaseTick::ReleaseVillain
        } else {
            PhaseTick::Restarted
        }
    }

    pub fn end(&mut self) {
        self.phase = Phase::Ended;
    }
}

pub struct GameplayScreen {
    clues: Box<dyn ClueSource>,
    room_generator: Box<dyn RoomGridGenerator>,
    rng: fastrand::Rng,
    group: EntityGroup,
    views: Vec<PlayerView>,
    rooms: Vec<Room>,
    phase: PhaseController,
    alive: Rc<Cell<usize>>,
    /// Seconds since init, shared with the `player_died` listener.
    round_clock: Rc<Cell<f32>>,
    haunted_item: Rc<RefCell<String>>,
}

impl GameplayScreen {
    pub fn new(clues: Box<dyn ClueSource>, room_generator: Box<dyn RoomGridGenerator>) -> Self {
        Self {
            clues,
            room_generator,
            rng: fastrand::Rng::new(),
            group: EntityGroup::new(),
            views: Vec::new(),
            rooms: Vec::new(),
            phase: PhaseController::new(),
            alive: Rc::new(Cell::new(0)),
            round_clock: Rc::new(Cell::new(0.0)),
            haunted_item: Rc::default(),
        }
    }

    pub fn group(&self) -> &EntityGroup {
        &self.group
    }

    pub fn views(&self) -> &[PlayerView] {
        &self.views
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn phase(&self) -> &PhaseController {
        &self.phase
    }

    pub fn alive(&self) -> usize {
        self.alive.get()
    }

    fn create_clues(&mut self, world: &mut World) {
        let path = world.resource::<GameConfig>().clue_data.clone();
        if let Err(e) = self.clues.read_file(&path) {
            warn!("{}; using built-in clues", e);
        }
        self.clues.select_items(&mut self.rng);
        *self.haunted_item.borrow_mut() = self.clues.selected_item().to_string();

        for room in &self.rooms {
            for slot in &room.clue_slots {
                let hi_low = self.rng.usize(0..2);
                let tier = ClueTier::roll(&mut self.rng);
                let text = self.clues.clue_text(tier, hi_low).to_string();
                self.group.spawn(
                    world,
                    PlayerNumber::OBJECT,
                    CLUE_Z,
                    Clue::new(tier, hi_low, text, slot.to_rect(&room.rect)),
                );
            }
        }
    }

    fn create_views(&mut self, world: &mut World, session: &Session) {
        let start = self.rooms.first().map_or([0.0, 0.0], |r| r.rect.center());
        let house = house_bounds(&self.rooms);

        for (i, (viewport, world_rect)) in split_viewports(session.num_players).into_iter().enumerate() {
            let player = i as i32 + 1;
            let picked = session.char_map.get(&player).copied();
            let id = picked.unwrap_or(CharacterId::ALL[i % CharacterId::ALL.len()]);
            let pos = [
                start[0] - character::WIDTH / 2.0 + 30.0 * (i as f32 - 1.5),
                start[1] - character::HEIGHT / 2.0,
            ];
            let gamepad = session.gamepad_for(player);
            if gamepad.is_none() {
                warn!("player {} has no gamepad", player);
            }
            self.group.spawn(
                world,
                PlayerNumber(player),
                0,
                Character::new(player, id, gamepad, pos, house),
            );

            let mut view = PlayerView::new(player, viewport, world_rect);
            view.bind(world, &self.group);
            self.views.push(view);
        }
    }

    fn release_villain(&mut self, world: &mut World) {
        // never in the starting room
        let room = match self.rooms.len() {
            0 => None,
            1 => Some(0),
            n => Some(self.rng.usize(1..n)),
        };
        let center = room.map_or([0.0, 0.0], |i| self.rooms[i].rect.center());
        play(world, AudioCmd::PlayFx { id: HUNT_FX.into() });
        self.group.spawn(world, PlayerNumber::NONE, VILLAIN_Z, Villain::new(center));
        info!("phase 1 over, villain released in room {:?}", room);
    }
}

/// Rectangle covering every room.
fn house_bounds(rooms: &[Room]) -> Rect {
    let Some(first) = rooms.first() else {
        return Rect::default();
    };
    let (mut x0, mut y0) = (first.rect.x, first.rect.y);
    let (mut x1, mut y1) = (first.rect.x + first.rect.w, first.rect.y + first.rect.h);
    for room in rooms {
        x0 = x0.min(room.rect.x);
        y0 = y0.min(room.rect.y);
        x1 = x1.max(room.rect.x + room.rect.w);
        y1 = y1.max(room.rect.y + room.rect.h);
    }
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

impl Screen for GameplayScreen {
    fn init(&mut self, world: &mut World) {
        let session = world.resource::<Session>().clone();
        self.rng = session.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        self.group = EntityGroup::new();
        self.views.clear();
        self.phase = PhaseController::new();
        self.round_clock.set(0.0);

        if let Err(e) = world.resource_mut::<Assets>().get_sound_buffer(HUNT_FX) {
            warn!("{}", e);
        }

        self.rooms = self.room_generator.generate_room_grid(room_count_for(session.num_players));
        self.create_clues(world);
        self.create_views(world, &session);
        self.group.init(world);
        self.alive.set(session.num_players);
        info!(
            "round started: {} players, {} rooms, {} entities",
            session.num_players,
            self.rooms.len(),
            self.group.len()
        );

        add_event_listener(world, GAMEPAD_EVENT, |event, world| {
            if let GameEvent::Gamepad(e) = event {
                world.resource_mut::<GamepadInbox>().push(*e);
            }
        });

        let alive = Rc::clone(&self.alive);
        let round_clock = Rc::clone(&self.round_clock);
        let haunted_item = Rc::clone(&self.haunted_item);
        add_event_listener(world, PLAYER_DIED, move |event, world| {
            let GameEvent::PlayerDied { player_number } = event else {
                return;
            };
            let left = alive.get().saturating_sub(1);
            alive.set(left);
            info!("player {} died, {} left", player_number, left);
            if left > 0 {
                return;
            }
            world.resource_mut::<Session>().last_round = Some(RoundSummary {
                haunted_item: haunted_item.borrow().clone(),
                duration: round_clock.get(),
                villain_released: true,
            });
            clear_all(world, GAMEPAD_EVENT);
            queue_event(world, GameEvent::change_screen(GAME_END));
        });
    }

    fn update(&mut self, dt: f32, world: &mut World) {
        self.round_clock.set(self.round_clock.get() + dt);
        self.group.update(dt, world);
        world.resource_mut::<GamepadInbox>().clear();

        for view in &mut self.views {
            view.update(world, &self.group);
        }

        if self.alive.get() == 0 && self.phase.phase() != Phase::Ended {
            self.phase.end();
            debug!("round ended after {:.1}s", self.round_clock.get());
        }

        let time_per_phase = world.resource::<Session>().time_per_phase;
        if self.phase.advance(dt, time_per_phase) == PhaseTick::ReleaseVillain {
            self.release_villain(world);
        }
    }

    fn draw(&self, world: &World, target: &mut dyn RenderTarget) {
        for view in &self.views {
            view.draw(world, &self.group, &self.rooms, target);
        }
        if self.phase.phase() == Phase::VillainActive {
            target.draw(DrawCommand::Text {
                text: "THE GHOST IS LOOSE".into(),
                pos: [CANVAS_WIDTH / 2.0 - 90.0, 8.0],
                size: 18,
                color: Color::RED,
            });
        }
    }
}
