//! Room grid of the haunted house.
//!
//! The house is a set of rectangular rooms. Each room lists the slots where
//! clues may be hidden, in grid units relative to the room's corner. The
//! gameplay screen asks a [`RoomGridGenerator`] for the rooms at init and
//! converts slots to pixels with [`TILE_SIZE`].

use crate::engine::render::Rect;

/// Pixels per grid unit.
pub const TILE_SIZE: f32 = 32.0;

/// A clue slot `(x_offset, y_offset, width, height)` in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueSlot {
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
}

impl ClueSlot {
    /// Pixel rectangle of this slot inside `room`.
    pub fn to_rect(&self, room: &Rect) -> Rect {
        Rect::new(
            room.x + TILE_SIZE * self.x_offset as f32,
            room.y + TILE_SIZE * self.y_offset as f32,
            TILE_SIZE * self.width as f32,
            TILE_SIZE * self.height as f32,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Position and size in pixels.
    pub rect: Rect,
    pub clue_slots: Vec<ClueSlot>,
}

pub trait RoomGridGenerator {
    fn generate_room_grid(&mut self, count: usize) -> Vec<Room>;
}

/// Number of rooms generated for a given player count.
pub fn room_count_for(num_players: usize) -> usize {
    match num_players {
        0 | 1 => 20,
        2 => 40,
        3 => 60,
        _ => 100,
    }
}

/// Lays rooms out row by row, each room `ROOM_W` x `ROOM_H` tiles, with two
/// or three randomly placed one-tile clue slots.
pub struct GridRoomGenerator {
    rng: fastrand::Rng,
    columns: usize,
}

impl GridRoomGenerator {
    pub const ROOM_W: u32 = 10;
    pub const ROOM_H: u32 = 8;

    pub fn new(rng: fastrand::Rng) -> Self {
        Self { rng, columns: 10 }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }
}

impl RoomGridGenerator for GridRoomGenerator {
    fn generate_room_grid(&mut self, count: usize) -> Vec<Room> {
        let room_w = TILE_SIZE * Self::ROOM_W as f32;
        let room_h = TILE_SIZE * Self::ROOM_H as f32;
        (0..count)
            .map(|i| {
                let col = (i % self.columns) as f32;
                let row = (i / self.columns) as f32;
                let slots = (0..self.rng.u32(2..=3))
                    .map(|_| ClueSlot {
                        x_offset: self.rng.u32(1..Self::ROOM_W - 1),
                        y_offset: self.rng.u32(1..Self::ROOM_H - 1),
                        width: 1,
                        height: 1,
                    })
                    .collect();
                Room {
                    rect: Rect::new(col * room_w, row * room_h, room_w, room_h),
                    clue_slots: slots,
                }
            })
            .collect()
    }
}
