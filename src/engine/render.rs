//! Narrow drawing seam.
//!
//! The engine never talks to a graphics library directly. Screens, views and
//! entities describe what they want drawn as [`DrawCommand`]s and hand them
//! to a [`RenderTarget`]. A windowing backend turns the commands into real
//! draw calls; [`RecordingTarget`] simply keeps them, which is what the
//! headless runner and the tests use.

use serde::{Deserialize, Serialize};

/// Canvas size the game is laid out for.
pub const CANVAS_WIDTH: f32 = 720.0;
pub const CANVAS_HEIGHT: f32 = 480.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.x + self.w * 0.5, self.y + self.h * 0.5]
    }

    /// Axis-aligned overlap test; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Same size, moved so that its centre lands on `center`.
    pub fn centered_on(&self, center: [f32; 2]) -> Rect {
        Rect::new(center[0] - self.w * 0.5, center[1] - self.h * 0.5, self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Self = Self(0, 0, 0, 255);
    pub const WHITE: Self = Self(255, 255, 255, 255);
    pub const BACKDROP: Self = Self(30, 30, 30, 255);
    pub const RED: Self = Self(220, 40, 40, 255);
    pub const GREEN: Self = Self(40, 200, 80, 255);
    pub const BLUE: Self = Self(50, 90, 230, 255);
    pub const YELLOW: Self = Self(240, 210, 40, 255);
    pub const PURPLE: Self = Self(130, 40, 170, 255);
    pub const GRAY: Self = Self(120, 120, 120, 255);

    /// Colour identifying a player number (1-based), cycling after four.
    pub fn for_player(player_number: i32) -> Self {
        const PLAYERS: [Color; 4] = [Color::RED, Color::BLUE, Color::GREEN, Color::YELLOW];
        PLAYERS[((player_number - 1).rem_euclid(4)) as usize]
    }
}

/// Everything a screen can ask the backend to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Map `world` (pixels) onto `viewport` (normalized `[0,1]` canvas space).
    SetView { viewport: Rect, world: Rect },
    ResetView,
    Rect { rect: Rect, color: Color },
    Outline { rect: Rect, color: Color },
    Text { text: String, pos: [f32; 2], size: u32, color: Color },
    Sprite { texture: String, dest: Rect },
}

pub trait RenderTarget {
    fn draw(&mut self, command: DrawCommand);
}

/// Render target that keeps every command of the current frame.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the recorded commands, returning how many there were.
    pub fn take_frame(&mut self) -> usize {
        let n = self.commands.len();
        self.commands.clear();
        n
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderTarget for RecordingTarget {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(0.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_centered_on() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).centered_on([200.0, 100.0]);
        assert_eq!(r, Rect::new(150.0, 75.0, 100.0, 50.0));
        assert_eq!(r.center(), [200.0, 100.0]);
    }

    #[test]
    fn test_player_colors_cycle() {
        assert_eq!(Color::for_player(1), Color::RED);
        assert_eq!(Color::for_player(5), Color::RED);
        assert_eq!(Color::for_player(4), Color::YELLOW);
    }

    #[test]
    fn test_recording_target_collects_texts() {
        let mut target = RecordingTarget::new();
        target.draw(DrawCommand::Clear(Color::BLACK));
        target.draw(DrawCommand::Text {
            text: "hello".into(),
            pos: [0.0, 0.0],
            size: 12,
            color: Color::WHITE,
        });
        assert_eq!(target.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert_eq!(target.take_frame(), 2);
        assert!(target.commands.is_empty());
    }
}
