//! A clue hidden in a room slot.

use bevy_ecs::prelude::*;

use crate::components::gameobject::{EntityKind, GameObject};
use crate::engine::render::{Color, DrawCommand, Rect, RenderTarget};
use crate::resources::cluedata::ClueTier;

#[derive(Debug, Clone, PartialEq)]
pub struct Clue {
    pub tier: ClueTier,
    /// 0 for the high text variant, 1 for the low one.
    pub hi_low: usize,
    pub text: String,
    rect: Rect,
}

impl Clue {
    pub fn new(tier: ClueTier, hi_low: usize, text: impl Into<String>, rect: Rect) -> Self {
        Self {
            tier,
            hi_low,
            text: text.into(),
            rect,
        }
    }
}

impl GameObject for Clue {
    fn update(&mut self, _me: Entity, _dt: f32, _world: &mut World) {}

    fn draw(&self, target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::Outline {
            rect: self.rect,
            color: Color::YELLOW,
        });
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Clue
    }
}
