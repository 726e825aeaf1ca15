//! Split-screen player views.
//!
//! A [`PlayerView`] shows the part of the house around one player's
//! character. It holds the character's [`Entity`] handle, never the entity
//! itself: the [`EntityGroup`] and the world are passed in on every call.

use bevy_ecs::prelude::*;

use crate::engine::group::EntityGroup;
use crate::engine::render::{CANVAS_HEIGHT, CANVAS_WIDTH, Color, DrawCommand, Rect, RenderTarget};
use crate::resources::roomgrid::Room;

/// Gap between neighbouring views, in canvas pixels.
pub const GUTTER: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct PlayerView {
    player_number: i32,
    entity: Option<Entity>,
    /// Normalized canvas area this view occupies.
    viewport: Rect,
    /// World area (pixels) shown in the viewport.
    world: Rect,
}

impl PlayerView {
    pub fn new(player_number: i32, viewport: Rect, world: Rect) -> Self {
        Self {
            player_number,
            entity: None,
            viewport,
            world,
        }
    }

    pub fn player_number(&self) -> i32 {
        self.player_number
    }

    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn world_rect(&self) -> Rect {
        self.world
    }

    /// Resolve the followed entity by player number.
    pub fn bind(&mut self, world: &World, group: &EntityGroup) -> Option<Entity> {
        self.entity = group.get(world, self.player_number);
        self.entity
    }

    /// Centre the world rectangle on the followed entity.
    pub fn update(&mut self, world: &World, group: &EntityGroup) {
        if let Some(bounds) = self.entity.and_then(|e| group.bounds(world, e)) {
            self.world = self.world.centered_on(bounds.center());
        }
    }

    pub fn draw(&self, world: &World, group: &EntityGroup, rooms: &[Room], target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::SetView {
            viewport: self.viewport,
            world: self.world,
        });
        for room in rooms.iter().filter(|r| r.rect.intersects(&self.world)) {
            target.draw(DrawCommand::Rect { rect: room.rect, color: Color::BACKDROP });
            target.draw(DrawCommand::Outline { rect: room.rect, color: Color::GRAY });
        }
        group.draw(world, target);
        let dead = self.entity.is_some_and(|e| !group.is_alive(world, e));
        let label = if dead {
            format!("P{} (dead)", self.player_number)
        } else {
            format!("P{}", self.player_number)
        };
        target.draw(DrawCommand::Text {
            text: label,
            pos: [self.world.x + 8.0, self.world.y + 8.0],
            size: 14,
            color: Color::for_player(self.player_number),
        });
        target.draw(DrawCommand::ResetView);
    }
}

/// Viewport and initial world rectangle for each of `num_players` views.
///
/// One player gets the whole canvas, two split it left/right, three or four
/// share a 2x2 grid. Neighbouring viewports are separated by [`GUTTER`].
pub fn split_viewports(num_players: usize) -> Vec<(Rect, Rect)> {
    let (ratio_w, ratio_h) = match num_players {
        0 | 1 => (1.0, 1.0),
        2 => (0.5, 1.0),
        _ => (0.5, 0.5),
    };
    let gutter_x = GUTTER / CANVAS_WIDTH / 2.0;
    let gutter_y = GUTTER / CANVAS_HEIGHT / 2.0;

    (0..num_players)
        .map(|i| {
            let x = (i % 2) as f32;
            let y = (i / 2) as f32;
            let world = Rect::new(0.0, 0.0, CANVAS_WIDTH * ratio_w, CANVAS_HEIGHT * ratio_h);
            let viewport = if num_players == 1 {
                Rect::new(0.0, 0.0, 1.0, 1.0)
            } else {
                let (gx, gy) = (
                    if ratio_w < 1.0 { gutter_x } else { 0.0 },
                    if ratio_h < 1.0 { gutter_y } else { 0.0 },
                );
                Rect::new(
                    (ratio_w + gx) * x,
                    (ratio_h + gy) * y,
                    ratio_w - gx,
                    ratio_h - gy,
                )
            };
            (viewport, world)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_single_view_fills_canvas() {
        let views = split_viewports(1);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].0, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(views[0].1, Rect::new(0.0, 0.0, 720.0, 480.0));
    }

    #[test]
    fn test_two_views_side_by_side() {
        let views = split_viewports(2);
        let (left, right) = (views[0].0, views[1].0);
        assert!(approx(left.x, 0.0));
        assert!(approx(left.h, 1.0));
        assert!(left.x + left.w < right.x, "gutter between views");
        assert!(approx(right.x + right.w, 1.0));
        assert_eq!(views[1].1.w, 360.0);
    }

    #[test]
    fn test_four_views_in_grid_stay_on_canvas() {
        let views = split_viewports(4);
        assert_eq!(views.len(), 4);
        for (viewport, world) in &views {
            assert!(viewport.x >= 0.0 && viewport.y >= 0.0);
            assert!(viewport.x + viewport.w <= 1.0 + 1e-5);
            assert!(viewport.y + viewport.h <= 1.0 + 1e-5);
            assert_eq!(*world, Rect::new(0.0, 0.0, 360.0, 240.0));
        }
        assert!(views[2].0.y > views[0].0.y + views[0].0.h);
        for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            assert!(!views[a].0.intersects(&views[b].0));
        }
    }

    #[test]
    fn test_three_views_leave_fourth_quadrant_empty() {
        let views = split_viewports(3);
        assert_eq!(views.len(), 3);
        assert!(approx(views[2].0.x, 0.0));
        assert!(views[2].0.y > 0.5);
    }
}
