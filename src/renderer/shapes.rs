//! How each entity describes itself to a surface

use glam::Vec2;

use super::surface::{Color, Surface};
use crate::sim::{Ball, Brick, Cursor, Wall};

/// Gap left between neighbouring bricks (pixels)
const BRICK_GAP: f32 = 4.0;
const BRICK_LABEL_SIZE: f32 = 15.0;
const CURSOR_RADIUS: f32 = 10.0;

/// Anything that can render itself
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

/// Brick hue climbs 30 degrees per remaining hit point
pub fn brick_color(hit_points: u64) -> Color {
    let hue = (hit_points % 12) as f32 * 30.0 + 30.0;
    Color::from_hsl(hue, 1.0, 0.7)
}

impl Draw for Wall {
    fn draw(&self, surface: &mut dyn Surface) {
        let c = self.collider();
        surface.fill_rect(c.center, c.size, self.color, 0.0);
    }
}

impl Draw for Brick {
    fn draw(&self, surface: &mut dyn Surface) {
        let c = self.collider();
        let size = c.size - Vec2::splat(BRICK_GAP);
        surface.stroke_rect(c.center, size, Color::BLACK, 3.0, 2.0);
        surface.fill_rect(c.center, size, brick_color(self.hit_points()), 2.0);
        surface.draw_text(
            c.center,
            BRICK_LABEL_SIZE,
            &self.hit_points().to_string(),
            Color::BLACK,
        );
    }
}

impl Draw for Ball {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position(), self.radius, self.color);
        surface.stroke_circle(self.position(), self.radius, Color::BLACK, 1.0);
    }
}

impl Draw for Cursor {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position(), CURSOR_RADIUS, Color::RED);
    }
}
