//! Drawing surface abstraction and colors
//!
//! All geometry is centered: `center` is the middle of the shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Linear RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert HSL (hue in degrees, saturation and lightness in [0, 1])
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::rgb(r + m, g + m, b + m)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Primitive operations a host must provide
pub trait Surface {
    fn fill_rect(&mut self, center: Vec2, size: Vec2, color: Color, corner_radius: f32);

    fn stroke_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        color: Color,
        line_width: f32,
        corner_radius: f32,
    );

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);

    fn draw_text(&mut self, center: Vec2, size: f32, text: &str, color: Color);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    FillRect {
        center: Vec2,
        size: Vec2,
        color: Color,
        corner_radius: f32,
    },
    StrokeRect {
        center: Vec2,
        size: Vec2,
        color: Color,
        line_width: f32,
        corner_radius: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        line_width: f32,
    },
    Text {
        center: Vec2,
        size: f32,
        text: String,
        color: Color,
    },
}

/// Surface that records commands instead of drawing (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, center: Vec2, size: Vec2, color: Color, corner_radius: f32) {
        self.commands.push(DrawCommand::FillRect {
            center,
            size,
            color,
            corner_radius,
        });
    }

    fn stroke_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        color: Color,
        line_width: f32,
        corner_radius: f32,
    ) {
        self.commands.push(DrawCommand::StrokeRect {
            center,
            size,
            color,
            line_width,
            corner_radius,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn draw_text(&mut self, center: Vec2, size: f32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            center,
            size,
            text: text.to_string(),
            color,
        });
    }
}
