//! Shape entities and the play-field they fall through

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Outline drawn for a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
    Hexagon,
    Diamond,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Diamond,
    ];
}

/// Outline colors for safe shapes
pub const PALETTE: [&str; 10] = [
    "#ff6b6b", "#48dbfb", "#1dd1a1", "#feca57", "#ff9ff3", "#00d2d3", "#54a0ff", "#6c5ce7",
    "#00cec9", "#0984e3",
];

/// Reserved for dangerous shapes
pub const DANGER_COLOR: &str = "#ff0000";

/// A falling shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    pub kind: ShapeKind,
    /// Center position in play-field pixels
    pub pos: Vec2,
    /// Vertical speed, px per baseline frame
    pub speed: f32,
    /// Vertical acceleration, px per baseline frame squared
    pub acceleration: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per baseline frame
    pub rotation_speed: f32,
    pub size: f32,
    /// Ends the session when hit. Fixed at creation.
    pub dangerous: bool,
    pub color: String,
}

impl Shape {
    /// A safe shape at rest with default size and gravity (mostly for tests and demos)
    pub fn new(id: u32, kind: ShapeKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            speed: 0.0,
            acceleration: SHAPE_ACCELERATION,
            rotation: 0.0,
            rotation_speed: 0.0,
            size: SHAPE_SIZE,
            dangerous: false,
            color: PALETTE[0].to_string(),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn into_dangerous(mut self) -> Self {
        self.dangerous = true;
        self.color = DANGER_COLOR.to_string();
        self
    }

    /// True once the shape has fallen past the bottom margin
    pub fn is_below(&self, field: &PlayField) -> bool {
        self.pos.y > field.height + OFFSCREEN_MARGIN
    }

    /// True while any part of the shape is on screen
    pub fn is_visible(&self, field: &PlayField) -> bool {
        let half = self.size / 2.0;
        self.pos.y + half >= 0.0 && self.pos.y - half <= field.height
    }
}

/// Play-field dimensions in CSS pixels, supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        // Non-finite or negative sizes collapse to an empty field
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    /// Horizontal range for a shape center so the whole shape fits
    pub fn center_range(&self, size: f32) -> (f32, f32) {
        let half = size / 2.0;
        if self.width <= size {
            let mid = self.width / 2.0;
            (mid, mid)
        } else {
            (half, self.width - half)
        }
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_range() {
        let field = PlayField::new(400.0, 300.0);
        assert_eq!(field.center_range(50.0), (25.0, 375.0));

        let narrow = PlayField::new(40.0, 300.0);
        assert_eq!(narrow.center_range(50.0), (20.0, 20.0));
    }

    #[test]
    fn test_field_rejects_garbage() {
        let field = PlayField::new(f32::NAN, -10.0);
        assert_eq!(field.width, 0.0);
        assert_eq!(field.height, 0.0);
    }

    #[test]
    fn test_offscreen_and_visibility() {
        let field = PlayField::new(400.0, 300.0);
        let mut shape = Shape::new(1, ShapeKind::Circle, Vec2::new(100.0, SPAWN_Y));
        assert!(!shape.is_visible(&field));
        assert!(!shape.is_below(&field));

        shape.pos.y = 10.0;
        assert!(shape.is_visible(&field));

        shape.pos.y = 350.0;
        assert!(!shape.is_below(&field), "exactly at the margin is still live");
        shape.pos.y = 350.5;
        assert!(shape.is_below(&field));
    }

    #[test]
    fn test_dangerous_uses_reserved_color() {
        let shape = Shape::new(1, ShapeKind::Diamond, Vec2::ZERO).into_dangerous();
        assert!(shape.dangerous);
        assert_eq!(shape.color, DANGER_COLOR);
        assert!(!PALETTE.contains(&DANGER_COLOR));
    }
}
