//! Pointer hit resolution
//!
//! One entry point for mouse, touch and keyboard input: the host normalizes
//! every pointer-down into play-field coordinates before calling `resolve`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Result of resolving one pointer-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nearest shape in range is safe
    Hit(Shape),
    /// Nothing in range
    Miss,
    /// Nearest shape in range is dangerous
    DangerHit(Shape),
}

impl Outcome {
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            Outcome::Hit(shape) | Outcome::DangerHit(shape) => Some(shape),
            Outcome::Miss => None,
        }
    }
}

/// Index of the shape nearest to `pointer` with center strictly inside `hit_radius`.
///
/// Ties keep the earliest shape in `shapes`.
pub fn nearest_in_radius(pointer: Vec2, shapes: &[Shape], hit_radius: f32) -> Option<usize> {
    if !pointer.is_finite() {
        return None;
    }
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| (i, shape.pos.distance(pointer)))
        .filter(|(_, dist)| *dist < hit_radius)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

/// Classify a pointer-down against the live shapes
pub fn resolve(pointer: Vec2, shapes: &[Shape], hit_radius: f32) -> Outcome {
    match nearest_in_radius(pointer, shapes, hit_radius) {
        Some(i) if shapes[i].dangerous => Outcome::DangerHit(shapes[i].clone()),
        Some(i) => Outcome::Hit(shapes[i].clone()),
        None => Outcome::Miss,
    }
}
