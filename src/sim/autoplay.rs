//! Idle/demo player
//!
//! Picks where to tap: the lowest visible safe shape, since it is the one about
//! to escape. Used by the headless demo and the attract mode in the browser.

use glam::Vec2;

use super::shape::{PlayField, Shape};

/// Pointer target for the next tap, if any safe shape is on screen.
///
/// Shapes whose hit circle overlaps a nearer dangerous shape are skipped,
/// because the resolver would pick the dangerous one.
pub fn pick_target(shapes: &[Shape], field: &PlayField, hit_radius: f32) -> Option<Vec2> {
    shapes
        .iter()
        .filter(|s| !s.dangerous && s.is_visible(field))
        .filter(|s| {
            shapes
                .iter()
                .filter(|d| d.dangerous)
                .all(|d| d.pos.distance(s.pos) >= hit_radius)
        })
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|s| s.pos)
}
