//! Frame-rate independent falling motion
//!
//! Every delta is scaled by `dt / FRAME_BASELINE_MS` so a 120 Hz display and a
//! 30 Hz one see the same fall over the same wall time.

use super::shape::{PlayField, Shape};
use crate::consts::*;
use crate::wrap_degrees;

/// Clamp a raw frame delta to something safe to integrate.
///
/// Negative or non-finite deltas become zero; long stalls are capped.
pub fn sanitize_dt(dt_ms: f64) -> f32 {
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        return 0.0;
    }
    (dt_ms as f32).min(MAX_STEP_MS)
}

/// Baseline-frame multiplier for a sanitized delta
#[inline]
pub fn step_factor(dt_ms: f32) -> f32 {
    dt_ms / FRAME_BASELINE_MS
}

impl Shape {
    /// Semi-implicit Euler step: speed first, then position
    pub fn integrate(&mut self, factor: f32) {
        self.speed += self.acceleration * factor;
        self.pos.y += self.speed * factor;
        self.rotation = wrap_degrees(self.rotation + self.rotation_speed * factor);
    }
}

/// Advance all shapes by `dt_ms` and remove those that fell off the field.
///
/// Returns the retired shapes in spawn order.
pub fn advance(shapes: &mut Vec<Shape>, dt_ms: f64, field: &PlayField) -> Vec<Shape> {
    let factor = step_factor(sanitize_dt(dt_ms));
    if factor > 0.0 {
        for shape in shapes.iter_mut() {
            shape.integrate(factor);
        }
    }

    let mut retired = Vec::new();
    shapes.retain(|shape| {
        if shape.is_below(field) {
            retired.push(shape.clone());
            false
        } else {
            true
        }
    });
    retired
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::shape::ShapeKind;

    #[test]
    fn test_euler_scenario() {
        let field = PlayField::new(400.0, 600.0);
        let mut shapes = vec![Shape::new(1, ShapeKind::Circle, Vec2::new(100.0, 0.0)).with_speed(2.0)];

        for _ in 0..10 {
            let retired = advance(&mut shapes, FRAME_BASELINE_MS as f64, &field);
            assert!(retired.is_empty());
        }

        // y = sum over k=1..10 of (2 + 0.1k) = 20 + 5.5
        let shape = &shapes[0];
        assert!((shape.pos.y - 25.5).abs() < 1e-3, "y = {}", shape.pos.y);
        assert!((shape.speed - 3.0).abs() < 1e-4);
        assert_eq!(shape.pos.x, 100.0);
    }

    #[test]
    fn test_scaled_by_dt() {
        let mut a = Shape::new(1, ShapeKind::Circle, Vec2::ZERO).with_speed(3.0);
        let mut b = a.clone();
        a.acceleration = 0.0;
        b.acceleration = 0.0;

        // One 33.34 ms step covers the same distance as two baseline steps
        a.integrate(step_factor(FRAME_BASELINE_MS * 2.0));
        b.integrate(1.0);
        b.integrate(1.0);
        assert!((a.pos.y - b.pos.y).abs() < 1e-4);
    }

    #[test]
    fn test_bad_dt_has_no_effect() {
        let field = PlayField::new(400.0, 600.0);
        let original = Shape::new(1, ShapeKind::Hexagon, Vec2::new(50.0, 10.0)).with_speed(2.0);
        let mut shapes = vec![original.clone()];

        for dt in [-16.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0] {
            advance(&mut shapes, dt, &field);
        }
        assert_eq!(shapes[0], original);
    }

    #[test]
    fn test_long_stall_is_capped() {
        assert_eq!(sanitize_dt(5000.0), MAX_STEP_MS);
        assert_eq!(sanitize_dt(8.0), 8.0);
    }

    #[test]
    fn test_retires_below_margin() {
        let field = PlayField::new(400.0, 300.0);
        let mut shapes = vec![
            Shape::new(1, ShapeKind::Circle, Vec2::new(10.0, 349.0)).with_speed(2.0),
            Shape::new(2, ShapeKind::Circle, Vec2::new(10.0, 100.0)).with_speed(2.0),
        ];
        let retired = advance(&mut shapes, FRAME_BASELINE_MS as f64, &field);
        assert_eq!(retired.len(), 1);
        assert_eq!(retired[0].id, 1);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].id, 2);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut shape = Shape::new(1, ShapeKind::Triangle, Vec2::ZERO);
        shape.rotation = 358.0;
        shape.rotation_speed = 4.0;
        shape.integrate(1.0);
        assert!((shape.rotation - 2.0).abs() < 1e-4);

        shape.rotation_speed = -5.0;
        shape.integrate(1.0);
        assert!((shape.rotation - 357.0).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let field = PlayField::new(400.0, 10_000.0);
        let seed_shape = Shape::new(7, ShapeKind::Diamond, Vec2::new(30.0, -50.0)).with_speed(2.7);
        let mut a = vec![seed_shape.clone()];
        let mut b = vec![seed_shape];
        for dt in [16.67, 8.3, 33.0, 16.67, 12.0] {
            advance(&mut a, dt, &field);
            advance(&mut b, dt, &field);
            assert_eq!(a, b);
        }
    }
}
