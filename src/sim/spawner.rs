//! Shape spawning and spawn cadence

use glam::Vec2;
use rand::Rng;

use super::difficulty::DifficultyProfile;
use super::shape::{DANGER_COLOR, PALETTE, PlayField, Shape, ShapeKind};
use crate::consts::*;

/// Spawn work due after advancing the cadence clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    /// Interval-driven spawns
    pub scheduled: u32,
    /// Catch-up rolls, each spawning with the profile's catch-up probability
    pub catchup_rolls: u32,
}

/// Spawn cadence and shape factory for one session
#[derive(Debug, Clone)]
pub struct Spawner {
    profile: DifficultyProfile,
    interval_accum_ms: f32,
    catchup_accum_ms: f32,
}

impl Spawner {
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            profile,
            interval_accum_ms: 0.0,
            catchup_accum_ms: 0.0,
        }
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Swap tuning (viewport resize); cadence progress is kept
    pub fn set_profile(&mut self, profile: DifficultyProfile) {
        self.profile = profile;
    }

    /// Drop accumulated cadence (new run)
    pub fn reset(&mut self) {
        self.interval_accum_ms = 0.0;
        self.catchup_accum_ms = 0.0;
    }

    /// Accumulate elapsed time and report what is due
    pub fn advance(&mut self, dt_ms: f32) -> SpawnPlan {
        let mut plan = SpawnPlan::default();
        if dt_ms.is_nan() || dt_ms <= 0.0 {
            return plan;
        }

        let interval = self.profile.spawn_interval_ms;
        if interval > 0.0 {
            self.interval_accum_ms += dt_ms;
            while self.interval_accum_ms >= interval {
                self.interval_accum_ms -= interval;
                plan.scheduled += 1;
            }
        }

        self.catchup_accum_ms += dt_ms;
        while self.catchup_accum_ms >= CATCHUP_SAMPLE_MS {
            self.catchup_accum_ms -= CATCHUP_SAMPLE_MS;
            plan.catchup_rolls += 1;
        }
        plan
    }

    /// Roll one catch-up spawn chance
    pub fn roll_catchup(&self, rng: &mut impl Rng) -> bool {
        rng.random_bool(self.profile.catchup_probability.clamp(0.0, 1.0))
    }

    /// Create a shape unless the session is stopped or the cap is reached
    pub fn try_spawn(
        &self,
        live_count: usize,
        running: bool,
        field: &PlayField,
        rng: &mut impl Rng,
        id: u32,
    ) -> Option<Shape> {
        if !running || live_count >= self.profile.max_concurrent_shapes {
            return None;
        }
        Some(self.create_shape(field, rng, id))
    }

    fn create_shape(&self, field: &PlayField, rng: &mut impl Rng, id: u32) -> Shape {
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
        let (min_x, max_x) = field.center_range(SHAPE_SIZE);
        let x = rng.random_range(min_x..=max_x);
        let speed = rng.random_range(MIN_FALL_SPEED..MAX_FALL_SPEED);
        let rotation = rng.random_range(0.0..360.0);
        let rotation_speed = rng.random_range(-MAX_ROTATION_SPEED..MAX_ROTATION_SPEED);
        let dangerous = rng.random_bool(self.profile.danger_probability.clamp(0.0, 1.0));
        let color = if dangerous {
            DANGER_COLOR
        } else {
            PALETTE[rng.random_range(0..PALETTE.len())]
        };

        Shape {
            id,
            kind,
            pos: Vec2::new(x, SPAWN_Y),
            speed,
            acceleration: SHAPE_ACCELERATION,
            rotation,
            rotation_speed,
            size: SHAPE_SIZE,
            dangerous,
            color: color.to_string(),
        }
    }
}
