//! Shape Frenzy - a falling-shapes reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game core (spawning, motion, hit resolution, scoring, session)
//! - `feedback`: Effect parameters derived from game events (shake, combo colors)
//! - `platform`: Device tier detection and browser probing
//! - `persistence`: Key/value storage with JSON helpers
//! - `settings` / `highscores`: Persisted player data

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration (60 Hz); motion deltas are scaled by dt / this
    pub const FRAME_BASELINE_MS: f32 = 16.67;
    /// Longest single simulation step (guards against tab-resume jumps)
    pub const MAX_STEP_MS: f32 = 100.0;

    /// Shape defaults
    pub const SHAPE_SIZE: f32 = 50.0;
    /// Spawn height, just above the visible play-field
    pub const SPAWN_Y: f32 = -50.0;
    /// Shapes are retired once they fall this far below the play-field
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
    /// Gravity, px per baseline frame squared
    pub const SHAPE_ACCELERATION: f32 = 0.1;
    /// Initial fall speed range, px per baseline frame
    pub const MIN_FALL_SPEED: f32 = 1.5;
    pub const MAX_FALL_SPEED: f32 = 3.5;
    /// Rotation speed magnitude, degrees per baseline frame
    pub const MAX_ROTATION_SPEED: f32 = 5.0;

    /// Time allowed between successful hits
    pub const HIT_COUNTDOWN_MS: f64 = 5000.0;
    /// Cadence of catch-up spawn rolls
    pub const CATCHUP_SAMPLE_MS: f32 = 100.0;

    /// Scoring
    pub const BASE_POINTS: u64 = 1;
    pub const COMBO_POINTS: u64 = 6;
    pub const CHECKPOINT_STEP: u64 = 100;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
