//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Motion scaled by frame delta, never fixed per-frame steps
//! - Seeded RNG only (spawning is the only random consumer)
//! - Live shapes kept in spawn order

pub mod autoplay;
pub mod countdown;
pub mod difficulty;
pub mod events;
pub mod hit;
pub mod motion;
pub mod score;
pub mod session;
pub mod shape;
pub mod spawner;

pub use countdown::{Countdown, CountdownStatus};
pub use difficulty::{DeviceTier, DifficultyProfile};
pub use events::{EndCause, GameEvent, GameHost, RemovalReason};
pub use hit::{Outcome, resolve};
pub use motion::advance;
pub use score::{HitAward, ScoreState};
pub use session::{GamePhase, Session, SessionSnapshot};
pub use shape::{PlayField, Shape, ShapeKind};
pub use spawner::{SpawnPlan, Spawner};
