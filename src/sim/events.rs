//! Outward game events and the host callback trait
//!
//! The session queues events while it mutates state; the host drains them after
//! each call and turns them into rendering, audio and HUD updates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Why a shape left the live collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Resolved as a hit
    Hit,
    /// Resolved as a danger hit (ends the run)
    DangerHit,
    /// Fell past the bottom of the play-field
    OffScreen,
    /// Swept when a new run started
    Cleared,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Countdown ran out
    TimedOut,
    /// Player hit a dangerous shape
    DangerHit,
    /// Host ended the session
    Ended,
}

/// Events emitted by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShapeSpawned(Shape),
    ShapeRemoved { id: u32, reason: RemovalReason },
    ScoreChanged { score: u64, combo: u32 },
    /// Hit burst request at the shape position
    HitScored { pos: Vec2, points: u64 },
    /// Combo popup request (combo >= 2)
    ComboReached { pos: Vec2, combo: u32 },
    Checkpoint(u64),
    Miss { pos: Vec2 },
    GameOver { final_score: u64, cause: EndCause },
}

/// Callbacks a host implements to react to game events
#[allow(unused_variables)]
pub trait GameHost {
    fn on_shape_spawned(&mut self, shape: &Shape) {}
    fn on_shape_removed(&mut self, id: u32, reason: RemovalReason) {}
    fn on_score_changed(&mut self, score: u64, combo: u32) {}
    fn on_hit_scored(&mut self, pos: Vec2, points: u64) {}
    fn on_combo(&mut self, pos: Vec2, combo: u32) {}
    fn on_checkpoint(&mut self, value: u64) {}
    fn on_miss(&mut self, pos: Vec2) {}
    fn on_game_over(&mut self, final_score: u64, cause: EndCause) {}
}

impl GameEvent {
    /// Route this event to the matching host callback
    pub fn dispatch<H: GameHost + ?Sized>(&self, host: &mut H) {
        match self {
            GameEvent::ShapeSpawned(shape) => host.on_shape_spawned(shape),
            GameEvent::ShapeRemoved { id, reason } => host.on_shape_removed(*id, *reason),
            GameEvent::ScoreChanged { score, combo } => host.on_score_changed(*score, *combo),
            GameEvent::HitScored { pos, points } => host.on_hit_scored(*pos, *points),
            GameEvent::ComboReached { pos, combo } => host.on_combo(*pos, *combo),
            GameEvent::Checkpoint(value) => host.on_checkpoint(*value),
            GameEvent::Miss { pos } => host.on_miss(*pos),
            GameEvent::GameOver { final_score, cause } => host.on_game_over(*final_score, *cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        checkpoint: Option<u64>,
    }

    impl GameHost for Recorder {
        fn on_shape_removed(&mut self, _id: u32, _reason: RemovalReason) {
            self.calls.push("removed");
        }
        fn on_checkpoint(&mut self, value: u64) {
            self.calls.push("checkpoint");
            self.checkpoint = Some(value);
        }
        fn on_game_over(&mut self, _final_score: u64, _cause: EndCause) {
            self.calls.push("game_over");
        }
    }

    #[test]
    fn test_dispatch_routes_and_defaults_are_silent() {
        let events = [
            GameEvent::ShapeRemoved {
                id: 3,
                reason: RemovalReason::OffScreen,
            },
            GameEvent::Miss { pos: Vec2::ZERO },
            GameEvent::Checkpoint(200),
            GameEvent::GameOver {
                final_score: 204,
                cause: EndCause::TimedOut,
            },
        ];
        let mut host = Recorder::default();
        for event in &events {
            event.dispatch(&mut host);
        }
        assert_eq!(host.calls, vec!["removed", "checkpoint", "game_over"]);
        assert_eq!(host.checkpoint, Some(200));
    }
}
