//! Session controller
//!
//! Owns the live shapes and score state for one player and drives the
//! Idle -> Running -> Over state machine. Every entry point checks the phase,
//! so ending a run stops all spawning, motion and scoring synchronously.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::countdown::{Countdown, CountdownStatus};
use super::difficulty::DifficultyProfile;
use super::events::{EndCause, GameEvent, GameHost, RemovalReason};
use super::hit::{self, Outcome};
use super::motion;
use super::score::ScoreState;
use super::shape::{PlayField, Shape};
use super::spawner::Spawner;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Shapes falling, input live
    Running,
    /// Run ended, waiting for restart
    Over,
}

/// Serializable view of a session for HUD and debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub combo: u32,
    pub last_checkpoint: u64,
    pub best_combo: u32,
    pub timer_fraction: f32,
    pub end_cause: Option<EndCause>,
    pub shapes: Vec<Shape>,
}

/// One player's game session
#[derive(Debug, Clone)]
pub struct Session {
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    profile: DifficultyProfile,
    field: PlayField,
    /// Live shapes, in spawn order
    shapes: Vec<Shape>,
    score: ScoreState,
    countdown: Countdown,
    spawner: Spawner,
    /// Timestamp of the latest accepted tick in this run
    clock_ms: Option<f64>,
    end_cause: Option<EndCause>,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(seed: u64, profile: DifficultyProfile, field: PlayField) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            profile,
            field,
            shapes: Vec::new(),
            score: ScoreState::new(),
            countdown: Countdown::default(),
            spawner: Spawner::new(profile),
            clock_ms: None,
            end_cause: None,
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    /// Timer bar fill in [0, 1] as of the latest tick
    pub fn timer_fraction(&self) -> f32 {
        match self.clock_ms {
            Some(now) => self.countdown.remaining_fraction(now),
            None => 1.0,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            score: self.score.score,
            combo: self.score.combo,
            last_checkpoint: self.score.last_checkpoint,
            best_combo: self.score.best_combo,
            timer_fraction: self.timer_fraction(),
            end_cause: self.end_cause,
            shapes: self.shapes.clone(),
        }
    }

    // === Commands ===

    /// Start a run with `profile`. No-op while already running.
    pub fn start_session(&mut self, profile: DifficultyProfile) -> bool {
        if self.is_running() {
            return false;
        }
        self.set_profile(profile);
        self.begin_run();
        true
    }

    /// Start over after a run ended. No-op unless the run is over.
    pub fn restart_session(&mut self) -> bool {
        if self.phase != GamePhase::Over {
            return false;
        }
        self.begin_run();
        true
    }

    /// End the current run at the host's request
    pub fn end_session(&mut self) {
        if self.is_running() {
            self.finish(EndCause::Ended);
        }
    }

    /// New play-field size; live shapes are pulled back inside horizontally
    pub fn set_play_field(&mut self, field: PlayField) {
        self.field = field;
        for shape in &mut self.shapes {
            let (min_x, max_x) = field.center_range(shape.size);
            shape.pos.x = shape.pos.x.clamp(min_x, max_x);
        }
    }

    /// Swap tuning; applies to spawns and hits from now on
    pub fn set_profile(&mut self, profile: DifficultyProfile) {
        self.profile = profile;
        self.spawner.set_profile(profile);
    }

    /// Advance one frame. Call once per animation frame with a monotonic timestamp.
    pub fn on_tick(&mut self, now_ms: f64) {
        if !self.is_running() || !now_ms.is_finite() {
            return;
        }
        // Timestamps that go backwards count as zero elapsed time
        let (now_ms, dt_ms) = match self.clock_ms {
            Some(prev) => (now_ms.max(prev), (now_ms - prev).max(0.0)),
            None => (now_ms, 0.0),
        };
        self.clock_ms = Some(now_ms);

        for shape in motion::advance(&mut self.shapes, dt_ms, &self.field) {
            log::debug!("Shape {} fell off screen", shape.id);
            self.events.push(GameEvent::ShapeRemoved {
                id: shape.id,
                reason: RemovalReason::OffScreen,
            });
        }

        let plan = self.spawner.advance(motion::sanitize_dt(dt_ms));
        for _ in 0..plan.scheduled {
            self.spawn_one();
        }
        for _ in 0..plan.catchup_rolls {
            if self.spawner.roll_catchup(&mut self.rng) {
                self.spawn_one();
            }
        }

        if self.countdown.tick(now_ms) == CountdownStatus::TimedOut {
            self.finish(EndCause::TimedOut);
        }
    }

    /// Resolve a pointer-down at play-field coordinates.
    ///
    /// Returns `None` when no run is active.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> Option<Outcome> {
        if !self.is_running() {
            return None;
        }
        let pointer = Vec2::new(x, y);
        let outcome = hit::resolve(pointer, &self.shapes, self.profile.hit_radius_px);
        log::debug!("Pointer at ({x:.0}, {y:.0}) -> {:?}", outcome.shape().map(|s| s.id));
        self.apply(outcome.clone(), pointer);
        Some(outcome)
    }

    /// Apply a resolved outcome to the run.
    ///
    /// Returns false (and changes nothing) if the run is not active or the
    /// outcome's shape is no longer live.
    pub fn apply(&mut self, outcome: Outcome, pointer: Vec2) -> bool {
        if !self.is_running() {
            return false;
        }
        match outcome {
            Outcome::Hit(shape) => {
                let Some(removed) = self.take_shape(shape.id, RemovalReason::Hit) else {
                    return false;
                };
                let award = self.score.register_hit();
                match self.clock_ms {
                    Some(now) => self.countdown.reset(now),
                    None => self.countdown.disarm(),
                }

                self.events.push(GameEvent::HitScored {
                    pos: removed.pos,
                    points: award.points,
                });
                if award.combo >= 2 {
                    self.events.push(GameEvent::ComboReached {
                        pos: removed.pos,
                        combo: award.combo,
                    });
                }
                self.push_score();
                if let Some(checkpoint) = award.checkpoint {
                    log::info!("Checkpoint reached: {}", checkpoint);
                    self.events.push(GameEvent::Checkpoint(checkpoint));
                }
                true
            }
            Outcome::Miss => {
                self.score.register_miss();
                self.events.push(GameEvent::Miss { pos: pointer });
                self.push_score();
                true
            }
            Outcome::DangerHit(shape) => {
                if self.take_shape(shape.id, RemovalReason::DangerHit).is_none() {
                    return false;
                }
                self.score.break_combo();
                self.push_score();
                self.finish(EndCause::DangerHit);
                true
            }
        }
    }

    // === Events ===

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver queued events to the host in emission order
    pub fn dispatch_events<H: GameHost + ?Sized>(&mut self, host: &mut H) {
        for event in self.drain_events() {
            event.dispatch(host);
        }
    }

    // === Internals ===

    fn begin_run(&mut self) {
        for shape in self.shapes.drain(..) {
            self.events.push(GameEvent::ShapeRemoved {
                id: shape.id,
                reason: RemovalReason::Cleared,
            });
        }
        self.score = ScoreState::new();
        self.countdown.disarm();
        self.spawner.reset();
        self.clock_ms = None;
        self.end_cause = None;
        self.phase = GamePhase::Running;
        self.push_score();

        for _ in 0..self.profile.initial_shapes {
            self.spawn_one();
        }
        log::info!(
            "Session started ({}, {} initial shapes)",
            self.profile.tier.as_str(),
            self.shapes.len()
        );
    }

    fn finish(&mut self, cause: EndCause) {
        self.phase = GamePhase::Over;
        self.end_cause = Some(cause);
        log::info!("Game over ({:?}). Final score: {}", cause, self.score.score);
        self.events.push(GameEvent::GameOver {
            final_score: self.score.score,
            cause,
        });
    }

    fn spawn_one(&mut self) -> bool {
        let running = self.is_running();
        let spawned = self.spawner.try_spawn(
            self.shapes.len(),
            running,
            &self.field,
            &mut self.rng,
            self.next_id,
        );
        let Some(shape) = spawned else {
            return false;
        };
        self.next_id += 1;
        log::debug!("Spawned shape {} ({:?}, dangerous: {})", shape.id, shape.kind, shape.dangerous);
        self.events.push(GameEvent::ShapeSpawned(shape.clone()));
        self.shapes.push(shape);
        true
    }

    /// Remove a live shape exactly once
    fn take_shape(&mut self, id: u32, reason: RemovalReason) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        let shape = self.shapes.remove(index);
        self.events.push(GameEvent::ShapeRemoved { id, reason });
        Some(shape)
    }

    fn push_score(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.score.score,
            combo: self.score.combo,
        });
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::sim::difficulty::DeviceTier;
    use crate::sim::shape::ShapeKind;

    /// Profile that never spawns on its own, so tests place every shape
    fn quiet_profile() -> DifficultyProfile {
        DifficultyProfile {
            max_concurrent_shapes: 0,
            initial_shapes: 0,
            ..DifficultyProfile::default()
        }
    }

    fn running_quiet() -> Session {
        let mut session = Session::new(1, quiet_profile(), PlayField::new(800.0, 600.0));
        assert!(session.start_session(quiet_profile()));
        session.on_tick(0.0);
        session.drain_events();
        session
    }

    /// Shape that stays put
    fn still_shape(session: &mut Session, x: f32, y: f32, dangerous: bool) -> Shape {
        let id = session.next_id;
        session.next_id += 1;
        let mut shape = Shape::new(id, ShapeKind::Circle, Vec2::new(x, y));
        shape.acceleration = 0.0;
        if dangerous {
            shape = shape.into_dangerous();
        }
        session.shapes.push(shape.clone());
        shape
    }

    #[test]
    fn test_start_spawns_initial_burst() {
        let profile = DifficultyProfile::for_tier(DeviceTier::Desktop);
        let mut session = Session::new(99, profile, PlayField::new(800.0, 600.0));
        assert_eq!(session.phase(), GamePhase::Idle);

        assert!(session.start_session(profile));
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.shapes().len(), profile.initial_shapes);
        let spawned = session
            .pending_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShapeSpawned(_)))
            .count();
        assert_eq!(spawned, profile.initial_shapes);
    }

    #[test]
    fn test_idle_ignores_input() {
        let profile = DifficultyProfile::default();
        let mut session = Session::new(8, profile, PlayField::new(800.0, 600.0));

        session.on_tick(0.0);
        session.on_tick(10_000.0);
        assert_eq!(session.on_pointer_down(400.0, 300.0), None);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(session.shapes().is_empty());
        assert_eq!(session.score(), &ScoreState::new());
        assert!(session.pending_events().is_empty());
        assert_eq!(session.timer_fraction(), 1.0);
    }

    #[test]
    fn test_restart_needs_finished_run() {
        let profile = quiet_profile();
        let mut session = Session::new(8, profile, PlayField::new(800.0, 600.0));
        assert!(!session.restart_session());
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(session.pending_events().is_empty());

        assert!(session.start_session(profile));
        session.end_session();
        assert!(session.restart_session());
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut session = running_quiet();
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        assert_eq!(session.score().score, 1);

        assert!(!session.start_session(quiet_profile()));
        assert!(!session.restart_session());
        assert_eq!(session.score().score, 1);
    }

    #[test]
    fn test_three_hits_score_13() {
        let mut session = running_quiet();
        for i in 0..3 {
            let x = 100.0 + i as f32 * 200.0;
            still_shape(&mut session, x, 200.0, false);
            let outcome = session.on_pointer_down(x, 200.0);
            assert!(matches!(outcome, Some(Outcome::Hit(_))));
        }
        assert_eq!(session.score().score, 13);
        assert_eq!(session.score().combo, 3);
        assert!(session.shapes().is_empty());
    }

    #[test]
    fn test_hit_events() {
        let mut session = running_quiet();
        let first = still_shape(&mut session, 100.0, 100.0, false);
        let second = still_shape(&mut session, 400.0, 100.0, false);

        session.on_pointer_down(100.0, 100.0);
        session.on_pointer_down(400.0, 100.0);
        let events = session.drain_events();

        assert_eq!(events, vec![
            GameEvent::ShapeRemoved {
                id: first.id,
                reason: RemovalReason::Hit
            },
            GameEvent::HitScored {
                pos: first.pos,
                points: 1
            },
            GameEvent::ScoreChanged { score: 1, combo: 1 },
            GameEvent::ShapeRemoved {
                id: second.id,
                reason: RemovalReason::Hit
            },
            GameEvent::HitScored {
                pos: second.pos,
                points: 6
            },
            GameEvent::ComboReached {
                pos: second.pos,
                combo: 2
            },
            GameEvent::ScoreChanged { score: 7, combo: 2 },
        ]);
    }

    #[test]
    fn test_checkpoint_fires_once() {
        let mut session = running_quiet();
        session.score.score = 95;
        session.score.combo = 3;
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);

        assert_eq!(session.score().score, 101);
        assert_eq!(session.score().last_checkpoint, 100);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::Checkpoint(100)));

        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        assert!(!session.drain_events().iter().any(|e| matches!(e, GameEvent::Checkpoint(_))));
    }

    #[test]
    fn test_miss_resets_combo_only() {
        let mut session = running_quiet();
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        assert_eq!(session.score().combo, 2);

        let outcome = session.on_pointer_down(700.0, 500.0);
        assert_eq!(outcome, Some(Outcome::Miss));
        assert_eq!(session.score().combo, 0);
        assert_eq!(session.score().score, 7);

        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        assert_eq!(session.score().score, 8, "first hit after a miss is worth 1");
    }

    #[test]
    fn test_miss_on_empty_field() {
        let mut session = running_quiet();
        let outcome = session.on_pointer_down(10.0, 10.0);
        assert_eq!(outcome, Some(Outcome::Miss));
        assert_eq!(session.score().score, 0);
        let events = session.drain_events();
        assert_eq!(events[0], GameEvent::Miss {
            pos: Vec2::new(10.0, 10.0)
        });
    }

    #[test]
    fn test_removed_shape_cannot_be_hit_again() {
        let mut session = running_quiet();
        let shape = still_shape(&mut session, 100.0, 100.0, false);

        assert!(session.apply(Outcome::Hit(shape.clone()), shape.pos));
        assert!(!session.apply(Outcome::Hit(shape.clone()), shape.pos));
        assert_eq!(session.score().score, 1);
        assert_eq!(session.score().combo, 1);
    }

    #[test]
    fn test_danger_hit_ends_run_and_freezes() {
        let mut session = running_quiet();
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        let safe = still_shape(&mut session, 500.0, 100.0, false);
        still_shape(&mut session, 300.0, 300.0, true);

        let outcome = session.on_pointer_down(300.0, 300.0);
        assert!(matches!(outcome, Some(Outcome::DangerHit(_))));
        assert_eq!(session.phase(), GamePhase::Over);
        assert_eq!(session.end_cause(), Some(EndCause::DangerHit));
        assert_eq!(session.score().combo, 0);
        assert_eq!(session.score().score, 1);
        assert!(session.drain_events().contains(&GameEvent::GameOver {
            final_score: 1,
            cause: EndCause::DangerHit
        }));

        // Frozen until restart
        let before = session.shapes().to_vec();
        session.on_tick(1000.0);
        assert_eq!(session.shapes(), &before[..]);
        assert_eq!(session.on_pointer_down(safe.pos.x, safe.pos.y), None);
        assert_eq!(session.score().score, 1);
        assert!(session.pending_events().is_empty());

        assert!(session.restart_session());
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.score().score, 0);
        assert!(session.shapes().is_empty());
        assert_eq!(session.end_cause(), None);
    }

    #[test]
    fn test_times_out_without_hits() {
        let mut session = running_quiet();
        session.on_tick(4999.0);
        assert!(session.is_running());
        session.on_tick(5000.0);
        assert_eq!(session.phase(), GamePhase::Over);
        assert_eq!(session.end_cause(), Some(EndCause::TimedOut));
        let game_overs = session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        session.on_tick(6000.0);
        assert!(session.pending_events().is_empty());
    }

    #[test]
    fn test_hit_refills_timer() {
        let mut session = running_quiet();
        session.on_tick(4000.0);
        assert!((session.timer_fraction() - 0.2).abs() < 1e-6);

        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        assert_eq!(session.timer_fraction(), 1.0);

        session.on_tick(8500.0);
        assert!(session.is_running());
        session.on_tick(9000.0);
        assert_eq!(session.end_cause(), Some(EndCause::TimedOut));
    }

    #[test]
    fn test_end_session() {
        let mut session = running_quiet();
        session.end_session();
        assert_eq!(session.end_cause(), Some(EndCause::Ended));
        session.end_session();
        let game_overs = session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_offscreen_retire_keeps_combo() {
        let mut session = running_quiet();
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        let faller = still_shape(&mut session, 200.0, 649.0, false);
        session.shapes.last_mut().unwrap().speed = 5.0;

        session.on_tick(16.67);
        assert!(session.shapes().is_empty());
        assert_eq!(session.score().combo, 1);
        assert!(session.drain_events().contains(&GameEvent::ShapeRemoved {
            id: faller.id,
            reason: RemovalReason::OffScreen
        }));
    }

    #[test]
    fn test_restart_clears_shapes_with_events() {
        let mut session = running_quiet();
        let a = still_shape(&mut session, 100.0, 100.0, false);
        session.end_session();
        session.drain_events();

        session.restart_session();
        assert!(session.drain_events().contains(&GameEvent::ShapeRemoved {
            id: a.id,
            reason: RemovalReason::Cleared
        }));
    }

    #[test]
    fn test_spawns_bounded_by_cap() {
        let profile = DifficultyProfile::for_tier(DeviceTier::LowEnd);
        let mut session = Session::new(5, profile, PlayField::new(400.0, 100_000.0));
        session.start_session(profile);

        let mut now = 0.0;
        while now < 4900.0 {
            session.on_tick(now);
            assert!(session.shapes().len() <= profile.max_concurrent_shapes);
            now += 16.67;
        }
        assert_eq!(session.shapes().len(), profile.max_concurrent_shapes);
    }

    #[test]
    fn test_interval_spawns_on_cadence() {
        let profile = DifficultyProfile {
            initial_shapes: 0,
            catchup_probability: 0.0,
            ..DifficultyProfile::default()
        };
        let mut session = Session::new(5, profile, PlayField::new(400.0, 100_000.0));
        session.start_session(profile);
        session.on_tick(0.0);
        for step in 1..=50 {
            session.on_tick(step as f64 * 16.0);
        }
        // 800 ms elapsed, one interval
        assert_eq!(session.shapes().len(), 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let profile = DifficultyProfile::default();
        let field = PlayField::new(640.0, 480.0);
        let mut a = Session::new(1234, profile, field);
        let mut b = Session::new(1234, profile, field);
        a.start_session(profile);
        b.start_session(profile);
        for step in 0..200 {
            let now = step as f64 * 16.67;
            a.on_tick(now);
            b.on_tick(now);
        }
        assert_eq!(a.shapes(), b.shapes());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_resize_clamps_shapes() {
        let mut session = running_quiet();
        still_shape(&mut session, 700.0, 100.0, false);
        session.set_play_field(PlayField::new(300.0, 600.0));
        assert_eq!(session.shapes()[0].pos.x, 275.0);
    }

    #[test]
    fn test_bad_timestamps_are_ignored() {
        let mut session = running_quiet();
        let shape = still_shape(&mut session, 100.0, 100.0, false);
        session.shapes.last_mut().unwrap().speed = 2.0;
        session.on_tick(f64::NAN);
        session.on_tick(-500.0);
        assert!(session.is_running());
        assert_eq!(session.shapes()[0].pos, shape.pos);

        // Clock did not rewind, so the window still closes at 5000
        session.on_tick(5000.0);
        assert_eq!(session.end_cause(), Some(EndCause::TimedOut));
    }

    #[test]
    fn test_dispatch_to_host() {
        #[derive(Default)]
        struct Hud {
            score: u64,
            combo: u32,
            misses: u32,
        }
        impl GameHost for Hud {
            fn on_score_changed(&mut self, score: u64, combo: u32) {
                self.score = score;
                self.combo = combo;
            }
            fn on_miss(&mut self, _pos: Vec2) {
                self.misses += 1;
            }
        }

        let mut session = running_quiet();
        still_shape(&mut session, 100.0, 100.0, false);
        session.on_pointer_down(100.0, 100.0);
        session.on_pointer_down(600.0, 500.0);
        let mut hud = Hud::default();
        session.dispatch_events(&mut hud);
        assert_eq!((hud.score, hud.combo, hud.misses), (1, 0, 1));
        assert!(session.pending_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = running_quiet();
        still_shape(&mut session, 100.0, 100.0, false);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"shapes\""));
    }

    proptest! {
        #[test]
        fn prop_outcome_sequences(clicks in proptest::collection::vec(any::<bool>(), 1..120)) {
            let mut session = running_quiet();
            for on_target in clicks {
                let before = session.score().clone();
                if on_target {
                    still_shape(&mut session, 400.0, 300.0, false);
                    session.on_pointer_down(400.0, 300.0);
                    let delta = session.score().score - before.score;
                    prop_assert!(delta == 1 || delta == 6);
                    prop_assert_eq!(session.score().combo, before.combo + 1);
                } else {
                    session.on_pointer_down(10.0, 590.0);
                    prop_assert_eq!(session.score().score, before.score);
                    prop_assert_eq!(session.score().combo, 0);
                }
                prop_assert!(session.shapes().is_empty());
            }
            let checkpoints: Vec<u64> = session
                .drain_events()
                .into_iter()
                .filter_map(|e| match e {
                    GameEvent::Checkpoint(v) => Some(v),
                    _ => None,
                })
                .collect();
            let mut deduped = checkpoints.clone();
            deduped.dedup();
            prop_assert_eq!(checkpoints.len(), deduped.len());
            prop_assert!(checkpoints.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
