//! Time-since-last-hit countdown

use serde::{Deserialize, Serialize};

use crate::consts::HIT_COUNTDOWN_MS;

/// Countdown state after a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownStatus {
    /// Fraction of the window left, 1.0 = just hit
    Running { remaining: f32 },
    TimedOut,
}

/// Countdown measured from the last successful hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    duration_ms: f64,
    /// None until the first sample of a run
    last_hit_ms: Option<f64>,
    /// Fraction reported by the most recent valid sample
    last_remaining: f32,
}

impl Countdown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            last_hit_ms: None,
            last_remaining: 1.0,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Restart the window at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        if now_ms.is_finite() {
            self.last_hit_ms = Some(now_ms);
            self.last_remaining = 1.0;
        }
    }

    /// Forget the anchor; the next tick re-arms at its own timestamp
    pub fn disarm(&mut self) {
        self.last_hit_ms = None;
        self.last_remaining = 1.0;
    }

    pub fn is_armed(&self) -> bool {
        self.last_hit_ms.is_some()
    }

    /// Remaining fraction in [0, 1]
    pub fn remaining_fraction(&self, now_ms: f64) -> f32 {
        let Some(last) = self.last_hit_ms else {
            return 1.0;
        };
        if self.duration_ms <= 0.0 {
            return 0.0;
        }
        if !now_ms.is_finite() {
            return self.last_remaining;
        }
        let elapsed = (now_ms - last).max(0.0);
        (1.0 - elapsed / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Sample the countdown, arming it first if needed
    pub fn tick(&mut self, now_ms: f64) -> CountdownStatus {
        if !self.is_armed() {
            self.reset(now_ms);
        }
        let (Some(last), true) = (self.last_hit_ms, now_ms.is_finite()) else {
            return CountdownStatus::Running {
                remaining: self.last_remaining,
            };
        };
        if now_ms - last >= self.duration_ms {
            self.last_remaining = 0.0;
            CountdownStatus::TimedOut
        } else {
            self.last_remaining = self.remaining_fraction(now_ms);
            CountdownStatus::Running {
                remaining: self.last_remaining,
            }
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(HIT_COUNTDOWN_MS)
    }
}
