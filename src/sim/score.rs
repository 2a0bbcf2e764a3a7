//! Score, combo and checkpoint bookkeeping

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Points for the next hit given the combo before it
#[inline]
pub fn points_for_hit(combo: u32) -> u64 {
    if combo >= 1 { COMBO_POINTS } else { BASE_POINTS }
}

/// Largest checkpoint multiple at or below `score`
#[inline]
pub fn checkpoint_for(score: u64) -> u64 {
    (score / CHECKPOINT_STEP) * CHECKPOINT_STEP
}

/// What a single hit earned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitAward {
    pub points: u64,
    /// Combo after this hit
    pub combo: u32,
    /// Newly crossed checkpoint, if any
    pub checkpoint: Option<u64>,
}

/// Score state for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    /// Largest checkpoint already celebrated this run
    pub last_checkpoint: u64,
    /// Run statistics
    pub best_combo: u32,
    pub hits: u32,
    pub misses: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_hit(&mut self) -> HitAward {
        let points = points_for_hit(self.combo);
        self.score = self.score.saturating_add(points);
        self.combo = self.combo.saturating_add(1);
        self.best_combo = self.best_combo.max(self.combo);
        self.hits = self.hits.saturating_add(1);

        let current = checkpoint_for(self.score);
        let checkpoint = if current > self.last_checkpoint && current > 0 {
            self.last_checkpoint = current;
            Some(current)
        } else {
            None
        };

        HitAward {
            points,
            combo: self.combo,
            checkpoint,
        }
    }

    pub fn register_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
        self.break_combo();
    }

    pub fn break_combo(&mut self) {
        self.combo = 0;
    }
}
