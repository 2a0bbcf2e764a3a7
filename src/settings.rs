//! Game settings and preferences
//!
//! Persisted separately from high scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage, StorageError};
use crate::sim::{DeviceTier, DifficultyProfile};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Force a device tier instead of auto-detecting
    pub tier_override: Option<DeviceTier>,

    // === Visual Effects ===
    /// Screen shake on hits and checkpoints
    pub screen_shake: bool,
    /// Hit bursts and combo popups
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tier_override: None,

            screen_shake: true,
            particles: true,

            master_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "shape_frenzy_settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective volume for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Difficulty for the detected tier, unless the player pinned one
    pub fn profile_for(&self, detected: DeviceTier) -> DifficultyProfile {
        DifficultyProfile::for_tier(self.tier_override.unwrap_or(detected))
    }

    /// Load settings, falling back to defaults on missing or bad data
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Discarding stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
