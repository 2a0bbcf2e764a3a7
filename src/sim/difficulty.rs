//! Difficulty profiles per device tier
//!
//! All device-dependent tuning is collapsed into one value object; nothing
//! downstream branches on the device again.

use serde::{Deserialize, Serialize};

/// Coarse device classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceTier {
    #[default]
    Desktop,
    Mobile,
    LowEnd,
}

impl DeviceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceTier::Desktop => "Desktop",
            DeviceTier::Mobile => "Mobile",
            DeviceTier::LowEnd => "Low-end",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(DeviceTier::Desktop),
            "mobile" => Some(DeviceTier::Mobile),
            "low-end" | "lowend" | "low" => Some(DeviceTier::LowEnd),
            _ => None,
        }
    }
}

/// Spawn and hit tuning for a device tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub tier: DeviceTier,
    /// Interval between scheduled spawns
    pub spawn_interval_ms: f32,
    /// Cap on live shapes
    pub max_concurrent_shapes: usize,
    /// Chance a spawned shape is dangerous
    pub danger_probability: f64,
    /// Pointer distance (px) within which a shape counts as hit
    pub hit_radius_px: f32,
    /// Chance of an extra spawn per catch-up sample
    pub catchup_probability: f64,
    /// Shapes spawned immediately on session start
    pub initial_shapes: usize,
}

impl DifficultyProfile {
    pub fn for_tier(tier: DeviceTier) -> Self {
        match tier {
            DeviceTier::Desktop => Self {
                tier,
                spawn_interval_ms: 800.0,
                max_concurrent_shapes: 12,
                danger_probability: 0.2,
                hit_radius_px: 70.0,
                catchup_probability: 0.05,
                initial_shapes: 5,
            },
            DeviceTier::Mobile => Self {
                tier,
                spawn_interval_ms: 1200.0,
                max_concurrent_shapes: 5,
                danger_probability: 0.2,
                hit_radius_px: 80.0,
                catchup_probability: 0.08,
                initial_shapes: 4,
            },
            DeviceTier::LowEnd => Self {
                tier,
                spawn_interval_ms: 1500.0,
                max_concurrent_shapes: 3,
                danger_probability: 0.2,
                hit_radius_px: 80.0,
                catchup_probability: 0.08,
                initial_shapes: 3,
            },
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_tier(DeviceTier::Desktop)
    }
}
