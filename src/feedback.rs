//! Effect parameters for the host
//!
//! The core only says "hit at (x, y) with combo n"; these helpers turn that into
//! the knobs the effect layer needs. Nothing here touches game state.

/// Screen shake for a checkpoint celebration
pub const CHECKPOINT_SHAKE: f32 = 40.0;
/// Shake ceiling for ordinary hits
pub const MAX_HIT_SHAKE: f32 = 30.0;

/// Combo popup color tiers
pub fn combo_color(combo: u32) -> &'static str {
    if combo >= 10 {
        "#FF5722"
    } else if combo >= 5 {
        "#FFEB3B"
    } else {
        "#4CAF50"
    }
}

/// Shake intensity for a hit, growing with combo
pub fn hit_shake(combo: u32) -> f32 {
    (8.0 + combo as f32 * 1.2).min(MAX_HIT_SHAKE)
}

/// Lightning accent on long combos
pub fn lightning(combo: u32) -> bool {
    combo > 5
}

/// Popup label for a combo
pub fn combo_label(combo: u32) -> String {
    format!("{combo}x COMBO!")
}

/// Timer bar width as a CSS percentage
pub fn timer_bar_percent(fraction: f32) -> f32 {
    if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
