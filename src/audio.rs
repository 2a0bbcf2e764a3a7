//! Procedural sound effects using the Web Audio API

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Safe shape hit; pitch climbs with combo
    Hit { combo: u32 },
    /// Tap on empty space
    Miss,
    /// Score crossed a multiple of 100
    Checkpoint,
    /// Dangerous shape hit
    DangerHit,
    /// Countdown ran out or run ended
    GameOver,
    /// Run made the leaderboard
    HighScore,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.7 }
    }

    /// Effective volume (0.0 - 1.0), usually `Settings::effective_volume`
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Hit { combo } => self.play_hit(ctx, vol, combo),
            SoundEffect::Miss => self.play_miss(ctx, vol),
            SoundEffect::Checkpoint => self.play_checkpoint(ctx, vol),
            SoundEffect::DangerHit => self.play_danger(ctx, vol),
            SoundEffect::GameOver => {
                self.play_sequence(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], 0.2, OscillatorType::Sine)
            }
            SoundEffect::HighScore => self.play_sequence(
                ctx,
                vol * 0.25,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.08,
                OscillatorType::Triangle,
            ),
        }
    }

    /// Create an oscillator wired through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short pop, a semitone higher per combo step (capped at two octaves)
    fn play_hit(&self, ctx: &AudioContext, vol: f32, combo: u32) {
        let step = combo.min(24) as f32;
        let freq = 440.0 * 2f32.powf(step / 12.0);
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(freq * 1.5, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Dull thud
    fn play_miss(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Boom with a rising chime on top
    fn play_checkpoint(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        self.play_sequence(ctx, vol * 0.2, &[800.0, 1000.0, 1200.0], 0.06, OscillatorType::Sine);
    }

    /// Harsh buzz
    fn play_danger(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency().set_value_at_time(90.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(140.0, t + 0.2).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.55).ok();
    }

    /// Notes played one after another
    fn play_sequence(
        &self,
        ctx: &AudioContext,
        peak: f32,
        freqs: &[f32],
        spacing: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * spacing;
            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + spacing * 1.5 + 0.1)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + spacing * 1.5 + 0.15).ok();
        }
    }
}
