//! Shape Frenzy entry point
//!
//! In the browser this is the host: it feeds animation frames and pointer
//! events into the session and turns session events into canvas, DOM and
//! audio output. Natively it runs a headless autoplay demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    use shape_frenzy::audio::{AudioManager, SoundEffect};
    use shape_frenzy::feedback;
    use shape_frenzy::persistence::LocalStorage;
    use shape_frenzy::platform;
    use shape_frenzy::sim::autoplay;
    use shape_frenzy::sim::{EndCause, GameHost, PlayField, Session, Shape, ShapeKind};
    use shape_frenzy::highscores::RunEndLatch;
    use shape_frenzy::{HighScores, Settings};

    /// Seconds a floating label stays up
    const POPUP_LIFE: f32 = 1.0;
    /// Idle-mode tap cadence
    const IDLE_TAP_MS: f64 = 250.0;

    /// Floating text over the play-field
    struct Popup {
        pos: Vec2,
        text: String,
        color: &'static str,
        size: u32,
        life: f32,
    }

    /// Reacts to session events: DOM HUD, popups, shake and sound
    struct Effects {
        document: Document,
        settings: Settings,
        high_scores: HighScores,
        storage: Option<LocalStorage>,
        audio: AudioManager,
        popups: Vec<Popup>,
        shake: f32,
        /// Lightning flash strength, fades each frame
        flash: f32,
        /// Combo as of the last score update
        combo: u32,
        run_end: RunEndLatch,
        field: PlayField,
    }

    impl Effects {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_display(&self, id: &str, display: &str) {
            if let Some(el) = self
                .document
                .get_element_by_id(id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("display", display);
            }
        }

        fn set_timer_bar(&self, fraction: f32) {
            if let Some(el) = self
                .document
                .get_element_by_id("timer-bar")
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            {
                let width = format!("{}%", feedback::timer_bar_percent(fraction));
                let _ = el.style().set_property("width", &width);
            }
        }

        fn popup(&mut self, pos: Vec2, text: String, color: &'static str, size: u32) {
            if self.settings.particles {
                self.popups.push(Popup {
                    pos,
                    text,
                    color,
                    size,
                    life: POPUP_LIFE,
                });
            }
        }

        fn add_shake(&mut self, intensity: f32) {
            if self.settings.effective_screen_shake() {
                self.shake = self.shake.max(intensity);
            }
        }
    }

    impl GameHost for Effects {
        fn on_score_changed(&mut self, score: u64, combo: u32) {
            self.set_text("score", &score.to_string());
            self.set_text("combo-counter", &combo.to_string());
            self.combo = combo;
        }

        fn on_hit_scored(&mut self, pos: Vec2, points: u64) {
            self.popup(pos, format!("+{points}"), "#ffffff", 20);
            // Score update follows, so the combo here is one behind
            self.audio.play(SoundEffect::Hit {
                combo: self.combo + 1,
            });
        }

        fn on_combo(&mut self, pos: Vec2, combo: u32) {
            self.popup(
                pos - Vec2::new(0.0, 30.0),
                feedback::combo_label(combo),
                feedback::combo_color(combo),
                24,
            );
            self.add_shake(feedback::hit_shake(combo));
            if feedback::lightning(combo) && !self.settings.reduced_motion {
                self.flash = 1.0;
            }
        }

        fn on_checkpoint(&mut self, value: u64) {
            let center = Vec2::new(self.field.width / 2.0, self.field.height / 2.0);
            self.popup(center, value.to_string(), "#FFEB3B", 64);
            self.add_shake(feedback::CHECKPOINT_SHAKE);
            self.audio.play(SoundEffect::Checkpoint);
        }

        fn on_miss(&mut self, pos: Vec2) {
            self.popup(pos, "MISS".to_string(), "#ff6b6b", 18);
            self.audio.play(SoundEffect::Miss);
        }

        fn on_game_over(&mut self, final_score: u64, cause: EndCause) {
            self.run_end.on_game_over(final_score, cause);
            self.set_text("final-score", &final_score.to_string());
            self.set_display("game-over", "block");
            self.set_display("restart-btn", "inline-block");
            self.set_timer_bar(0.0);
            self.audio.play(match cause {
                EndCause::DangerHit => SoundEffect::DangerHit,
                EndCause::TimedOut | EndCause::Ended => SoundEffect::GameOver,
            });
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        effects: Effects,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Last pointer position, for Space-to-hit
        pointer: Vec2,
        idle_mode: bool,
        last_idle_tap: f64,
        last_frame: f64,
    }

    impl Game {
        /// Match the canvas backing store to its CSS size and re-derive difficulty
        fn resize(&mut self) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let w = self.canvas.client_width() as f64;
            let h = self.canvas.client_height() as f64;
            self.canvas.set_width((w * dpr) as u32);
            self.canvas.set_height((h * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

            let field = PlayField::new(w as f32, h as f32);
            self.session.set_play_field(field);
            self.effects.field = field;

            let tier = platform::classify(&platform::probe_device());
            self.session.set_profile(self.effects.settings.profile_for(tier));
            log::info!("Play-field {}x{} ({})", w, h, tier.as_str());
        }

        fn start(&mut self) {
            let profile = *self.session.profile();
            if self.session.start_session(profile) {
                self.effects.set_display("start-btn", "none");
                self.effects.set_display("restart-btn", "none");
                self.effects.set_display("game-over", "none");
                self.effects.set_timer_bar(1.0);
            }
        }

        fn restart(&mut self) {
            if self.session.restart_session() {
                self.effects.set_display("restart-btn", "none");
                self.effects.set_display("game-over", "none");
                self.effects.set_timer_bar(1.0);
                log::info!("Game restarted");
            }
        }

        fn toggle_mute(&mut self) {
            let effects = &mut self.effects;
            effects.settings.muted = !effects.settings.muted;
            effects.audio.set_volume(effects.settings.effective_volume());
            if let Some(storage) = effects.storage.as_mut() {
                if let Err(e) = effects.settings.save(storage) {
                    log::warn!("Could not save settings: {e}");
                }
            }
            log::info!("Muted: {}", effects.settings.muted);
        }

        fn pointer_down(&mut self, x: f32, y: f32) {
            self.pointer = Vec2::new(x, y);
            self.session.on_pointer_down(x, y);
            self.flush_events();
        }

        fn flush_events(&mut self) {
            self.session.dispatch_events(&mut self.effects);
            if self.effects.run_end.take().is_some() {
                self.record_score();
            }
        }

        fn record_score(&mut self) {
            let score = self.session.score();
            let rank = self
                .effects
                .high_scores
                .add_score(score.score, score.best_combo, js_sys::Date::now());
            if let Some(rank) = rank {
                log::info!("New high score #{}: {}", rank, score.score);
                if rank == 1 {
                    self.effects.audio.play(SoundEffect::HighScore);
                }
                if let Some(storage) = self.effects.storage.as_mut() {
                    if let Err(e) = self.effects.high_scores.save(storage) {
                        log::warn!("Could not save high scores: {e}");
                    }
                }
            }
            if let Some(best) = self.effects.high_scores.top_score() {
                self.effects.set_text("best-score", &best.to_string());
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_frame > 0.0 {
                ((time - self.last_frame) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_frame = time;

            if self.idle_mode && self.session.is_running() && time - self.last_idle_tap >= IDLE_TAP_MS {
                self.last_idle_tap = time;
                let radius = self.session.profile().hit_radius_px;
                if let Some(target) =
                    autoplay::pick_target(self.session.shapes(), self.session.field(), radius)
                {
                    self.session.on_pointer_down(target.x, target.y);
                }
            }

            let was_running = self.session.is_running();
            self.session.on_tick(time);
            self.flush_events();
            if was_running && self.session.is_running() {
                self.effects.set_timer_bar(self.session.timer_fraction());
            }

            for popup in &mut self.effects.popups {
                popup.life -= dt;
                popup.pos.y -= 40.0 * dt;
            }
            self.effects.popups.retain(|p| p.life > 0.0);
            self.effects.shake *= 0.9;
            if self.effects.shake < 0.5 {
                self.effects.shake = 0.0;
            }
            self.effects.flash = (self.effects.flash - dt * 4.0).max(0.0);

            self.render();
        }

        fn render(&self) {
            let field = self.session.field();
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, field.width as f64, field.height as f64);

            ctx.save();
            let shake = self.effects.shake as f64;
            if shake > 0.0 {
                let dx = (js_sys::Math::random() - 0.5) * shake;
                let dy = (js_sys::Math::random() - 0.5) * shake;
                let _ = ctx.translate(dx, dy);
            }

            for shape in self.session.shapes() {
                draw_shape(ctx, shape);
            }

            ctx.set_text_align("center");
            for popup in &self.effects.popups {
                ctx.set_global_alpha((popup.life / POPUP_LIFE).clamp(0.0, 1.0) as f64);
                ctx.set_fill_style_str(popup.color);
                ctx.set_font(&format!("bold {}px sans-serif", popup.size));
                let _ = ctx.fill_text(&popup.text, popup.pos.x as f64, popup.pos.y as f64);
            }
            ctx.set_global_alpha(1.0);
            ctx.restore();

            if self.effects.flash > 0.0 {
                ctx.set_global_alpha((self.effects.flash * 0.3) as f64);
                ctx.set_fill_style_str("#ffffff");
                ctx.fill_rect(0.0, 0.0, field.width as f64, field.height as f64);
                ctx.set_global_alpha(1.0);
            }
        }
    }

    /// Outline one shape, rotated about its center
    fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) {
        let half = shape.size as f64 / 2.0;
        ctx.save();
        let _ = ctx.translate(shape.pos.x as f64, shape.pos.y as f64);
        let _ = ctx.rotate((shape.rotation as f64).to_radians());
        ctx.set_stroke_style_str(&shape.color);
        ctx.set_line_width(3.0);
        ctx.set_shadow_blur(10.0);
        ctx.set_shadow_color(if shape.dangerous {
            "rgba(255, 0, 0, 0.7)"
        } else {
            shape.color.as_str()
        });

        ctx.begin_path();
        match shape.kind {
            ShapeKind::Circle => {
                let _ = ctx.arc(0.0, 0.0, half, 0.0, std::f64::consts::TAU);
            }
            ShapeKind::Rectangle => ctx.rect(-half, -half, half * 2.0, half * 2.0),
            ShapeKind::Triangle => {
                let h = half * 2.0 * 0.866;
                ctx.move_to(0.0, -h / 2.0);
                ctx.line_to(-half, h / 2.0);
                ctx.line_to(half, h / 2.0);
                ctx.close_path();
            }
            ShapeKind::Hexagon => {
                ctx.move_to(half, 0.0);
                for i in 1..=6 {
                    let angle = i as f64 * std::f64::consts::TAU / 6.0;
                    ctx.line_to(half * angle.cos(), half * angle.sin());
                }
                ctx.close_path();
            }
            ShapeKind::Diamond => {
                ctx.move_to(0.0, -half);
                ctx.line_to(half, 0.0);
                ctx.line_to(0.0, half);
                ctx.line_to(-half, 0.0);
                ctx.close_path();
            }
        }
        ctx.stroke();
        ctx.restore();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Shape Frenzy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let storage = match LocalStorage::open() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("Persistence disabled: {e}");
                None
            }
        };
        let settings = storage.as_ref().map(|s| Settings::load(s)).unwrap_or_default();
        let high_scores = storage.as_ref().map(|s| HighScores::load(s)).unwrap_or_default();

        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());

        let tier = platform::classify(&platform::probe_device());
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, settings.profile_for(tier), PlayField::default());
        log::info!("Session created with seed {} ({})", seed, tier.as_str());

        let game = Rc::new(RefCell::new(Game {
            session,
            effects: Effects {
                document: document.clone(),
                settings,
                high_scores,
                storage,
                audio,
                popups: Vec::new(),
                shake: 0.0,
                flash: 0.0,
                combo: 0,
                run_end: RunEndLatch::default(),
                field: PlayField::default(),
            },
            canvas: canvas.clone(),
            ctx,
            pointer: Vec2::ZERO,
            idle_mode: false,
            last_idle_tap: 0.0,
            last_frame: 0.0,
        }));
        game.borrow_mut().resize();
        if let Some(best) = game.borrow().effects.high_scores.top_score() {
            game.borrow().effects.set_text("best-score", &best.to_string());
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);
        log::info!("Shape Frenzy running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer events cover mouse, pen and touch in one path
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                event.prevent_default();
                let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().pointer_down(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Track pointer for Space-to-hit
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                game.borrow_mut().pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" if g.session.is_running() => {
                        event.prevent_default();
                        let pointer = g.pointer;
                        g.pointer_down(pointer.x, pointer.y);
                    }
                    "Enter" => {
                        if g.session.end_cause().is_some() {
                            g.restart();
                        } else {
                            g.start();
                        }
                    }
                    "KeyM" => g.toggle_mute(),
                    "KeyI" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Frenzy (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the real game");

    headless::run_demo(42);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use shape_frenzy::HighScores;
    use shape_frenzy::persistence::MemoryStorage;
    use shape_frenzy::sim::autoplay;
    use shape_frenzy::sim::{
        DeviceTier, DifficultyProfile, EndCause, GameHost, PlayField, RemovalReason, Session,
    };

    /// Demo frame length and tap cadence
    const FRAME_MS: f64 = 16.67;
    const TAP_EVERY_FRAMES: u32 = 20;
    /// Give up after two simulated minutes
    const MAX_FRAMES: u32 = 7200;

    #[derive(Default)]
    struct Tally {
        spawned: u32,
        escaped: u32,
        checkpoints: Vec<u64>,
        game_over: Option<(u64, EndCause)>,
    }

    impl GameHost for Tally {
        fn on_shape_spawned(&mut self, _shape: &shape_frenzy::sim::Shape) {
            self.spawned += 1;
        }

        fn on_shape_removed(&mut self, _id: u32, reason: RemovalReason) {
            if reason == RemovalReason::OffScreen {
                self.escaped += 1;
            }
        }

        fn on_checkpoint(&mut self, value: u64) {
            self.checkpoints.push(value);
        }

        fn on_game_over(&mut self, final_score: u64, cause: EndCause) {
            self.game_over = Some((final_score, cause));
        }
    }

    pub fn run_demo(seed: u64) {
        let profile = DifficultyProfile::for_tier(DeviceTier::Desktop);
        let mut session = Session::new(seed, profile, PlayField::new(800.0, 600.0));
        let mut tally = Tally::default();
        session.start_session(profile);

        let mut frame = 0;
        while session.is_running() && frame < MAX_FRAMES {
            let now = frame as f64 * FRAME_MS;
            session.on_tick(now);
            if frame % TAP_EVERY_FRAMES == 0 {
                if let Some(target) =
                    autoplay::pick_target(session.shapes(), session.field(), profile.hit_radius_px)
                {
                    session.on_pointer_down(target.x, target.y);
                }
            }
            session.dispatch_events(&mut tally);
            frame += 1;
        }
        session.end_session();
        session.dispatch_events(&mut tally);

        let score = session.score();
        let (final_score, cause) = tally.game_over.unwrap_or((score.score, EndCause::Ended));
        log::info!(
            "Demo over after {:.1}s: score {}, best combo {}, cause {:?}",
            frame as f64 * FRAME_MS / 1000.0,
            final_score,
            score.best_combo,
            cause
        );
        log::info!(
            "Shapes spawned {}, escaped {}, checkpoints {:?}",
            tally.spawned,
            tally.escaped,
            tally.checkpoints
        );

        let mut storage = MemoryStorage::new();
        let mut high_scores = HighScores::load(&storage);
        if let Some(rank) = high_scores.add_score(final_score, score.best_combo, 0.0) {
            log::info!("Leaderboard rank #{}", rank);
        }
        if let Err(e) = high_scores.save(&mut storage) {
            log::warn!("Could not save high scores: {e}");
        }

        println!("Final score: {final_score} ({cause:?})");
    }
}
