//! Flappy Etka entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_etka::audio::WebAudio;
    use flappy_etka::consts::SIM_DT;
    use flappy_etka::highscores::LocalStorageStore;
    use flappy_etka::platform::FpsCounter;
    use flappy_etka::renderer::{RenderSink, RenderState};
    use flappy_etka::{Game, GamePhase, Settings};

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStorageStore, WebAudio>,
        render_state: Option<RenderState>,
        settings: Settings,
        last_time: f64,
        fps: FpsCounter,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = WebAudio::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                game: Game::new(settings.tuning(), seed, LocalStorageStore, audio),
                render_state: None,
                settings,
                last_time: 0.0,
                fps: FpsCounter::default(),
            }
        }

        /// Player input from any device
        fn press(&mut self) {
            self.game.audio().resume();
            self.game.press();
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.game.restart_with_seed(seed);
            log::info!("Game restarted with seed: {}", seed);
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.game.audio_mut().set_muted(self.settings.muted);
            self.settings.save();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                render_state.present(&self.game.snapshot());
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.game.snapshot();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.high_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&format!("{:.0}", self.fps.fps())));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("hud-autopilot") {
                let class = if self.game.autopilot() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide start prompt
            if let Some(el) = document.get_element_by_id("start-prompt") {
                let class = if snapshot.phase == GamePhase::Start { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if snapshot.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&snapshot.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("final-best") {
                        best_el.set_text_content(Some(&snapshot.high_score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Etka starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let tuning = app.borrow().game.engine().tuning().clone();
        match RenderState::new(surface, &adapter, width, height, tuning).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());
        setup_visibility(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(app);

        log::info!("Flappy Etka running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down (flap)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                app.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (flap); non-passive so the page does not scroll
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().press();
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut a = app.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        a.press();
                    }
                    "Enter" | "KeyR" => {
                        if a.game.engine().phase() == GamePhase::GameOver {
                            a.restart();
                        }
                    }
                    "KeyI" => {
                        let enabled = !a.game.autopilot();
                        a.game.set_autopilot(enabled);
                    }
                    "KeyM" => a.toggle_mute(),
                    "KeyF" => {
                        a.settings.show_fps = !a.settings.show_fps;
                        a.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;
            a.fps.record(time);

            a.game.update(dt);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Drop the time spent in a background tab instead of replaying it
    fn setup_visibility(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                let mut a = app.borrow_mut();
                a.last_time = 0.0;
                a.game.pause_clock();
                log::info!("Tab visible again, clock reset");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays a few seeded runs
///
/// Usage: `flappy-etka [classic|forgiving|arcade|<tuning.json>] [runs]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Etka (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use flappy_etka::audio::LogAudio;
    use flappy_etka::highscores::FileStore;
    use flappy_etka::{Game, GamePhase, Preset, Tuning};

    /// Give up on a run the autopilot never loses
    const MAX_TICKS_PER_RUN: u32 = 60 * 60 * 10;
    const DEFAULT_RUNS: u32 = 5;

    pub fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        let tuning = match args.first().map(String::as_str) {
            None => Tuning::default(),
            Some(arg) if arg.ends_with(".json") => Tuning::from_json(&std::fs::read_to_string(arg)?)?,
            Some(arg) => Preset::from_str(arg)
                .ok_or_else(|| format!("unknown preset {:?}", arg))?
                .tuning(),
        };
        let runs = match args.get(1) {
            Some(n) => n.parse()?,
            None => DEFAULT_RUNS,
        };

        let store = FileStore::new(std::env::temp_dir().join("flappy-etka-highscore.txt"));
        log::info!("High score file: {}", store.path().display());

        let mut game = Game::new(tuning, 1, store, LogAudio);
        game.set_autopilot(true);

        for run in 0..runs {
            let seed = run as u64 + 1;
            game.restart_with_seed(seed);

            let mut ticks = 0;
            while game.engine().phase() == GamePhase::Playing && ticks < MAX_TICKS_PER_RUN {
                game.frame();
                ticks += 1;
            }

            println!(
                "run {:>2} (seed {:>2}): score {:>3} after {:>5} ticks{}",
                run + 1,
                seed,
                game.engine().score(),
                ticks,
                if ticks == MAX_TICKS_PER_RUN { " (stopped)" } else { "" }
            );
        }

        println!("best: {}", game.engine().high_score());
        Ok(())
    }
}
