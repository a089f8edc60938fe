//! Session host
//!
//! `Game` sits between the input/frame callbacks and the simulation. It owns
//! the engine plus the outbound collaborators (high-score store, audio) and
//! relays each tick's events to them. Collaborator failures are logged and
//! swallowed so they can never corrupt the simulation.

use crate::audio::{AudioNotifier, SoundEffect};
use crate::highscores::HighScoreStore;
use crate::platform::FrameDriver;
use crate::sim::{GameEvent, GamePhase, SimulationEngine, Snapshot, autopilot};
use crate::tuning::Tuning;

/// Frames the autopilot lingers on the game-over screen before replaying
const AUTOPILOT_RESTART_DELAY: u32 = 90;

/// One player's session
pub struct Game<S: HighScoreStore, A: AudioNotifier> {
    engine: SimulationEngine,
    store: S,
    audio: A,
    driver: FrameDriver,
    autopilot: bool,
    /// Frames spent in `GameOver` while the autopilot is flying
    idle_frames: u32,
}

impl<S: HighScoreStore, A: AudioNotifier> Game<S, A> {
    /// Create a session on the title screen, reading the best score once
    pub fn new(tuning: Tuning, seed: u64, store: S, audio: A) -> Self {
        let high_score = match store.read() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not read high score, starting from 0: {}", e);
                0
            }
        };
        log::info!("Session created (best {})", high_score);

        Self {
            engine: SimulationEngine::new(tuning, seed, high_score),
            store,
            audio,
            driver: FrameDriver::new(),
            autopilot: false,
            idle_frames: 0,
        }
    }

    /// The single player input: start from the title screen, flap while playing
    ///
    /// Ignored on the game-over screen; `restart` starts the next run.
    pub fn press(&mut self) {
        match self.engine.phase() {
            GamePhase::Start => self.restart(),
            GamePhase::Playing => {
                if let Some(event) = self.engine.apply_impulse() {
                    self.relay(&event);
                }
            }
            GamePhase::GameOver => {}
        }
    }

    /// Begin a new run from the current seed
    pub fn restart(&mut self) {
        self.engine.reset();
        self.driver.reset();
        self.idle_frames = 0;
    }

    /// Begin a new run with a fresh seed
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.engine.reset_with_seed(seed);
        self.driver.reset();
        self.idle_frames = 0;
    }

    /// Run exactly one simulation tick and relay its events
    pub fn frame(&mut self) -> Vec<GameEvent> {
        if self.autopilot {
            self.fly_autopilot();
        }

        let events = self.engine.advance();
        for event in &events {
            self.relay(event);
        }
        events
    }

    /// Feed elapsed wall-clock seconds; runs as many ticks as are due
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        let steps = self.driver.pump(dt);
        for _ in 0..steps {
            self.frame();
        }
        steps
    }

    /// Toggle idle/demo mode
    pub fn set_autopilot(&mut self, enabled: bool) {
        if enabled != self.autopilot {
            log::info!("Autopilot {}", if enabled { "on" } else { "off" });
        }
        self.autopilot = enabled;
        self.idle_frames = 0;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Forget accumulated frame time (tab hidden and shown again)
    pub fn pause_clock(&mut self) {
        self.driver.reset();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn fly_autopilot(&mut self) {
        match self.engine.phase() {
            GamePhase::Start => self.restart(),
            GamePhase::Playing => {
                if autopilot::should_flap(&self.engine.snapshot(), self.engine.tuning()) {
                    self.press();
                }
            }
            GamePhase::GameOver => {
                self.idle_frames += 1;
                if self.idle_frames >= AUTOPILOT_RESTART_DELAY {
                    self.restart();
                }
            }
        }
    }

    /// Forward one event to the outbound collaborators
    fn relay(&mut self, event: &GameEvent) {
        self.audio.notify(SoundEffect::for_event(event));

        if let GameEvent::NewHighScore { score } = *event {
            if let Err(e) = self.store.write(score) {
                log::warn!("Could not save high score {}: {}", score, e);
            }
        }
    }
}
