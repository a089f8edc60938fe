//! Simulation engine - one session's worth of game state
//!
//! `SimulationEngine` owns the actor, obstacles, particles and RNG streams.
//! Hosts drive it with `reset`, `apply_impulse` and `advance`, and read it
//! back through `snapshot`. It never renders, plays audio or touches storage.

use super::state::{Actor, GameEvent, GamePhase, GameState, Obstacle, Particle};
use super::tick::{self, SimRng};
use crate::tuning::Tuning;

/// Read-only view handed to render sinks once per frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub actor: &'a Actor,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: u64,
    pub high_score: u64,
    pub frame_count: u64,
}

/// The simulation engine
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    pub(crate) state: GameState,
    tuning: Tuning,
    seed: u64,
    rng: SimRng,
}

impl SimulationEngine {
    /// Create an engine on the title screen
    ///
    /// `high_score` is the best score read from the external store.
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self {
            state: GameState::new(&tuning, high_score),
            rng: SimRng::new(seed),
            tuning,
            seed,
        }
    }

    /// Start a new run from the engine's current seed
    ///
    /// Everything except the high score is rebuilt, so the run that follows
    /// depends on the seed alone.
    pub fn reset(&mut self) {
        let high_score = self.state.high_score;
        self.state = GameState::new(&self.tuning, high_score);
        self.state.phase = GamePhase::Playing;
        self.rng = SimRng::new(self.seed);
        log::info!("Run started (seed {}, best {})", self.seed, high_score);
    }

    /// Start a new run with a different seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Flap. Returns `Jumped` when it took effect, `None` outside `Playing`.
    pub fn apply_impulse(&mut self) -> Option<GameEvent> {
        tick::impulse(&mut self.state, &self.tuning, &mut self.rng)
    }

    /// Advance one tick and return the events it produced, in order
    pub fn advance(&mut self) -> Vec<GameEvent> {
        tick::tick(&mut self.state, &self.tuning, &mut self.rng)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.state.phase,
            actor: &self.state.actor,
            obstacles: &self.state.obstacles,
            particles: &self.state.particles,
            score: self.state.score,
            high_score: self.state.high_score,
            frame_count: self.state.frame_count,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::HitCause;
    use crate::tuning::{Preset, SpeedRamp};
    use proptest::prelude::*;

    /// Flap whenever the actor sinks below the middle of the screen
    fn hover_step(engine: &mut SimulationEngine) -> Vec<GameEvent> {
        if engine.state().actor.pos.y > 300.0 && engine.state().actor.velocity > 0.0 {
            engine.apply_impulse();
        }
        engine.advance()
    }

    #[test]
    fn test_starts_idle() {
        let mut engine = SimulationEngine::new(Tuning::default(), 1, 0);
        assert_eq!(engine.phase(), GamePhase::Start);
        assert_eq!(engine.apply_impulse(), None);
        assert!(engine.advance().is_empty());
        assert_eq!(engine.state().frame_count, 0);
    }

    #[test]
    fn test_reset_starts_playing() {
        let mut engine = SimulationEngine::new(Tuning::default(), 1, 9);
        engine.reset();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.high_score(), 9);
        assert_eq!(engine.apply_impulse(), Some(GameEvent::Jumped));
    }

    #[test]
    fn test_reset_clears_previous_session() {
        let mut engine = SimulationEngine::new(Tuning::default(), 11, 0);
        engine.reset();
        for _ in 0..400 {
            hover_step(&mut engine);
        }
        engine.state.score = 5;
        engine.state.actor.rotation = 0.3;

        engine.reset();
        let fresh = SimulationEngine::new(Tuning::default(), 11, engine.high_score());
        let state = engine.state();
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.spawn_timer, 0);
        assert_eq!(state.actor.velocity, 0.0);
        assert_eq!(state.actor.rotation, 0.0);
        assert_eq!(state.actor.pos, fresh.state().actor.pos);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = SimulationEngine::new(Tuning::default(), 77, 0);
        let mut b = SimulationEngine::new(Tuning::default(), 77, 0);
        a.reset();
        b.reset();

        for _ in 0..600 {
            let ea = hover_step(&mut a);
            let eb = hover_step(&mut b);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.state().actor.pos, b.state().actor.pos);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.phase(), b.phase());
        let gaps_a: Vec<f32> = a.state().obstacles.iter().map(|o| o.gap_start).collect();
        let gaps_b: Vec<f32> = b.state().obstacles.iter().map(|o| o.gap_start).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn test_reset_replays_seed() {
        let tuning = Tuning {
            gravity: 0.0,
            gap_height: 300.0,
            ..Tuning::default()
        };
        let mut engine = SimulationEngine::new(tuning, 3, 0);
        engine.reset();
        for _ in 0..120 {
            engine.advance();
        }
        let first_gap = engine.state().obstacles[0].gap_start;

        engine.reset();
        for _ in 0..120 {
            engine.advance();
        }
        assert_eq!(engine.state().obstacles[0].gap_start, first_gap);
    }

    #[test]
    fn test_cosmetics_do_not_shift_gameplay() {
        let plain = Tuning {
            gravity: 0.0,
            gap_height: 300.0,
            ..Tuning::default()
        };
        let busy = Tuning {
            jump_burst: 40,
            ..plain.clone()
        };
        let mut a = SimulationEngine::new(plain, 8, 0);
        let mut b = SimulationEngine::new(busy, 8, 0);
        a.reset();
        b.reset();
        for _ in 0..250 {
            b.apply_impulse();
            b.state.actor.velocity = 0.0;
            a.advance();
            b.advance();
        }
        let gaps_a: Vec<f32> = a.state().obstacles.iter().map(|o| o.gap_start).collect();
        let gaps_b: Vec<f32> = b.state().obstacles.iter().map(|o| o.gap_start).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn test_high_score_written_once() {
        let mut engine = SimulationEngine::new(Tuning::default(), 1, 0);
        engine.reset();
        engine.state.score = 2;

        let mut high_score_events = 0;
        let mut hits = 0;
        for _ in 0..500 {
            for event in engine.advance() {
                match event {
                    GameEvent::NewHighScore { .. } => high_score_events += 1,
                    GameEvent::Hit { cause } => {
                        assert_eq!(cause, HitCause::Floor);
                        hits += 1;
                    }
                    _ => {}
                }
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(high_score_events, 1);
        assert_eq!(engine.high_score(), 2);

        // A worse second run leaves the best alone
        engine.reset();
        for _ in 0..500 {
            assert!(
                !engine
                    .advance()
                    .iter()
                    .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
            );
        }
        assert_eq!(engine.high_score(), 2);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut engine = SimulationEngine::new(Tuning::default(), 1, 4);
        engine.reset();
        engine.apply_impulse();
        engine.advance();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.frame_count, 1);
        assert_eq!(snapshot.high_score, 4);
        assert_eq!(snapshot.particles.len(), engine.state().particles.len());
        assert_eq!(snapshot.actor.pos, engine.state().actor.pos);
    }

    #[test]
    fn test_difficulty_depends_on_score_only() {
        use crate::sim::difficulty::{obstacle_speed, spawn_interval};

        let tuning = Preset::Arcade.tuning();
        let mut early = SimulationEngine::new(tuning.clone(), 1, 0);
        let mut late = SimulationEngine::new(tuning.clone(), 2, 0);
        early.reset();
        late.reset();
        for _ in 0..30 {
            late.advance();
        }
        early.state.score = 6;
        late.state.score = 6;
        assert_eq!(
            obstacle_speed(early.score(), early.tuning()),
            obstacle_speed(late.score(), late.tuning())
        );
        assert_eq!(
            spawn_interval(early.score(), early.tuning()),
            spawn_interval(late.score(), late.tuning())
        );
    }

    proptest! {
        #[test]
        fn score_and_frames_are_monotonic(
            seed in 0u64..10_000,
            flaps in proptest::collection::vec(any::<bool>(), 1..600),
        ) {
            let tuning = Tuning {
                speed_ramp: SpeedRamp::Linear { increment: 0.1 },
                ..Preset::Forgiving.tuning()
            };
            let mut engine = SimulationEngine::new(tuning, seed, 0);
            engine.reset();

            let mut last_score = 0;
            let mut last_frame = 0;
            for flap in flaps {
                let was_playing = engine.phase() == GamePhase::Playing;
                if flap {
                    engine.apply_impulse();
                }
                engine.advance();
                prop_assert!(engine.score() >= last_score);
                if was_playing {
                    prop_assert_eq!(engine.state().frame_count, last_frame + 1);
                } else {
                    prop_assert_eq!(engine.state().frame_count, last_frame);
                }
                last_score = engine.score();
                last_frame = engine.state().frame_count;
            }
        }

        #[test]
        fn game_over_is_terminal(seed in 0u64..10_000, extra in 1usize..200) {
            let mut engine = SimulationEngine::new(Tuning::default(), seed, 0);
            engine.reset();
            while engine.phase() == GamePhase::Playing {
                engine.advance();
            }
            let score = engine.score();
            let best = engine.high_score();
            let frame = engine.state().frame_count;

            for _ in 0..extra {
                prop_assert_eq!(engine.apply_impulse(), None);
                prop_assert!(engine.advance().is_empty());
            }
            prop_assert_eq!(engine.phase(), GamePhase::GameOver);
            prop_assert_eq!(engine.score(), score);
            prop_assert_eq!(engine.high_score(), best);
            prop_assert_eq!(engine.state().frame_count, frame);
        }
    }
}
