//! Fixed timestep simulation tick
//!
//! One call advances a session by exactly one frame. Order within a tick is
//! fixed: actor physics, boundary check, obstacle motion with collision then
//! scoring then removal, spawning, particles.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{actor_hitbox, boundary_hit, has_cleared, hits_obstacle};
use super::difficulty::{obstacle_speed, spawn_interval};
use super::particles::{self, Burst};
use super::state::{Actor, GameEvent, GamePhase, GameState, HitCause, Obstacle};
use crate::tuning::Tuning;

/// Stream offset separating cosmetic draws from gameplay draws
const FX_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Random streams owned by one engine
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Gap positions
    pub gameplay: Pcg32,
    /// Particle jitter
    pub fx: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            gameplay: Pcg32::seed_from_u64(seed),
            fx: Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT),
        }
    }
}

/// Advance the session by one tick and return the events it produced
pub fn tick(state: &mut GameState, tuning: &Tuning, rng: &mut SimRng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Playing {
        // Physics is frozen; leftover debris still fades out
        particles::update(&mut state.particles, tuning);
        return events;
    }

    state.frame_count += 1;

    integrate_actor(&mut state.actor, tuning);

    if let Some(cause) = boundary_hit(&state.actor, tuning) {
        end_run(state, tuning, rng, cause, &mut events);
        return events;
    }

    // Cadence is read at the score the tick started with
    state.spawn_timer += 1;
    let spawn_due = state.spawn_timer >= spawn_interval(state.score, tuning);

    let speed = obstacle_speed(state.score, tuning);
    let hitbox = actor_hitbox(&state.actor, tuning.hitbox_margin);
    let mut crashed = false;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= speed;

        if hits_obstacle(&hitbox, obstacle) {
            crashed = true;
            break;
        }

        if !obstacle.passed && has_cleared(&state.actor, obstacle) {
            obstacle.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored { score: state.score });
        }
    }

    if crashed {
        end_run(state, tuning, rng, HitCause::Obstacle, &mut events);
        return events;
    }

    state.obstacles.retain(|o| !o.is_offscreen());

    // New pipes enter at the right edge and start moving next tick
    if spawn_due {
        spawn_obstacle(state, tuning, &mut rng.gameplay);
        state.spawn_timer = 0;
    }

    particles::update(&mut state.particles, tuning);

    events
}

/// Flap: set the upward velocity and tilt, puff some feathers
pub fn impulse(state: &mut GameState, tuning: &Tuning, rng: &mut SimRng) -> Option<GameEvent> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    state.actor.velocity = tuning.jump_velocity;
    state.actor.rotation = tuning.jump_tilt;
    particles::spawn_burst(
        &mut state.particles,
        &mut rng.fx,
        state.actor.pos,
        Burst::Flap,
        tuning,
    );

    Some(GameEvent::Jumped)
}

/// Euler step for the actor plus its cosmetic tilt
fn integrate_actor(actor: &mut Actor, tuning: &Tuning) {
    actor.velocity += tuning.gravity;
    actor.pos.y += actor.velocity;

    if actor.velocity > 0.0 {
        actor.rotation = (actor.rotation + tuning.tilt_rate).min(tuning.max_tilt);
    }

    // Open sky: pin the actor under the top edge and cancel the climb
    if !tuning.ceiling_is_lethal && actor.top() < 0.0 {
        actor.pos.y = actor.height / 2.0;
        actor.velocity = actor.velocity.max(0.0);
    }
}

/// Append a pipe pair at the right edge with a random gap
fn spawn_obstacle(state: &mut GameState, tuning: &Tuning, rng: &mut Pcg32) {
    let (min, max) = tuning.gap_band();
    let (lo, hi) = (min.floor() as i32, max.floor() as i32);
    let gap_start = if hi > lo {
        rng.random_range(lo..=hi) as f32
    } else {
        lo as f32
    };

    let id = state.next_obstacle_id();
    log::debug!(
        "Spawned obstacle {} at tick {} (gap {}..{})",
        id,
        state.frame_count,
        gap_start,
        gap_start + tuning.gap_height
    );

    state.obstacles.push(Obstacle {
        id,
        x: tuning.screen_width,
        width: tuning.pipe_width,
        gap_start,
        gap_height: tuning.gap_height,
        passed: false,
    });
}

/// Transition to GameOver exactly once
fn end_run(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut SimRng,
    cause: HitCause,
    events: &mut Vec<GameEvent>,
) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.phase = GamePhase::GameOver;
    events.push(GameEvent::Hit { cause });
    particles::spawn_burst(
        &mut state.particles,
        &mut rng.fx,
        state.actor.pos,
        Burst::Crash,
        tuning,
    );

    if state.score > state.high_score {
        state.high_score = state.score;
        events.push(GameEvent::NewHighScore { score: state.score });
    }

    log::info!(
        "Run over ({:?}) at tick {} with score {} (best {})",
        cause,
        state.frame_count,
        state.score,
        state.high_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Preset, SpeedRamp};

    fn playing(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(tuning, 0);
        state.phase = GamePhase::Playing;
        state
    }

    fn pipe(id: u32, x: f32, gap_start: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            width: 52.0,
            gap_start,
            gap_height: 150.0,
            passed: false,
        }
    }

    /// Gravity off, gap covering the whole middle of the screen
    fn hover_tuning() -> Tuning {
        Tuning {
            gravity: 0.0,
            gap_height: 500.0,
            speed_ramp: SpeedRamp::Linear { increment: 0.0 },
            cadence_increment: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = GameState::new(&tuning, 0);

        let events = tick(&mut state, &tuning, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.actor.pos.y, tuning.actor_start_y);
    }

    #[test]
    fn test_free_fall_is_triangular() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        let y0 = state.actor.pos.y;

        for k in 1..=30u32 {
            tick(&mut state, &tuning, &mut rng);
            let expected = y0 + tuning.gravity * (k * (k + 1)) as f32 / 2.0;
            assert!(
                (state.actor.pos.y - expected).abs() < 1e-3,
                "tick {}: {} != {}",
                k,
                state.actor.pos.y,
                expected
            );
        }
    }

    #[test]
    fn test_fall_ends_on_floor() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);

        let mut last = Vec::new();
        while state.phase == GamePhase::Playing {
            last = tick(&mut state, &tuning, &mut rng);
        }
        assert_eq!(last, vec![GameEvent::Hit { cause: HitCause::Floor }]);
        assert!(state.actor.bottom() >= tuning.floor_y());
        // 300 + 0.125 k (k + 1) >= 588 first holds at k = 48
        assert_eq!(state.frame_count, 48);
    }

    #[test]
    fn test_ceiling_hit() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Tuning::default()
        };
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        state.actor.velocity = -10.0;

        let mut events = Vec::new();
        while state.phase == GamePhase::Playing {
            events = tick(&mut state, &tuning, &mut rng);
        }
        assert_eq!(events, vec![GameEvent::Hit { cause: HitCause::Ceiling }]);
    }

    #[test]
    fn test_open_ceiling_clamps() {
        let tuning = Tuning {
            gravity: 0.0,
            ceiling_is_lethal: false,
            ..Tuning::default()
        };
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        state.actor.velocity = -10.0;

        for _ in 0..100 {
            tick(&mut state, &tuning, &mut rng);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.top(), 0.0);
        assert_eq!(state.actor.velocity, 0.0);
    }

    #[test]
    fn test_open_ceiling_releases_next_tick() {
        let tuning = Preset::Forgiving.tuning();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        state.actor.pos.y = 14.0;

        impulse(&mut state, &tuning, &mut rng);
        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.actor.top(), 0.0);
        assert_eq!(state.actor.velocity, 0.0);

        // Gravity takes over straight away instead of grinding against the top
        tick(&mut state, &tuning, &mut rng);
        assert!(state.actor.top() > 0.0);
        assert_eq!(state.actor.velocity, tuning.gravity);

        // And a fresh flap still responds
        for _ in 0..10 {
            tick(&mut state, &tuning, &mut rng);
        }
        let y = state.actor.pos.y;
        impulse(&mut state, &tuning, &mut rng);
        tick(&mut state, &tuning, &mut rng);
        assert!(state.actor.pos.y < y);
    }

    #[test]
    fn test_rotation_drifts_and_clamps() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);

        impulse(&mut state, &tuning, &mut rng);
        assert_eq!(state.actor.rotation, tuning.jump_tilt);

        // Still rising: no drift
        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.actor.rotation, tuning.jump_tilt);

        for _ in 0..40 {
            tick(&mut state, &tuning, &mut rng);
        }
        assert_eq!(state.actor.rotation, tuning.max_tilt);
    }

    #[test]
    fn test_impulse_resets_velocity_without_stacking() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);

        assert_eq!(impulse(&mut state, &tuning, &mut rng), Some(GameEvent::Jumped));
        assert_eq!(impulse(&mut state, &tuning, &mut rng), Some(GameEvent::Jumped));
        assert_eq!(state.actor.velocity, tuning.jump_velocity);
        assert_eq!(state.particles.len(), 2 * tuning.jump_burst as usize);
    }

    #[test]
    fn test_impulse_noop_when_not_playing() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = GameState::new(&tuning, 0);

        assert_eq!(impulse(&mut state, &tuning, &mut rng), None);
        assert_eq!(state.actor.velocity, 0.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_first_spawn_at_base_interval() {
        let tuning = hover_tuning();
        let mut rng = SimRng::new(5);
        let mut state = playing(&tuning);

        for _ in 0..119 {
            tick(&mut state, &tuning, &mut rng);
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        let spawned = &state.obstacles[0];
        assert_eq!(spawned.x, tuning.screen_width);
        let (min, max) = tuning.gap_band();
        assert!(spawned.gap_start >= min && spawned.gap_start <= max);
    }

    #[test]
    fn test_removal_tick() {
        let tuning = hover_tuning();
        let mut rng = SimRng::new(5);
        let mut state = playing(&tuning);

        // First pipe spawns at tick 120
        let spawn_tick = 120u64;
        let lifetime =
            ((tuning.screen_width + tuning.pipe_width) / tuning.base_speed).ceil() as u64;

        while state.frame_count < spawn_tick + lifetime - 1 {
            tick(&mut state, &tuning, &mut rng);
        }
        assert!(state.obstacles.iter().any(|o| o.id == 1));

        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.frame_count, spawn_tick + lifetime);
        assert!(!state.obstacles.iter().any(|o| o.id == 1));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_removal_tick_rounds_up() {
        // 452 / 3 is not whole: the last move takes x from -50 to -53
        let tuning = Tuning {
            base_speed: 3.0,
            ..hover_tuning()
        };
        let mut rng = SimRng::new(5);
        let mut state = playing(&tuning);
        let spawn_tick = 120u64;

        while state.frame_count < spawn_tick + 150 {
            tick(&mut state, &tuning, &mut rng);
        }
        let first = state.obstacles.iter().find(|o| o.id == 1);
        assert_eq!(first.map(|o| o.x), Some(-50.0));

        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.frame_count, spawn_tick + 151);
        assert!(!state.obstacles.iter().any(|o| o.id == 1));
    }

    #[test]
    fn test_scores_once_per_obstacle() {
        let tuning = hover_tuning();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        // Right edge at 40: two ticks of speed 2 bring it to 36 < 38
        state.obstacles.push(pipe(1, -12.0, 50.0));
        state.obstacles[0].gap_height = 500.0;

        let events = tick(&mut state, &tuning, &mut rng);
        assert!(events.is_empty());
        let events = tick(&mut state, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::Scored { score: 1 }]);

        for _ in 0..20 {
            let events = tick(&mut state, &tuning, &mut rng);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored { .. })));
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_removal_does_not_skip_neighbour() {
        let tuning = hover_tuning();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);

        // Two pipes leave the screen this tick, a third stays
        state.obstacles.push(pipe(1, -51.0, 50.0));
        state.obstacles.push(pipe(2, -50.5, 50.0));
        state.obstacles.push(pipe(3, 200.0, 50.0));
        for o in state.obstacles.iter_mut() {
            o.gap_height = 500.0;
            o.passed = true;
        }

        tick(&mut state, &tuning, &mut rng);
        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Tuning::default()
        };
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        // Gap 50..200, actor at 288..312; column reaches the actor after the move
        state.obstacles.push(pipe(1, 63.0, 50.0));

        let events = tick(&mut state, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::Hit { cause: HitCause::Obstacle }]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), tuning.hit_burst as usize);
    }

    #[test]
    fn test_new_high_score_event() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        state.high_score = 2;
        state.score = 3;
        state.actor.pos.y = 590.0;

        let events = tick(&mut state, &tuning, &mut rng);
        assert_eq!(
            events,
            vec![
                GameEvent::Hit { cause: HitCause::Floor },
                GameEvent::NewHighScore { score: 3 }
            ]
        );
        assert_eq!(state.high_score, 3);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(1);
        let mut state = playing(&tuning);
        state.score = 4;
        state.actor.pos.y = 590.0;

        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        let frame = state.frame_count;
        let y = state.actor.pos.y;

        for _ in 0..200 {
            assert!(tick(&mut state, &tuning, &mut rng).is_empty());
        }
        assert_eq!(state.frame_count, frame);
        assert_eq!(state.actor.pos.y, y);
        assert_eq!(state.score, 4);
        assert_eq!(state.high_score, 4);
        // Debris has faded out by now
        assert!(state.particles.is_empty());
    }
}
