//! Game state and core simulation types
//!
//! Everything one session owns lives here. Gameplay state is serializable so a
//! run can be dumped for debugging; cosmetic particles are skipped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle title screen, no physics
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, physics frozen until reset
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    Floor,
    Ceiling,
    Obstacle,
}

/// Discrete events emitted by the simulation for audio, HUD and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An impulse was applied
    Jumped,
    /// An obstacle was cleared; carries the new score
    Scored { score: u64 },
    /// The actor collided and the run is over
    Hit { cause: HitCause },
    /// The finished run beat the previous best
    NewHighScore { score: u64 },
}

/// The falling/flapping character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Center of the actor; x stays fixed during a run
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive is down)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// Cosmetic tilt in radians, never read by collision
    pub rotation: f32,
}

impl Actor {
    /// Actor at the start position, at rest
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, tuning.actor_start_y),
            velocity: 0.0,
            width: tuning.actor_width,
            height: tuning.actor_height,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge of the column
    pub x: f32,
    pub width: f32,
    /// Top of the gap
    pub gap_start: f32,
    pub gap_height: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_end(&self) -> f32 {
        self.gap_start + self.gap_height
    }

    /// Fully past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Packed 0xRRGGBB
    pub color: u32,
    /// Remaining life, 1.0 at spawn and removed at 0
    pub life: f32,
    pub size: f32,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub actor: Actor,
    /// Obstacles in spawn order (oldest, leftmost first)
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Ticks simulated this session
    pub frame_count: u64,
    /// Best score known to this engine; mirrors the external store
    pub high_score: u64,
    /// Ticks since the last obstacle spawn
    pub spawn_timer: u32,
    next_id: u32,
}

impl GameState {
    /// Fresh title-screen state
    pub fn new(tuning: &Tuning, high_score: u64) -> Self {
        Self {
            phase: GamePhase::Start,
            actor: Actor::spawn(tuning),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            frame_count: 0,
            high_score,
            spawn_timer: 0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
