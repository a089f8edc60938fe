//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod engine;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Aabb, actor_hitbox, boundary_hit, hits_obstacle};
pub use difficulty::{obstacle_speed, spawn_interval};
pub use engine::{SimulationEngine, Snapshot};
pub use state::{Actor, GameEvent, GamePhase, GameState, HitCause, Obstacle, Particle};
pub use tick::{SimRng, tick};
