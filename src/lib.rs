//! Flappy Etka - a tap-to-flap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `session`: Host driver relaying simulation events to collaborators
//! - `renderer`: WebGPU render sink
//! - `audio`: Procedural sound effects
//! - `highscores`: Persistent best score
//! - `platform`: Fixed-timestep frame driver and FPS counter
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryStore, StoreError};
pub use session::Game;
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, SimulationEngine, Snapshot};
pub use tuning::{Preset, SpeedRamp, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta honoured before clamping (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
