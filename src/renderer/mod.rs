//! WebGPU rendering module
//!
//! Scenes are built on the CPU as flat-colored triangle lists in playfield
//! coordinates and mapped to the viewport at upload time.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;

use crate::sim::Snapshot;

/// Anything that can show a frame of the game
///
/// Called once per display frame after the simulation has advanced. Sinks
/// only read the snapshot and must handle their own failures.
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot);
}
