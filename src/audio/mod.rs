//! Sound effect notifications
//!
//! The simulation never plays audio itself. Hosts translate `GameEvent`s into
//! `SoundEffect`s and hand them to an `AudioNotifier`, which must swallow its
//! own failures.

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Flap
    Jump,
    /// Pipe cleared
    Score,
    /// Crash into a pipe, the floor or the ceiling
    Hit,
    /// Run beat the previous best
    HighScore,
}

impl SoundEffect {
    /// The effect that accompanies a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jumped => SoundEffect::Jump,
            GameEvent::Scored { .. } => SoundEffect::Score,
            GameEvent::Hit { .. } => SoundEffect::Hit,
            GameEvent::NewHighScore { .. } => SoundEffect::HighScore,
        }
    }
}

/// Fire-and-forget audio sink
pub trait AudioNotifier {
    fn notify(&mut self, effect: SoundEffect);
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioNotifier for SilentAudio {
    fn notify(&mut self, _effect: SoundEffect) {}
}

/// Writes each effect to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioNotifier for LogAudio {
    fn notify(&mut self, effect: SoundEffect) {
        log::trace!("sfx: {:?}", effect);
    }
}
