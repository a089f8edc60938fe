//! Cosmetic particle bursts
//!
//! Particles are a rendering hint only. They draw from their own RNG stream so
//! changing burst sizes never shifts gameplay randomness.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::tuning::Tuning;

/// Feather colors for the flap burst
const FEATHER_COLORS: [u32; 3] = [0xfbbf24, 0xfde68a, 0xffffff];
/// Debris colors for the crash burst
const DEBRIS_COLORS: [u32; 3] = [0xb45309, 0xea580c, 0xfbbf24];

/// Kind of burst to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// Small puff trailing down and back from a flap
    Flap,
    /// Radial spray on impact
    Crash,
}

/// Spawn a burst at `origin`, evicting the oldest particles past the cap
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    burst: Burst,
    tuning: &Tuning,
) {
    if tuning.max_particles == 0 {
        return;
    }

    let (count, palette) = match burst {
        Burst::Flap => (tuning.jump_burst, &FEATHER_COLORS),
        Burst::Crash => (tuning.hit_burst, &DEBRIS_COLORS),
    };

    // Only the newest `keep` fit; make room for them in one pass
    let count = count as usize;
    let keep = count.min(tuning.max_particles);
    let excess = (particles.len() + keep).saturating_sub(tuning.max_particles);
    particles.drain(..excess);

    for i in 0..count {
        let vel = match burst {
            Burst::Flap => Vec2::new(
                rng.random_range(-2.0..-0.5),
                rng.random_range(0.5..2.0),
            ),
            Burst::Crash => {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(1.5..4.5);
                Vec2::new(angle.cos(), angle.sin()) * speed
            }
        };
        let color = palette[rng.random_range(0..palette.len())];
        let size = rng.random_range(2.0..5.0);

        if i >= count - keep {
            particles.push(Particle {
                pos: origin,
                vel,
                color,
                life: 1.0,
                size,
            });
        }
    }
}

/// Advance every particle one tick and drop the dead ones
pub fn update(particles: &mut Vec<Particle>, tuning: &Tuning) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += tuning.particle_gravity;
        particle.life -= tuning.particle_decay;
    }
    particles.retain(|p| p.life > 0.0);
}
