//! Score-indexed difficulty ramp
//!
//! Obstacle speed and spawn cadence depend on the score and nothing else, so
//! two runs at the same score always play at the same difficulty.

use crate::tuning::{SpeedRamp, Tuning};

/// Obstacle speed in pixels per tick at the given score
pub fn obstacle_speed(score: u64, tuning: &Tuning) -> f32 {
    let bonus = match tuning.speed_ramp {
        SpeedRamp::Linear { increment } => score as f32 * increment,
        SpeedRamp::Stepped { every, increment } => {
            let steps = score / u64::from(every.max(1));
            steps as f32 * increment
        }
    };
    (tuning.base_speed + bonus.max(0.0)).min(tuning.max_speed)
}

/// Ticks between obstacle spawns at the given score
pub fn spawn_interval(score: u64, tuning: &Tuning) -> u32 {
    let divisor = 1.0 + score as f32 * tuning.cadence_increment.max(0.0);
    let interval = (tuning.base_spawn_interval as f32 / divisor).round() as u32;
    interval.clamp(tuning.min_spawn_interval.max(1), tuning.base_spawn_interval.max(1))
}
