//! Idle/demo mode - a simple pilot that plays the game
//!
//! Aims for a point just below the middle of the next gap and flaps whenever
//! the actor sinks past it while falling.

use super::engine::Snapshot;
use super::state::GamePhase;
use crate::tuning::Tuning;

/// How far below the gap's center the pilot holds the actor
const TARGET_BIAS: f32 = 20.0;

/// The y coordinate the pilot is steering toward
pub fn target_y(snapshot: &Snapshot, tuning: &Tuning) -> f32 {
    let actor = snapshot.actor;
    snapshot
        .obstacles
        .iter()
        .find(|o| o.right() >= actor.left())
        .map(|o| o.gap_start + o.gap_height / 2.0 + TARGET_BIAS)
        .unwrap_or(tuning.actor_start_y)
}

/// Should the pilot flap this tick?
pub fn should_flap(snapshot: &Snapshot, tuning: &Tuning) -> bool {
    if snapshot.phase != GamePhase::Playing {
        return false;
    }
    let actor = snapshot.actor;
    // About to hit the floor: flap no matter what
    if actor.bottom() + actor.velocity + tuning.gravity >= tuning.floor_y() {
        return true;
    }
    actor.pos.y > target_y(snapshot, tuning) && actor.velocity >= 0.0
}
