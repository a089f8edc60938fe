//! Collision detection between the actor, the pipes and the playfield edges
//!
//! Everything is axis-aligned: the actor is a box, a pipe pair is a column
//! with a hole in it. Rotation is cosmetic and never enters these tests.

use super::state::{Actor, HitCause, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned box in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Shrink every side by `margin`, never past the center
    pub fn shrink(self, margin: f32) -> Self {
        let half_w = (self.right - self.left) / 2.0;
        let half_h = (self.bottom - self.top) / 2.0;
        let mx = margin.clamp(0.0, half_w);
        let my = margin.clamp(0.0, half_h);
        Self {
            left: self.left + mx,
            top: self.top + my,
            right: self.right - mx,
            bottom: self.bottom - my,
        }
    }

    /// Strict horizontal overlap with the span `[left, right]`
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right > left && self.left < right
    }
}

/// The actor's collision box with the forgiveness margin applied
pub fn actor_hitbox(actor: &Actor, margin: f32) -> Aabb {
    Aabb {
        left: actor.left(),
        top: actor.top(),
        right: actor.right(),
        bottom: actor.bottom(),
    }
    .shrink(margin)
}

/// Does the hitbox touch the solid part of the pipe pair?
///
/// Only the area outside `[gap_start, gap_start + gap_height]` is solid; a box
/// resting exactly on either gap edge is still clear.
pub fn hits_obstacle(hitbox: &Aabb, obstacle: &Obstacle) -> bool {
    if !hitbox.overlaps_x(obstacle.x, obstacle.right()) {
        return false;
    }
    hitbox.top < obstacle.gap_start || hitbox.bottom > obstacle.gap_end()
}

/// Has the actor touched the floor line or, when lethal, the ceiling?
///
/// Uses the unshrunk box: the forgiveness margin only applies to pipes.
pub fn boundary_hit(actor: &Actor, tuning: &Tuning) -> Option<HitCause> {
    if actor.bottom() >= tuning.floor_y() {
        return Some(HitCause::Floor);
    }
    if tuning.ceiling_is_lethal && actor.top() <= 0.0 {
        return Some(HitCause::Ceiling);
    }
    None
}

/// Has the obstacle's right edge moved past the actor's left edge?
#[inline]
pub fn has_cleared(actor: &Actor, obstacle: &Obstacle) -> bool {
    actor.left() > obstacle.right()
}
