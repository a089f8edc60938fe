//! Scene assembly - snapshot in, triangle list out
//!
//! Pure CPU work, so the layout of a frame can be tested without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, rgb};
use crate::sim::{GamePhase, Obstacle, Snapshot};
use crate::tuning::Tuning;

/// Stroke width of the pipe border
const PIPE_BORDER: f32 = 2.0;
/// Bird feature sizes are authored for a 24px actor and scaled from there
const BIRD_REFERENCE_SIZE: f32 = 24.0;
const PARTICLE_SEGMENTS: u32 = 8;

/// Build every vertex for one frame in playfield coordinates
pub fn build_scene(snapshot: &Snapshot, tuning: &Tuning) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        64 + snapshot.obstacles.len() * 60
            + snapshot.particles.len() * (PARTICLE_SEGMENTS as usize * 3),
    );

    vertices.extend(shapes::gradient_rect(
        0.0,
        0.0,
        tuning.screen_width,
        tuning.screen_height,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));

    for obstacle in snapshot.obstacles {
        pipe(&mut vertices, obstacle, tuning);
    }

    if tuning.ground_height > 0.0 {
        vertices.extend(shapes::rect(
            0.0,
            tuning.floor_y(),
            tuning.screen_width,
            tuning.ground_height,
            colors::GROUND,
        ));
    }

    bird(&mut vertices, snapshot);

    for p in snapshot.particles {
        let life = p.life.clamp(0.0, 1.0);
        vertices.extend(shapes::circle(
            p.pos,
            p.size * (0.5 + 0.5 * life),
            rgb(p.color, life),
            PARTICLE_SEGMENTS,
        ));
    }

    // Title and game-over panels are DOM overlays; dim the playfield under them
    if snapshot.phase != GamePhase::Playing {
        vertices.extend(shapes::rect(
            0.0,
            0.0,
            tuning.screen_width,
            tuning.screen_height,
            colors::SHADE,
        ));
    }

    vertices
}

/// Top and bottom segments of one obstacle, with a darker border
fn pipe(out: &mut Vec<Vertex>, obstacle: &Obstacle, tuning: &Tuning) {
    let x = obstacle.x;
    let w = obstacle.width;
    let segments = [
        (0.0, obstacle.gap_start),
        (obstacle.gap_end(), tuning.floor_y() - obstacle.gap_end()),
    ];
    for (y, h) in segments {
        out.extend(shapes::rect(x, y, w, h, colors::PIPE));
        if h > 0.0 {
            out.extend(shapes::outline(x, y, w, h, PIPE_BORDER, colors::PIPE_EDGE));
        }
    }
}

/// Square bird with eye and beak, tilted by its rotation
fn bird(out: &mut Vec<Vertex>, snapshot: &Snapshot) {
    let actor = snapshot.actor;
    let pivot = actor.pos;
    let angle = actor.rotation;
    let s = actor.width / BIRD_REFERENCE_SIZE;
    let half = Vec2::new(actor.width, actor.height) / 2.0;

    // Border first, body inset on top of it
    out.extend(shapes::rotated_rect(
        pivot,
        angle,
        -half,
        half * 2.0,
        colors::BIRD_EDGE,
    ));
    let inset = Vec2::splat(2.0 * s);
    out.extend(shapes::rotated_rect(
        pivot,
        angle,
        -half + inset,
        half * 2.0 - inset * 2.0,
        colors::BIRD,
    ));

    let features = [
        (Vec2::new(4.0, -6.0), Vec2::new(8.0, 8.0), colors::EYE),
        (Vec2::new(8.0, -4.0), Vec2::new(4.0, 4.0), colors::PUPIL),
        (
            Vec2::new(BIRD_REFERENCE_SIZE / 2.0 - 2.0, 0.0),
            Vec2::new(8.0, 6.0),
            colors::BEAK,
        ),
    ];
    for (offset, size, color) in features {
        out.extend(shapes::rotated_rect(pivot, angle, offset * s, size * s, color));
    }
}
