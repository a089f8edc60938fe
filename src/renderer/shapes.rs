//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in playfield coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(x, y, w, h, color, color)
}

/// Rectangle shaded from `top` to `bottom`
pub fn gradient_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    let (x2, y2) = (x + w, y + h);
    vec![
        Vertex::new(x, y, top),
        Vertex::new(x, y2, bottom),
        Vertex::new(x2, y, top),
        Vertex::new(x2, y, top),
        Vertex::new(x, y2, bottom),
        Vertex::new(x2, y2, bottom),
    ]
}

/// Rectangle given in a local frame, rotated by `angle` around `pivot`
///
/// `offset` is the local top-left corner relative to the pivot.
pub fn rotated_rect(
    pivot: Vec2,
    angle: f32,
    offset: Vec2,
    size: Vec2,
    color: [f32; 4],
) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |local: Vec2| {
        let p = pivot + rot.rotate(local);
        Vertex::new(p.x, p.y, color)
    };

    let a = corner(offset);
    let b = corner(offset + Vec2::new(0.0, size.y));
    let c = corner(offset + Vec2::new(size.x, 0.0));
    let d = corner(offset + size);
    vec![a, b, c, c, b, d]
}

/// Rectangle outline of the given thickness, drawn inside the bounds
pub fn outline(x: f32, y: f32, w: f32, h: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(w / 2.0).min(h / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(x, y, w, t, color));
    vertices.extend(rect(x, y + h - t, w, t, color));
    vertices.extend(rect(x, y + t, t, h - 2.0 * t, color));
    vertices.extend(rect(x + w - t, y + t, t, h - 2.0 * t, color));
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
