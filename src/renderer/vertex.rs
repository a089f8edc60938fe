//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Unpack 0xRRGGBB into RGBA floats
pub const fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const SKY_TOP: [f32; 4] = rgb(0x4ade80, 1.0);
    pub const SKY_BOTTOM: [f32; 4] = rgb(0x60a5fa, 1.0);
    pub const PIPE: [f32; 4] = rgb(0x166534, 1.0);
    pub const PIPE_EDGE: [f32; 4] = rgb(0x14532d, 1.0);
    pub const GROUND: [f32; 4] = rgb(0x14532d, 1.0);
    pub const BIRD: [f32; 4] = rgb(0xfbbf24, 1.0);
    pub const BIRD_EDGE: [f32; 4] = rgb(0xb45309, 1.0);
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BEAK: [f32; 4] = rgb(0xea580c, 1.0);
    /// Dim overlay behind the title and game-over panels
    pub const SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const BACKGROUND: [f32; 4] = rgb(0x0f172a, 1.0);
}
