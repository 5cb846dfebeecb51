//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    /// #87CEEB
    pub const SKY: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
    /// #228B22
    pub const GROUND: [f32; 4] = [0.133, 0.545, 0.133, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    /// #ff6b35
    pub const PLAYER: [f32; 4] = [1.0, 0.420, 0.208, 1.0];
    /// #654321
    pub const GUN: [f32; 4] = [0.396, 0.263, 0.129, 1.0];
    /// #8B0000
    pub const HOSTILE: [f32; 4] = [0.545, 0.0, 0.0, 1.0];
    pub const DETAIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const FRIENDLY_SHOT: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HOSTILE_SHOT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}
