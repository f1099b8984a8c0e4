//! Instance records handed to the GPU renderer

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use super::sprites::TextureId;

/// One textured quad, laid out for direct upload into an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in screen pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Degrees, around the quad center
    pub rotation: f32,
    /// Index into the host's texture array
    pub texture: u32,
    pub _pad: [u32; 2],
    pub tint: [f32; 4],
}

impl SpriteInstance {
    pub fn new(texture: TextureId, pos: Vec2, size: Vec2, rotation: f32, tint: Vec4) -> Self {
        Self {
            position: pos.to_array(),
            size: size.to_array(),
            rotation,
            texture: texture as u32,
            _pad: [0; 2],
            tint: tint.to_array(),
        }
    }
}

/// Tints for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TRAP: [f32; 4] = [0.8, 0.3, 0.3, 1.0];
    pub const BOUNCE: [f32; 4] = [0.8, 0.3, 0.8, 1.0];
}
