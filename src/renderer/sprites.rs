//! Sprite submission: which texture and tint each game element gets, and the
//! order they are drawn in

use glam::{Vec2, Vec4};

use super::vertex::{SpriteInstance, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{BlockKind, GamePhase, GameState};

/// Edge length of a trail particle quad
const PARTICLE_SIZE: f32 = 10.0;

/// Textures the host must provide, in this index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureId {
    Ball,
    BlockNormal,
    BlockBreakable,
    BlockGoal,
    BlockLrMove,
    BlockUdMove,
    BlockRightDir,
    BlockLeftDir,
    Background,
    Particle,
}

impl TextureId {
    /// Image file for this texture, relative to the texture directory
    pub fn asset(&self) -> &'static str {
        match self {
            TextureId::Ball => "ball.png",
            TextureId::BlockNormal => "block_normal.png",
            TextureId::BlockBreakable => "block_breakable.png",
            TextureId::BlockGoal => "block_goal.png",
            TextureId::BlockLrMove => "block_lrmove.png",
            TextureId::BlockUdMove => "block_udmove.png",
            TextureId::BlockRightDir => "block_rightdir.png",
            TextureId::BlockLeftDir => "block_leftdir.png",
            TextureId::Background => "background.jpg",
            TextureId::Particle => "particle.png",
        }
    }
}

/// The renderer collaborator
pub trait SpriteRenderer {
    fn draw_sprite(&mut self, texture: TextureId, pos: Vec2, size: Vec2, rotation: f32, tint: Vec4);
}

/// Collects a frame's sprites for a single instanced draw
#[derive(Debug, Default)]
pub struct SpriteBatch {
    instances: Vec<SpriteInstance>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Instance data ready for a buffer write
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl SpriteRenderer for SpriteBatch {
    fn draw_sprite(&mut self, texture: TextureId, pos: Vec2, size: Vec2, rotation: f32, tint: Vec4) {
        self.instances
            .push(SpriteInstance::new(texture, pos, size, rotation, tint));
    }
}

/// Texture and tint for a block type
pub fn block_sprite(kind: BlockKind) -> (TextureId, Vec4) {
    let white = Vec4::from_array(colors::WHITE);
    match kind {
        BlockKind::Normal => (TextureId::BlockNormal, white),
        BlockKind::Trap => (TextureId::BlockNormal, Vec4::from_array(colors::TRAP)),
        BlockKind::Bounce => (TextureId::BlockNormal, Vec4::from_array(colors::BOUNCE)),
        BlockKind::Breakable => (TextureId::BlockBreakable, white),
        BlockKind::LeftRightMover => (TextureId::BlockLrMove, white),
        BlockKind::UpDownMover => (TextureId::BlockUdMove, white),
        BlockKind::Goal => (TextureId::BlockGoal, white),
        BlockKind::RightDirector => (TextureId::BlockRightDir, white),
        BlockKind::LeftDirector => (TextureId::BlockLeftDir, white),
    }
}

/// Submit one frame: background, then (while playing) trail particles, intact
/// blocks in level order, and the ball on top
pub fn draw_game(state: &GameState, renderer: &mut impl SpriteRenderer) {
    let white = Vec4::from_array(colors::WHITE);
    renderer.draw_sprite(
        TextureId::Background,
        Vec2::ZERO,
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        0.0,
        white,
    );

    if state.phase != GamePhase::Active {
        return;
    }

    for p in state.particles.iter() {
        renderer.draw_sprite(TextureId::Particle, p.pos, Vec2::splat(PARTICLE_SIZE), 0.0, p.color);
    }

    for block in state.level.blocks.iter().filter(|b| !b.destroyed) {
        let (texture, tint) = block_sprite(block.kind);
        renderer.draw_sprite(texture, block.pos, block.size, 0.0, tint);
    }

    let ball = &state.level.ball;
    renderer.draw_sprite(TextureId::Ball, ball.pos, Vec2::splat(ball.diameter()), 0.0, white);
}
