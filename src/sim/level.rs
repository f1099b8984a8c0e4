//! Level grids: parsing tile files and building playable levels
//!
//! A level file is a whitespace-separated grid of tile codes, one row per
//! line. The grid is stretched over the playfield, so every tile is
//! `level_width / columns` by `level_height / rows`.
//!
//! | code | tile |
//! |------|------|
//! | 0 | empty |
//! | 1 | normal |
//! | 2 | breakable |
//! | 3 | trap |
//! | 4 | bounce |
//! | 5 | left-right mover |
//! | 6 | up-down mover |
//! | 8 | ball start |
//! | 9 | goal |
//! | 10 | right director |
//! | 11 | left director |

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Block, BlockKind};
use crate::error::LevelLoadError;

/// Movers are shrunk by this much on every side so they don't touch the
/// tiles around them at spawn
pub const MOVER_INSET: f32 = 0.1;

/// A decoded tile code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Start,
    Block(BlockKind),
}

impl Tile {
    pub fn from_code(code: u32) -> Option<Self> {
        let tile = match code {
            0 => Tile::Empty,
            1 => Tile::Block(BlockKind::Normal),
            2 => Tile::Block(BlockKind::Breakable),
            3 => Tile::Block(BlockKind::Trap),
            4 => Tile::Block(BlockKind::Bounce),
            5 => Tile::Block(BlockKind::LeftRightMover),
            6 => Tile::Block(BlockKind::UpDownMover),
            8 => Tile::Start,
            9 => Tile::Block(BlockKind::Goal),
            10 => Tile::Block(BlockKind::RightDirector),
            11 => Tile::Block(BlockKind::LeftDirector),
            _ => return None,
        };
        Some(tile)
    }
}

/// One block as placed by the level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub kind: BlockKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

/// A parsed level: blocks in file order plus the ball spawn point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub blocks: Vec<BlockSpec>,
    /// Where the ball's center starts
    pub spawn: Vec2,
}

impl LevelLayout {
    /// Parse a tile grid stretched over `level_width` x `level_height`
    pub fn parse(text: &str, level_width: f32, level_height: f32) -> Result<Self, LevelLoadError> {
        let mut rows: Vec<Vec<Tile>> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let row = rows.len();
            let tiles = line
                .split_whitespace()
                .enumerate()
                .map(|(column, token)| {
                    let code = token.parse::<u32>().map_err(|_| LevelLoadError::InvalidToken {
                        row,
                        column,
                        token: token.to_string(),
                    })?;
                    Tile::from_code(code).ok_or(LevelLoadError::UnknownTile { row, column, code })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if tiles.len() != first.len() {
                    return Err(LevelLoadError::RaggedRow {
                        row,
                        expected: first.len(),
                        found: tiles.len(),
                    });
                }
            }
            rows.push(tiles);
        }

        let Some(first) = rows.first() else {
            return Err(LevelLoadError::Empty);
        };
        let unit = Vec2::new(
            level_width / first.len() as f32,
            level_height / rows.len() as f32,
        );

        let mut blocks = Vec::new();
        let mut spawn: Option<((usize, usize), Vec2)> = None;

        for (y, row) in rows.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let pos = unit * Vec2::new(x as f32, y as f32);
                match *tile {
                    Tile::Empty => {}
                    Tile::Start => {
                        if let Some((first, _)) = spawn {
                            return Err(LevelLoadError::MultipleSpawns {
                                first,
                                second: (y, x),
                            });
                        }
                        spawn = Some(((y, x), pos + unit / 2.0));
                    }
                    Tile::Block(kind) if kind.is_mover() => blocks.push(BlockSpec {
                        kind,
                        pos: pos + MOVER_INSET,
                        size: unit - 2.0 * MOVER_INSET,
                    }),
                    Tile::Block(kind) => blocks.push(BlockSpec {
                        kind,
                        pos,
                        size: unit,
                    }),
                }
            }
        }

        let (_, spawn) = spawn.ok_or(LevelLoadError::MissingSpawn)?;
        Ok(Self { blocks, spawn })
    }

    /// Read and parse a level file
    pub fn load(
        path: impl AsRef<Path>,
        level_width: f32,
        level_height: f32,
    ) -> Result<Self, LevelLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, level_width, level_height)
    }
}

/// Load `1.txt` through `{count}.txt` from `dir`
pub fn load_levels(
    dir: impl AsRef<Path>,
    count: usize,
    level_width: f32,
    level_height: f32,
) -> Result<Vec<LevelLayout>, LevelLoadError> {
    let dir = dir.as_ref();
    let layouts = (1..=count)
        .map(|i| LevelLayout::load(dir.join(format!("{}.txt", i)), level_width, level_height))
        .collect::<Result<Vec<_>, _>>()?;
    if layouts.is_empty() {
        return Err(LevelLoadError::NoLevels);
    }
    log::info!("Loaded {} levels from {}", layouts.len(), dir.display());
    Ok(layouts)
}

/// A level being played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub blocks: Vec<Block>,
    pub ball: Ball,
}

impl Level {
    /// Fresh level instance: every block intact, ball resting at spawn
    pub fn from_layout(layout: &LevelLayout, ball_radius: f32) -> Self {
        Self {
            blocks: layout
                .blocks
                .iter()
                .map(|spec| Block::new(spec.kind, spec.pos, spec.size))
                .collect(),
            ball: Ball::new(layout.spawn - ball_radius, ball_radius),
        }
    }

    /// True once no intact goal remains
    pub fn is_completed(&self) -> bool {
        !self
            .blocks
            .iter()
            .any(|b| b.kind == BlockKind::Goal && !b.destroyed)
    }
}
