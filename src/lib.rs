//! Bouncy Ball - a tile-based falling ball arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, collisions, game state)
//! - `renderer`: Sprite submission for the host's GPU renderer
//! - `audio`: Sound cue vocabulary and the audio sink seam
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::LevelLoadError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Ball radius
    pub const BALL_RADIUS: f32 = 7.0;

    /// Largest frame delta fed to the simulation (seconds). Frames longer than
    /// this (window drag, breakpoint) are clamped so the ball cannot skip
    /// through several tiles at once.
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Directory holding `1.txt`, `2.txt`, ... level grids
    pub const LEVEL_DIR: &str = "levels";
    /// Number of shipped levels
    pub const LEVEL_COUNT: usize = 3;

    /// Particles spawned at the ball each active frame
    pub const PARTICLES_PER_FRAME: usize = 2;
}
