//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Frame-stepped with the caller's wall-clock delta
//! - Seeded RNG only (and only for the visual trail)
//! - Blocks are tested in level-file order

pub mod collision;
pub mod geometry;
pub mod level;
pub mod particles;
pub mod physics;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, box_box_collision, circle_box_collision};
pub use geometry::{Aabb, Side, classify};
pub use level::{BlockSpec, Level, LevelLayout, Tile, load_levels};
pub use particles::{Particle, ParticleTrail};
pub use physics::{Steer, integrate_ball, steer_ball, translate_movers};
pub use resolve::{Heading, Reaction, react, resolve_ball, resolve_movers};
pub use state::{Ball, Block, BlockKind, GameEvent, GamePhase, GameState, LossCause};
pub use tick::{FrameInput, loss_cause, tick};
