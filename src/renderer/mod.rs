//! Rendering module
//!
//! The game never touches the GPU. Each frame it submits textured quads to a
//! [`SpriteRenderer`]; [`SpriteBatch`] packs them into instance records the
//! host uploads as-is.

pub mod sprites;
pub mod vertex;

pub use sprites::{SpriteBatch, SpriteRenderer, TextureId, block_sprite, draw_game};
pub use vertex::SpriteInstance;
