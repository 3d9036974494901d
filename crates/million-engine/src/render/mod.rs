//! Per-frame rendering.
//!
//! The render driver clears the bound surface, lazily installs the configured
//! asset through the collaborators, draws it and presents. Texture and
//! geometry work sits behind [`TextureStore`].
//!
//! Convention:
//! - geometry is in surface pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC with a projection uniform

mod color;
mod driver;
mod projection;
mod sprite;
mod texture;

pub use color::ClearColor;
pub use driver::{Collaborators, RenderDriver};
pub use projection::Projection;
pub use sprite::SpriteRenderer;
pub use texture::{Orientation, Position, TextureHandle, TextureStore};
